//! Memory for an untrained [feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network).
//!
//! A `Network` owns everything a training step needs: one activation buffer
//! per layer, the weights and biases connecting consecutive layers, and a
//! zeroed gradient accumulator for every weight matrix.
//!
//! # Example
//!
//! ```
//! # use cifar_neurons::network::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//! let network = Network::cifar(&mut rng).unwrap();
//! assert_eq!(network.input_len(), 1024);
//! assert_eq!(network.output_len(), 10);
//! assert_eq!(network.layers()[0].weights().shape(), (1024, 256));
//! ```

use crate::error::{Error, Result};
use crate::layer::Layer;
use crate::matrix::Mat;
use crate::record::{INPUT_LEN, NUM_CLASSES};
use crate::utils::{try_zeros, Back, Front};

use rand::Rng;

/// Number of hidden units in the CIFAR network.
pub const HIDDEN_LEN: usize = 256;

/// Layer sizes of the CIFAR network: input, hidden, output.
pub const CIFAR_LAYERS: [usize; 3] = [INPUT_LEN, HIDDEN_LEN, NUM_CLASSES];

/// The owned state of a feedforward network.
#[derive(Debug)]
pub struct Network {
    layers: Vec<Layer>,
    updates: Vec<Mat>,
    activations: Vec<Vec<f64>>,
}

impl Network {
    /// Creates a new, untrained network.
    ///
    /// Arguments:
    ///  * `layer_sizes` - the number of neurons in each layer. Must contain
    ///                    at least 3 elements - one input layer, one hidden
    ///                    layer, and one output layer - none of them empty.
    ///  * `rng` - the random source used to initialize the weights.
    pub fn new<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Self> {
        validate(layer_sizes)?;

        let mut layers = Vec::with_capacity(layer_sizes.len() - 1);
        for sizes in layer_sizes.windows(2) {
            layers.push(Layer::new(sizes[0], sizes[1], rng)?);
        }

        let mut updates = Vec::with_capacity(layers.len());
        for layer in &layers {
            updates.push(layer.new_update()?);
        }

        let mut activations = Vec::with_capacity(layer_sizes.len());
        for &size in layer_sizes {
            activations.push(try_zeros(size)?);
        }

        Ok(Network {
            layers,
            updates,
            activations,
        })
    }

    /// Creates the 1024 → 256 → 10 network used for CIFAR images.
    pub fn cifar<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        Network::new(&CIFAR_LAYERS, rng)
    }

    /// Returns the size of the input layer to the network.
    pub fn input_len(&self) -> usize {
        self.layers.front().input_len()
    }

    /// Returns the size of the output layer from the network.
    pub fn output_len(&self) -> usize {
        self.layers.back().output_len()
    }

    /// Returns the sizes of every layer, input first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.activations.iter().map(Vec::len).collect()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Gradient accumulators, one per layer.
    pub fn updates(&self) -> &[Mat] {
        &self.updates
    }

    pub fn updates_mut(&mut self) -> &mut [Mat] {
        &mut self.updates
    }

    /// Activation buffers, input layer first.
    pub fn activations(&self) -> &[Vec<f64>] {
        &self.activations
    }

    pub fn activations_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.activations
    }

    /// The input activation buffer.
    pub fn input(&self) -> &[f64] {
        self.activations.front()
    }

    pub fn input_mut(&mut self) -> &mut [f64] {
        self.activations.mut_front()
    }
}

/// Verifies that `layer_sizes` describes a usable network.
fn validate(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 3 {
        return Err(Error::InvalidTopology(format!(
            "need at least 3 layers, got {}",
            layer_sizes.len()
        )));
    }
    if let Some(i) = layer_sizes.iter().position(|&size| size == 0) {
        return Err(Error::InvalidTopology(format!("layer {} is empty", i)));
    }
    Ok(())
}
