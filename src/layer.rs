use crate::error::Result;
use crate::init::SignedTenths;
use crate::matrix::Mat;
use crate::utils::try_zeros;

use rand::Rng;

/// The parameters of a single fully connected layer.
///
/// Weights are stored with one row per input unit and one column per output
/// unit, so `weights[(i, j)]` connects input `i` to output `j`.
#[derive(Clone, Debug)]
pub struct Layer {
    /// The network weights, initialized from [`SignedTenths`].
    weights: Mat,
    /// One bias per output unit.
    thetas: Vec<f64>,
}

impl Layer {
    /// Initializes a new, untrained layer.
    ///
    /// Arguments:
    ///
    ///  * `inputs` - the number of inputs to this layer.
    ///  * `outputs` - the number of outputs from this layer.
    ///  * `rng` - the random source for the initial weights.
    pub fn new<R: Rng + ?Sized>(
        inputs: usize,
        outputs: usize,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(Layer {
            weights: Mat::random(SignedTenths, rng, inputs, outputs)?,
            thetas: try_zeros(outputs)?,
        })
    }

    /// Returns the number of inputs to this layer.
    pub fn input_len(&self) -> usize {
        self.weights.rows()
    }

    /// Returns the number of outputs from this layer.
    pub fn output_len(&self) -> usize {
        self.weights.cols()
    }

    pub fn weights(&self) -> &Mat {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut Mat {
        &mut self.weights
    }

    pub fn thetas(&self) -> &[f64] {
        &self.thetas
    }

    pub fn thetas_mut(&mut self) -> &mut [f64] {
        &mut self.thetas
    }

    /// Returns an empty gradient accumulator shaped like the weights.
    pub fn new_update(&self) -> Result<Mat> {
        Mat::zeros(self.input_len(), self.output_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn shapes() {
        let layer = Layer::new(6, 4, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(layer.input_len(), 6);
        assert_eq!(layer.output_len(), 4);
        assert_eq!(layer.weights().shape(), (6, 4));
        assert_eq!(layer.thetas(), &[0.0; 4]);
    }

    #[test]
    fn update_matches_weights() {
        let layer = Layer::new(3, 2, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        let update = layer.new_update().unwrap();
        assert_eq!(update.shape(), layer.weights().shape());
        assert!(update.as_slice().iter().all(|&x| x == 0.0));
    }
}
