//! The training extension point.
//!
//! No learning algorithm is defined yet. The driver calls a `TrainingStep`
//! once per record with the network's input buffer already filled and the
//! one-hot target for that record.

use crate::error::Result;
use crate::network::Network;

/// Updates a network from one example.
pub trait TrainingStep {
    /// Performs one training step.
    ///
    /// `network.input()` holds the flattened example and `expected` the
    /// one-hot target. Implementations may accumulate into
    /// `network.updates_mut()` and adjust the layers as they see fit.
    fn step(&mut self, network: &mut Network, expected: &[f64]) -> Result<()>;
}

/// A training step that leaves the network untouched.
#[derive(Copy, Clone, Debug, Default)]
pub struct Untrained;

impl TrainingStep for Untrained {
    fn step(&mut self, _: &mut Network, _: &[f64]) -> Result<()> {
        Ok(())
    }
}

impl<T: TrainingStep + ?Sized> TrainingStep for &mut T {
    fn step(&mut self, network: &mut Network, expected: &[f64]) -> Result<()> {
        (**self).step(network, expected)
    }
}

impl<T: TrainingStep + ?Sized> TrainingStep for Box<T> {
    fn step(&mut self, network: &mut Network, expected: &[f64]) -> Result<()> {
        (**self).step(network, expected)
    }
}
