//! Reads CIFAR binary records, dumps each image as a PPM and allocates the
//! memory of an untrained 1024 → 256 → 10 feedforward network.

pub mod config;
pub mod driver;
pub mod error;
pub mod image;
pub mod init;
pub mod layer;
pub mod matrix;
pub mod network;
pub mod ppm;
pub mod record;
pub mod trainer;

mod utils;

pub use crate::error::{Error, Result};
