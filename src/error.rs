//! Error kinds for the one-shot simulation pipeline
//!
//! Both kinds are fatal: nothing is retried and no partial output is
//! produced. `Decode` fires before any simulation state exists;
//! `InvalidConfiguration` fires before the world is built.

use std::fmt;

#[derive(Debug)]
pub enum SimError {
    /// The source image could not be read or decoded.
    Decode(image::ImageError),
    /// A configuration value makes the run meaningless (non-positive dt,
    /// negative duration, zero world dimension, ...).
    InvalidConfiguration(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Decode(e) => write!(f, "failed to decode image: {e}"),
            SimError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Decode(e) => Some(e),
            SimError::InvalidConfiguration(_) => None,
        }
    }
}

impl From<image::ImageError> for SimError {
    fn from(e: image::ImageError) -> Self {
        SimError::Decode(e)
    }
}
