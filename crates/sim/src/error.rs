//! Simulation error types.

use quadtree::QuadTreeError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while creating or stepping a [`Simulation`](crate::Simulation).
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Index error: {0}")]
    Index(#[from] QuadTreeError),
}
