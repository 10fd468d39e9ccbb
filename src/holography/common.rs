//! Common utilities module
//!
//! This module contains shared utilities used across the reconstruction.

pub mod error;

pub use error::{ReconstructionError, Result};
