//! Reconstruction of in-line holograms recorded with a point-source
//! (lensless) digital holographic microscope.
//!
//! The numeric core lives in [`holography`]; [`logger`] wires up `tracing`
//! for the `dlhm` binary.

pub mod holography;
pub mod logger;
