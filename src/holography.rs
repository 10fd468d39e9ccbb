//! Point-source DLHM reconstruction module
//!
//! The numeric core is split into the four stages of the reconstruction
//! (geometry, reference wave, spectral propagation, distortion correction)
//! and composed by [`reconstruct`]. Reading holograms, writing results and
//! orchestrating both around the core lives in [`io`] and [`pipeline`].

pub mod common;
pub mod config;
pub mod geometry;
pub mod reference_wave;
pub mod propagation;
pub mod distortion;
pub mod io;
pub mod pipeline;
mod reconstruction;

pub use common::{
    ReconstructionError,
    Result,
};

pub use config::{
    OutputEncoding,
    ReconstructionConfig,
    ReconstructionConfigBuilder,
    TiffCompression,
};

pub use geometry::{
    CoordinateGrid,
    FrequencyGrid,
    Geometry,
    GeometryBuilder,
};

pub use distortion::{
    CameraMatrix,
    DistortionCoefficients,
    DistortionCorrector,
};

pub use io::{
    FieldWriter,
    Hologram,
    HologramReader,
    RawHologramReader,
    StandardTiffWriter,
    TiffHologramReader,
};

pub use pipeline::{
    OutputPaths,
    PipelineTimings,
    ReconstructionPipeline,
};

pub use reconstruction::{
    back_propagate,
    reconstruct,
    PropagatedField,
    Reconstruction,
};
