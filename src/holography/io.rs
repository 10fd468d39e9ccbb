//! Hologram loading and result writing
//!
//! Readers turn encoded images (TIFF or camera RAW) into an intensity
//! [`Hologram`]; writers store reconstructed real fields as TIFF.

mod reader;
mod tiff_reader;
mod raw_reader;
mod debayer;
mod writer;
mod standard_tiff_writer;
pub mod types;

pub use reader::HologramReader;
pub use tiff_reader::TiffHologramReader;
pub use raw_reader::RawHologramReader;
pub use writer::FieldWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{luminance, Hologram};
