use std::io::Write;

use ndarray::ArrayView2;

use crate::holography::common::error::Result;
use crate::holography::config::ReconstructionConfig;

pub trait FieldWriter {
    fn write_field(&self, field: ArrayView2<f64>, output: &mut dyn Write, config: &ReconstructionConfig) -> Result<()>;
}
