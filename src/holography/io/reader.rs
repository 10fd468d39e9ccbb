use crate::holography::common::error::Result;
use crate::holography::io::types::Hologram;

pub trait HologramReader {
    fn read_hologram(&self, data: &[u8]) -> Result<Hologram>;
}
