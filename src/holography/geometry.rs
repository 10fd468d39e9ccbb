//! Acquisition geometry and coordinate grids
//!
//! Point-source illumination magnifies the sample by `L / z`, so the camera
//! plane and the sample plane are sampled on different grids: spatial
//! coordinates across the sensor, spatial frequencies across the (smaller)
//! sample-plane window.

mod grids;
pub mod types;

pub use grids::{camera_grid, frequency_grid, linspace, stepped_axis, CoordinateGrid, FrequencyGrid};
pub use types::{Geometry, GeometryBuilder};
