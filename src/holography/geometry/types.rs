//! Acquisition geometry types

use std::f64::consts::PI;

use crate::holography::common::error::{ReconstructionError, Result};

/// Distances and wavelength of a point-source DLHM setup.
///
/// All quantities share one length unit (meters in practice). Construction
/// performs no checks; [`Geometry::validate`] exposes the preconditions of the
/// reconstruction so a caller can decide whether to enforce them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Source to camera distance `L`
    pub source_to_camera: f64,
    /// Source to sample distance `z`
    pub source_to_sample: f64,
    /// Physical width of the camera sensor `W_c`
    pub sensor_width: f64,
    /// Illumination wavelength
    pub wavelength: f64,
}

impl Geometry {
    pub const fn new(source_to_camera: f64, source_to_sample: f64, sensor_width: f64, wavelength: f64) -> Self {
        Self {
            source_to_camera,
            source_to_sample,
            sensor_width,
            wavelength,
        }
    }

    pub fn builder() -> GeometryBuilder {
        GeometryBuilder::default()
    }

    /// Geometric magnification `L / z`.
    pub fn magnification(&self) -> f64 {
        self.source_to_camera / self.source_to_sample
    }

    /// Width of the field of view at the sample plane, `W_c / Mag`.
    pub fn sample_width(&self) -> f64 {
        self.sensor_width / self.magnification()
    }

    /// Spatial-frequency spacing of the sample-plane grid, `1 / W_s`.
    pub fn frequency_step(&self) -> f64 {
        1.0 / self.sample_width()
    }

    pub fn wavenumber(&self) -> f64 {
        2.0 * PI / self.wavelength
    }

    /// Sample to camera distance `L - z` the field is propagated over.
    pub fn propagation_distance(&self) -> f64 {
        self.source_to_camera - self.source_to_sample
    }

    /// Checks that every quantity is finite and strictly positive and that the
    /// sample sits between the source and the camera.
    pub fn validate(&self) -> Result<()> {
        let quantities = [
            ("source_to_camera", self.source_to_camera),
            ("source_to_sample", self.source_to_sample),
            ("sensor_width", self.sensor_width),
            ("wavelength", self.wavelength),
        ];

        for (name, value) in quantities {
            if !value.is_finite() || value <= 0.0 {
                return Err(ReconstructionError::InvalidGeometry(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }

        if self.source_to_sample >= self.source_to_camera {
            return Err(ReconstructionError::InvalidGeometry(format!(
                "sample must lie between source and camera (z={} >= L={})",
                self.source_to_sample, self.source_to_camera
            )));
        }

        Ok(())
    }
}

/// Builder for Geometry
#[derive(Default)]
pub struct GeometryBuilder {
    source_to_camera: Option<f64>,
    source_to_sample: Option<f64>,
    sensor_width: Option<f64>,
    wavelength: Option<f64>,
}

impl GeometryBuilder {
    pub fn source_to_camera(mut self, distance: f64) -> Self {
        self.source_to_camera = Some(distance);
        self
    }

    pub fn source_to_sample(mut self, distance: f64) -> Self {
        self.source_to_sample = Some(distance);
        self
    }

    pub fn sensor_width(mut self, width: f64) -> Self {
        self.sensor_width = Some(width);
        self
    }

    pub fn wavelength(mut self, wavelength: f64) -> Self {
        self.wavelength = Some(wavelength);
        self
    }

    /// Fails only on missing fields; physical preconditions are left to
    /// [`Geometry::validate`].
    pub fn build(self) -> Result<Geometry> {
        let missing = |name: &str| ReconstructionError::InvalidGeometry(format!("{} is not set", name));
        Ok(Geometry {
            source_to_camera: self.source_to_camera.ok_or_else(|| missing("source_to_camera"))?,
            source_to_sample: self.source_to_sample.ok_or_else(|| missing("source_to_sample"))?,
            sensor_width: self.sensor_width.ok_or_else(|| missing("sensor_width"))?,
            wavelength: self.wavelength.ok_or_else(|| missing("wavelength"))?,
        })
    }
}
