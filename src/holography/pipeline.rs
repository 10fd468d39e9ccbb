//! Reconstruction pipeline
//!
//! Wraps the numeric core with decoding, precondition checks and encoding.
//! The core never fails; everything that can go wrong is reported here.

mod timing;


use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::holography::{
    common::error::{ReconstructionError, Result},
    config::ReconstructionConfig,
    geometry::Geometry,
    io::{FieldWriter, Hologram, HologramReader, RawHologramReader, StandardTiffWriter, TiffHologramReader},
    reconstruction::{back_propagate, Reconstruction},
};

pub use timing::{PipelineTimings, StageTiming, Timer};

/// Files written by [`ReconstructionPipeline::reconstruct_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub amplitude: PathBuf,
    pub phase: PathBuf,
}

impl OutputPaths {
    /// `<dir>/<prefix>_amplitude.tiff` and `<dir>/<prefix>_phase.tiff`
    pub fn new(output_dir: &Path, prefix: &str) -> Self {
        Self {
            amplitude: output_dir.join(format!("{}_amplitude.tiff", prefix)),
            phase: output_dir.join(format!("{}_phase.tiff", prefix)),
        }
    }
}

pub struct ReconstructionPipeline<R: HologramReader, W: FieldWriter> {
    reader: R,
    writer: W,
    config: ReconstructionConfig,
}

impl ReconstructionPipeline<TiffHologramReader, StandardTiffWriter> {
    pub fn new(config: ReconstructionConfig) -> Self {
        Self {
            reader: TiffHologramReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl ReconstructionPipeline<RawHologramReader, StandardTiffWriter> {
    /// Pipeline for camera RAW holograms; demosaicing follows `config.debayer`.
    pub fn for_raw(config: ReconstructionConfig) -> Self {
        Self {
            reader: RawHologramReader::new(config.debayer),
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: HologramReader, W: FieldWriter> ReconstructionPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ReconstructionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, rows: usize, cols: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if rows == 0 || cols == 0 {
            return Err(ReconstructionError::InvalidDimensions(rows, cols));
        }

        if let Some(max) = self.config.max_dimension {
            if rows > max || cols > max {
                warn!("Hologram dimensions {}x{} exceed maximum {}", rows, cols, max);
                return Err(ReconstructionError::InvalidDimensions(rows, cols));
            }
        }

        Ok(())
    }

    fn validate_geometry(&self, geometry: &Geometry) -> Result<()> {
        if !self.config.validate_geometry {
            return Ok(());
        }
        geometry.validate()
    }

    /// Checks the configured preconditions, then runs the reconstruction core.
    pub fn reconstruct_hologram(&self, hologram: &Hologram, geometry: &Geometry) -> Result<Reconstruction> {
        let mut timings = PipelineTimings::new();
        self.run_core(hologram, geometry, &mut timings)
    }

    fn run_core(&self, hologram: &Hologram, geometry: &Geometry, timings: &mut PipelineTimings) -> Result<Reconstruction> {
        let timer = Timer::start("validate");
        self.validate_dimensions(hologram.rows(), hologram.cols())?;
        self.validate_geometry(geometry)?;
        timer.record(timings);

        let timer = Timer::start("propagate");
        let propagated = back_propagate(hologram.intensity.view(), geometry);
        timer.record(timings);

        let timer = Timer::start("undistort");
        let reconstruction = propagated.correct(geometry);
        timer.record(timings);

        Ok(reconstruction)
    }

    pub fn reconstruct(&self, input_data: &[u8], geometry: &Geometry) -> Result<Reconstruction> {
        let (reconstruction, _) = self.reconstruct_with_timings(input_data, geometry)?;
        Ok(reconstruction)
    }

    pub fn reconstruct_with_timings(
        &self,
        input_data: &[u8],
        geometry: &Geometry,
    ) -> Result<(Reconstruction, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        info!("Starting hologram reconstruction");

        let timer = Timer::start("decode");
        let hologram = self.reader.read_hologram(input_data)?;
        timer.record(&mut timings);

        let reconstruction = self.run_core(&hologram, geometry, &mut timings)?;

        info!(
            "Reconstruction complete: {}x{} in {:.3}ms",
            hologram.rows(),
            hologram.cols(),
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok((reconstruction, timings))
    }

    /// Encodes amplitude and phase with the configured writer.
    pub fn write_reconstruction(
        &self,
        reconstruction: &Reconstruction,
        amplitude_output: &mut dyn Write,
        phase_output: &mut dyn Write,
    ) -> Result<()> {
        {
            let _span = tracing::info_span!("encode_amplitude").entered();
            self.writer
                .write_field(reconstruction.amplitude.view(), amplitude_output, &self.config)?;
        }
        {
            let _span = tracing::info_span!("encode_phase").entered();
            self.writer
                .write_field(reconstruction.phase.view(), phase_output, &self.config)?;
        }
        Ok(())
    }

    #[instrument(skip(self, input_path, output_dir, geometry))]
    pub fn reconstruct_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        geometry: &Geometry,
        output_dir: Q,
        prefix: &str,
    ) -> Result<OutputPaths> {
        let input_path = input_path.as_ref();
        let paths = OutputPaths::new(output_dir.as_ref(), prefix);

        info!(
            input = %input_path.display(),
            amplitude = %paths.amplitude.display(),
            phase = %paths.phase.display(),
            "Reconstructing file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ReconstructionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let reconstruction = self.reconstruct(&input_data, geometry)?;

        let create = |path: &Path| {
            std::fs::File::create(path).map_err(|e| {
                ReconstructionError::OutputWriteError(format!("{}: {}", path.display(), e))
            })
        };
        let mut amplitude_file = create(&paths.amplitude)?;
        let mut phase_file = create(&paths.phase)?;

        self.write_reconstruction(&reconstruction, &mut amplitude_file, &mut phase_file)?;

        Ok(paths)
    }

    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ReconstructionConfig) {
        self.config = config;
    }
}
