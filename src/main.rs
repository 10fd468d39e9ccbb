use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};

use dlhm_reconstruct::holography::{
    FieldWriter, Geometry, HologramReader, OutputEncoding, OutputPaths, ReconstructionConfig,
    ReconstructionPipeline, TiffCompression,
};
use dlhm_reconstruct::holography::pipeline::Timer;
use dlhm_reconstruct::logger;

use tracing::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::DeflateBalanced => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EncodingArg {
    /// 32-bit float samples
    Float32,
    /// min-max scaled 16-bit samples
    Normalized16,
}

impl From<EncodingArg> for OutputEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Float32 => OutputEncoding::Float32,
            EncodingArg::Normalized16 => OutputEncoding::Normalized16,
        }
    }
}

/// Reconstruct amplitude and phase from a point-source DLHM hologram
#[derive(Debug, Parser)]
#[command(name = "dlhm", version, about)]
struct Cli {
    /// Hologram to reconstruct (TIFF, or a camera RAW file)
    input: PathBuf,

    /// Directory the amplitude and phase TIFFs are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// File name prefix for the outputs (defaults to the input file stem)
    #[arg(short, long)]
    prefix: Option<String>,

    /// Source to camera distance L, in meters
    #[arg(short = 'L', long)]
    source_to_camera: f64,

    /// Source to sample distance z, in meters
    #[arg(short = 'z', long)]
    source_to_sample: f64,

    /// Physical sensor width W_c, in meters
    #[arg(short = 'w', long)]
    sensor_width: f64,

    /// Illumination wavelength, in meters
    #[arg(short = 'l', long)]
    wavelength: f64,

    #[arg(long, value_enum, default_value = "none")]
    compression: CompressionArg,

    #[arg(long, value_enum, default_value = "float32")]
    encoding: EncodingArg,

    /// Demosaic RAW input to luminance instead of reading the bare mosaic
    #[arg(long)]
    debayer: bool,

    /// Skip geometry and dimension checks
    #[arg(long)]
    no_validate: bool,

    /// Print per-stage timings when done
    #[arg(long)]
    timings: bool,

    /// Debug logging with span timings (RUST_LOG still wins)
    #[arg(short, long)]
    verbose: bool,
}

fn is_tiff(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"))
        .unwrap_or(false)
}

fn run<R: HologramReader, W: FieldWriter>(
    pipeline: &ReconstructionPipeline<R, W>,
    cli: &Cli,
    geometry: &Geometry,
    prefix: &str,
) -> anyhow::Result<OutputPaths> {
    if !cli.timings {
        return Ok(pipeline.reconstruct_file(&cli.input, geometry, &cli.output_dir, prefix)?);
    }

    let input_data = std::fs::read(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let (reconstruction, mut timings) = pipeline.reconstruct_with_timings(&input_data, geometry)?;

    let paths = OutputPaths::new(&cli.output_dir, prefix);
    let timer = Timer::start("encode");
    let mut amplitude_file = File::create(&paths.amplitude)
        .with_context(|| format!("creating {}", paths.amplitude.display()))?;
    let mut phase_file = File::create(&paths.phase)
        .with_context(|| format!("creating {}", paths.phase.display()))?;
    pipeline.write_reconstruction(&reconstruction, &mut amplitude_file, &mut phase_file)?;
    timer.record(&mut timings);

    println!("{}", timings.summary());
    Ok(paths)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_with_default(if cli.verbose { "debug" } else { logger::DEFAULT_FILTER });

    info!("Starting dlhm reconstruction...");

    let geometry = Geometry::builder()
        .source_to_camera(cli.source_to_camera)
        .source_to_sample(cli.source_to_sample)
        .sensor_width(cli.sensor_width)
        .wavelength(cli.wavelength)
        .build()?;

    let config = ReconstructionConfig::builder()
        .compression(cli.compression.into())
        .output(cli.encoding.into())
        .debayer(cli.debayer)
        .validate_geometry(!cli.no_validate)
        .validate_dimensions(!cli.no_validate)
        .build();

    info!("Compression: {:?}", config.compression);
    info!("Output encoding: {:?}", config.output);

    let prefix = match &cli.prefix {
        Some(prefix) => prefix.clone(),
        None => cli
            .input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("hologram")
            .to_string(),
    };

    let result = if is_tiff(&cli.input) {
        run(&ReconstructionPipeline::new(config), &cli, &geometry, &prefix)
    } else {
        info!("Debayering: {}", if config.debayer { "enabled" } else { "disabled" });
        run(&ReconstructionPipeline::for_raw(config), &cli, &geometry, &prefix)
    };

    match result {
        Ok(paths) => {
            info!(
                amplitude = %paths.amplitude.display(),
                phase = %paths.phase.display(),
                "Reconstruction successful!"
            );
            Ok(())
        }
        Err(e) => {
            error!("Reconstruction failed: {:#}", e);
            Err(e)
        }
    }
}
