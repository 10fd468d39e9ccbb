use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dlhm_reconstruct::holography::{
    reconstruct, Geometry, OutputEncoding, ReconstructionConfig, ReconstructionPipeline, StandardTiffWriter,
    TiffCompression, FieldWriter,
};
use dlhm_reconstruct::holography::propagation::fft::{fts, ifts};
use ndarray::Array2;
use num_complex::Complex64;

const GEOMETRY: Geometry = Geometry::new(0.1, 0.05, 0.004, 650e-9);

/// Concentric fringes around the centre, roughly what a point scatterer records.
fn generate_mock_hologram(size: usize) -> Array2<f64> {
    let centre = size as f64 / 2.0;
    Array2::from_shape_fn((size, size), |(i, j)| {
        let r2 = (i as f64 - centre).powi(2) + (j as f64 - centre).powi(2);
        1.0 + 0.5 * (r2 / size as f64).cos()
    })
}

fn benchmark_reconstruction_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction_by_size");

    for size in [128usize, 256, 512] {
        let hologram = generate_mock_hologram(size);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &hologram,
            |b, hologram| {
                b.iter(|| reconstruct(black_box(hologram.view()), &GEOMETRY));
            },
        );
    }

    group.finish();
}

fn benchmark_spectral_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectral_transforms");
    let field = generate_mock_hologram(512).mapv(|v| Complex64::new(v, 0.0));

    group.bench_function("fts_512", |b| b.iter(|| fts(black_box(&field))));
    group.bench_function("fts_ifts_512", |b| b.iter(|| ifts(&fts(black_box(&field)))));

    group.finish();
}

fn benchmark_output_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_encoding");
    let reconstruction = reconstruct(generate_mock_hologram(256).view(), &GEOMETRY);

    let encodings = [
        (OutputEncoding::Float32, TiffCompression::None, "float32"),
        (OutputEncoding::Normalized16, TiffCompression::None, "normalized16"),
        (OutputEncoding::Float32, TiffCompression::Lzw, "float32_lzw"),
        (OutputEncoding::Normalized16, TiffCompression::DeflateBalanced, "normalized16_deflate"),
    ];

    for (encoding, compression, label) in encodings {
        let config = ReconstructionConfig::builder()
            .output(encoding)
            .compression(compression)
            .build();

        group.bench_function(label, |b| {
            b.iter(|| {
                let mut output = Vec::new();
                let _ = StandardTiffWriter.write_field(black_box(reconstruction.amplitude.view()), &mut output, &config);
            });
        });
    }

    group.finish();
}

fn benchmark_validation_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation_overhead");
    let hologram = dlhm_reconstruct::holography::Hologram::new(generate_mock_hologram(256), 16);

    for (validate, label) in [(true, "with_validation"), (false, "without_validation")] {
        let config = ReconstructionConfig::builder()
            .validate_geometry(validate)
            .validate_dimensions(validate)
            .build();
        let pipeline = ReconstructionPipeline::new(config);

        group.bench_function(label, |b| {
            b.iter(|| {
                let _ = pipeline.reconstruct_hologram(black_box(&hologram), &GEOMETRY);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_reconstruction_sizes,
    benchmark_spectral_transforms,
    benchmark_output_encodings,
    benchmark_validation_overhead
);
criterion_main!(benches);
