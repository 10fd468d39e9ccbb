use approx::assert_abs_diff_eq;
use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;

use dlhm_reconstruct::holography::distortion::max_distortion;
use dlhm_reconstruct::holography::propagation::propagate_with;
use dlhm_reconstruct::holography::{back_propagate, reconstruct, Geometry};

const GEOMETRY: Geometry = Geometry::new(0.1, 0.05, 0.004, 650e-9);

fn gaussian(size: usize, sigma: f64) -> Array2<f64> {
    let centre = (size / 2) as f64;
    Array2::from_shape_fn((size, size), |(i, j)| {
        let r2 = (i as f64 - centre).powi(2) + (j as f64 - centre).powi(2);
        (-r2 / (2.0 * sigma * sigma)).exp()
    })
}

fn all_finite(a: ArrayView2<f64>) -> bool {
    a.iter().all(|v| v.is_finite())
}

#[test]
fn outputs_match_hologram_shape() {
    for (rows, cols) in [(32, 32), (48, 20), (17, 33)] {
        let hologram = Array2::from_shape_fn((rows, cols), |(i, j)| 1.0 + ((i * 7 + j * 3) % 5) as f64);

        let reconstruction = reconstruct(hologram.view(), &GEOMETRY);

        assert_eq!(reconstruction.amplitude.dim(), (rows, cols));
        assert_eq!(reconstruction.phase.dim(), (rows, cols));
        assert_eq!(reconstruction.reference_wave.dim(), (rows, cols));
    }
}

#[test]
fn unit_transfer_is_identity() {
    let hologram = Array2::from_shape_fn((24, 40), |(i, j)| ((i as f64) * 0.7).sin() * ((j as f64) * 0.2).cos() + 2.0);
    let ones = Array2::from_elem(hologram.dim(), Complex64::new(1.0, 0.0));

    let field = propagate_with(hologram.view(), ones.view());

    for ((i, j), value) in hologram.indexed_iter() {
        assert_abs_diff_eq!(field[[i, j]].re, *value, epsilon = 1e-10);
        assert_abs_diff_eq!(field[[i, j]].im, 0.0, epsilon = 1e-10);
    }
}

#[test]
fn phase_stays_in_principal_range() {
    let hologram = gaussian(64, 4.0);

    let reconstruction = reconstruct(hologram.view(), &GEOMETRY);

    for &phase in reconstruction.phase.iter() {
        assert!(phase > -std::f64::consts::PI && phase <= std::f64::consts::PI, "phase {}", phase);
    }
}

#[test]
fn constant_hologram_reconstructs_to_constant_field() {
    let hologram = Array2::from_elem((256, 256), 1.0);

    let propagated = back_propagate(hologram.view(), &GEOMETRY);
    let expected = Complex64::from_polar(1.0, -GEOMETRY.propagation_distance() * GEOMETRY.wavenumber());
    for value in propagated.field.iter() {
        assert_abs_diff_eq!(value.re, expected.re, epsilon = 1e-9);
        assert_abs_diff_eq!(value.im, expected.im, epsilon = 1e-9);
    }

    let reconstruction = propagated.correct(&GEOMETRY);
    assert_eq!(reconstruction.dim(), (256, 256));

    let max_d = reconstruction.max_distortion;
    assert!(max_d.is_finite() && max_d > 0.0 && max_d < 1e-3, "Max_D {}", max_d);

    // the correction moves samples by a fraction of a pixel, so only the
    // outermost ring blends with the zero border
    for i in 2..254 {
        for j in 2..254 {
            assert_abs_diff_eq!(reconstruction.amplitude[[i, j]], 1.0, epsilon = 1e-9);
        }
    }

    let centre_phase = reconstruction.phase[[128, 128]];
    assert_abs_diff_eq!(centre_phase, expected.arg(), epsilon = 1e-9);
    for &phase in reconstruction.phase.iter() {
        assert_abs_diff_eq!(phase, centre_phase, epsilon = 1e-9);
    }
}

#[test]
fn sample_close_to_camera_stays_finite() {
    let hologram = gaussian(64, 6.0) + 0.5;

    for geometry in [
        Geometry::new(0.1, 0.0999 * 0.1, 0.004, 650e-9),
        Geometry::new(0.1, 0.0999, 0.004, 650e-9),
    ] {
        assert!(geometry.validate().is_ok());

        let reconstruction = reconstruct(hologram.view(), &geometry);

        assert!(reconstruction.max_distortion.is_finite());
        assert!(all_finite(reconstruction.amplitude.view()));
        assert!(all_finite(reconstruction.phase.view()));
    }
}

#[test]
fn radially_symmetric_hologram_gives_symmetric_magnitude() {
    let size = 64;
    let hologram = gaussian(size, 5.0);

    let magnitude = back_propagate(hologram.view(), &GEOMETRY).amplitude();
    let scale = magnitude.iter().cloned().fold(0.0, f64::max);
    let centre = size / 2;

    for i in 0..size {
        for j in 0..size {
            assert_abs_diff_eq!(magnitude[[i, j]], magnitude[[j, i]], epsilon = 1e-9 * scale);
        }
    }

    for offset in 1..centre {
        for j in 0..size {
            assert_abs_diff_eq!(
                magnitude[[centre + offset, j]],
                magnitude[[centre - offset, j]],
                epsilon = 1e-9 * scale
            );
        }
    }
}

#[test]
fn distortion_grows_with_sensor_width() {
    let widths = [0.0, 0.001, 0.002, 0.004, 0.008];
    let values: Vec<f64> = widths
        .iter()
        .map(|&w| max_distortion(&Geometry::new(0.1, 0.05, w, 650e-9)))
        .collect();

    assert_eq!(values[0], 0.0);
    assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn reference_wave_is_normalized() {
    let hologram = Array2::from_elem((40, 30), 1.0);

    let reconstruction = reconstruct(hologram.view(), &GEOMETRY);
    let wave = &reconstruction.reference_wave;

    assert!(wave.iter().all(|&r| r > 0.0 && r <= 1.0));
    assert_abs_diff_eq!(wave.iter().cloned().fold(0.0, f64::max), 1.0, epsilon = 1e-15);
}

#[test]
fn into_parts_returns_amplitude_then_phase() {
    let hologram = gaussian(32, 3.0);

    let reconstruction = reconstruct(hologram.view(), &GEOMETRY);
    let (amplitude, phase) = reconstruction.clone().into_parts();

    assert_eq!(amplitude, reconstruction.amplitude);
    assert_eq!(phase, reconstruction.phase);
}

#[test]
fn zero_sample_distance_propagates_non_finite_values() {
    let hologram = Array2::from_elem((16, 16), 1.0);
    let geometry = Geometry::new(0.1, 0.0, 0.004, 650e-9);

    assert!(geometry.validate().is_err());

    let reconstruction = reconstruct(hologram.view(), &geometry);
    assert_eq!(reconstruction.dim(), (16, 16));
    assert!(!reconstruction.max_distortion.is_finite());
}
