//! Centered 2D FFT built on rustfft.
//!
//! Conventions follow numpy: the forward transform is unnormalized and the
//! inverse carries the `1 / (rows * cols)` factor, so [`ifts`] undoes [`fts`]
//! for any shape.

use ndarray::{Array2, Axis};
use num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};

/// Circularly shifts both axes so that `out[(i + s) % n] = a[i]`.
fn roll(a: &Array2<Complex64>, shift_rows: usize, shift_cols: usize) -> Array2<Complex64> {
    let (rows, cols) = a.dim();
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        a[[(i + rows - shift_rows) % rows, (j + cols - shift_cols) % cols]]
    })
}

/// Moves the zero-frequency bin from index 0 to index `n / 2`.
pub fn fftshift(a: &Array2<Complex64>) -> Array2<Complex64> {
    let (rows, cols) = a.dim();
    roll(a, rows / 2, cols / 2)
}

/// Inverse of [`fftshift`]; differs from it only for odd lengths.
pub fn ifftshift(a: &Array2<Complex64>) -> Array2<Complex64> {
    let (rows, cols) = a.dim();
    roll(a, rows - rows / 2, cols - cols / 2)
}

fn transform(data: &mut Array2<Complex64>, direction: FftDirection) {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return;
    }

    let mut planner = FftPlanner::<f64>::new();
    let plans = [
        (Axis(1), planner.plan_fft(cols, direction)),
        (Axis(0), planner.plan_fft(rows, direction)),
    ];

    let mut buffer = vec![Complex64::new(0.0, 0.0); rows.max(cols)];
    for (axis, fft) in plans {
        let len = data.len_of(axis);
        // Lanes along axis 0 are strided, so every lane goes through a
        // contiguous scratch buffer.
        for mut lane in data.lanes_mut(axis) {
            let scratch = &mut buffer[..len];
            scratch.iter_mut().zip(lane.iter()).for_each(|(dst, &src)| *dst = src);
            fft.process(scratch);
            lane.iter_mut().zip(scratch.iter()).for_each(|(dst, &src)| *dst = src);
        }
    }
}

/// Forward 2D DFT, unnormalized.
pub fn fft2(a: &Array2<Complex64>) -> Array2<Complex64> {
    let mut data = a.clone();
    transform(&mut data, FftDirection::Forward);
    data
}

/// Inverse 2D DFT, normalized by `1 / (rows * cols)`.
pub fn ifft2(a: &Array2<Complex64>) -> Array2<Complex64> {
    let mut data = a.clone();
    transform(&mut data, FftDirection::Inverse);
    let (rows, cols) = data.dim();
    let norm = 1.0 / (rows * cols) as f64;
    data.mapv_inplace(|c| c * norm);
    data
}

/// Frequency-centred forward transform, `ifftshift(fft2(fftshift(a)))`.
pub fn fts(a: &Array2<Complex64>) -> Array2<Complex64> {
    ifftshift(&fft2(&fftshift(a)))
}

/// Frequency-centred inverse transform, `ifftshift(ifft2(fftshift(a)))`.
pub fn ifts(a: &Array2<Complex64>) -> Array2<Complex64> {
    ifftshift(&ifft2(&fftshift(a)))
}
