//! Orthonormal Haar wavelet.
//!
//! One level splits a line of `n` samples into `n/2` averages followed by
//! `n/2` differences, both scaled by `1/sqrt(2)`. With odd `n` the last
//! sample is not paired and stays at index `n - 1`. Multi-level transforms
//! recurse on the top-left (low-low) quadrant, rows before columns.

use crate::buffer::TransformBuffer;
use std::f64::consts::FRAC_1_SQRT_2;

/// One forward level over `line`.
pub fn forward_1d(line: &mut [f64], scratch: &mut [f64]) {
    let n = line.len();
    let half = n / 2;
    for i in 0..half {
        let (a, b) = (line[2 * i], line[2 * i + 1]);
        scratch[i] = (a + b) * FRAC_1_SQRT_2;
        scratch[half + i] = (a - b) * FRAC_1_SQRT_2;
    }
    line[..2 * half].copy_from_slice(&scratch[..2 * half]);
}

/// One inverse level over `line`.
pub fn inverse_1d(line: &mut [f64], scratch: &mut [f64]) {
    let n = line.len();
    let half = n / 2;
    for i in 0..half {
        let (low, high) = (line[i], line[half + i]);
        scratch[2 * i] = (low + high) * FRAC_1_SQRT_2;
        scratch[2 * i + 1] = (low - high) * FRAC_1_SQRT_2;
    }
    line[..2 * half].copy_from_slice(&scratch[..2 * half]);
}

/// Region sizes `(w, h)` each level operates on, stopping once a side is
/// shorter than two samples.
pub fn level_sizes(width: usize, height: usize, levels: usize) -> Vec<(usize, usize)> {
    let mut sizes = Vec::new();
    let (mut w, mut h) = (width, height);
    while sizes.len() < levels && w >= 2 && h >= 2 {
        sizes.push((w, h));
        w /= 2;
        h /= 2;
    }
    sizes
}

fn transform_region(
    plane: &mut TransformBuffer,
    w: usize,
    h: usize,
    step: fn(&mut [f64], &mut [f64]),
    rows_first: bool,
) {
    let mut scratch = vec![0.0; w.max(h)];
    let mut column = vec![0.0; h];

    let rows = |plane: &mut TransformBuffer, scratch: &mut [f64]| {
        for y in 0..h {
            step(&mut plane.row_mut(y)[..w], scratch);
        }
    };
    let cols = |plane: &mut TransformBuffer, scratch: &mut [f64], column: &mut [f64]| {
        for x in 0..w {
            for (y, c) in column.iter_mut().enumerate() {
                *c = plane.get(x, y);
            }
            step(column, scratch);
            for (y, &v) in column.iter().enumerate() {
                plane.set(x, y, v);
            }
        }
    };

    if rows_first {
        rows(plane, &mut scratch);
        cols(plane, &mut scratch, &mut column);
    } else {
        cols(plane, &mut scratch, &mut column);
        rows(plane, &mut scratch);
    }
}

/// Forward multi-level 2-D transform in place. Returns the number of levels
/// actually applied.
pub fn forward_2d(plane: &mut TransformBuffer, levels: usize) -> usize {
    let sizes = level_sizes(plane.width(), plane.height(), levels);
    for &(w, h) in &sizes {
        transform_region(plane, w, h, forward_1d, true);
    }
    sizes.len()
}

/// Inverse of [`forward_2d`] with the same `levels`.
pub fn inverse_2d(plane: &mut TransformBuffer, levels: usize) {
    let sizes = level_sizes(plane.width(), plane.height(), levels);
    for &(w, h) in sizes.iter().rev() {
        transform_region(plane, w, h, inverse_1d, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_1d_pair() {
        let mut line = [4.0, 2.0];
        let mut scratch = [0.0; 2];
        forward_1d(&mut line, &mut scratch);
        assert!((line[0] - 6.0 * FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((line[1] - 2.0 * FRAC_1_SQRT_2).abs() < 1e-12);
        inverse_1d(&mut line, &mut scratch);
        assert!((line[0] - 4.0).abs() < 1e-12);
        assert!((line[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_odd_tail_untouched() {
        let mut line = [1.0, 3.0, 7.0];
        let mut scratch = [0.0; 3];
        forward_1d(&mut line, &mut scratch);
        assert_eq!(line[2], 7.0);
    }

    #[test]
    fn test_level_sizes() {
        assert_eq!(level_sizes(16, 8, 3), vec![(16, 8), (8, 4), (4, 2)]);
        assert_eq!(level_sizes(16, 3, 5), vec![(16, 3)]);
        assert!(level_sizes(1, 100, 2).is_empty());
    }

    #[test]
    fn test_2d_roundtrip_odd_size() {
        let data: Vec<f64> = (0..7 * 5).map(|i| ((i * 13) % 17) as f64).collect();
        let mut plane = TransformBuffer::from_vec(7, 5, data.clone()).unwrap();
        let applied = forward_2d(&mut plane, 4);
        assert_eq!(applied, 2);
        inverse_2d(&mut plane, 4);
        for (a, b) in plane.as_slice().iter().zip(&data) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_constant_energy_in_ll() {
        let mut plane = TransformBuffer::from_vec(4, 4, vec![2.0; 16]).unwrap();
        forward_2d(&mut plane, 2);
        assert!((plane.get(0, 0) - 8.0).abs() < 1e-9);
        let rest: f64 = plane.as_slice()[1..].iter().map(|v| v.abs()).sum();
        assert!(rest < 1e-9);
    }
}
