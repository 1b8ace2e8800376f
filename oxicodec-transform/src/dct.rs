//! Discrete cosine transform.
//!
//! The unnormalized pair follows the usual real-to-real conventions:
//!
//! - forward (DCT-II): `X[k] = 2 * sum x[n] * cos(pi*k*(2n+1) / 2N)`
//! - inverse (DCT-III): `y[n] = X[0] + 2 * sum_{k>=1} X[k] * cos(pi*k*(2n+1) / 2N)`
//!
//! so `inverse(forward(x)) = 2N * x` in one dimension and `4*W*H * x` over
//! a plane. The orthonormal variants rescale the coefficients so the round
//! trip is the identity; block codecs use those.
//!
//! Short lines (block codecs) use a cosine table. Longer lines reorder the
//! samples so one complex FFT of the same length yields the DCT, keeping
//! whole-frame transforms at `O(N log N)` per line.

use crate::buffer::TransformBuffer;
use crate::dft::{Complex, Direction, FftPlan};
use std::f64::consts::PI;

/// Lengths up to this use a cosine table; longer lines go through an FFT
/// of the same length.
const DIRECT_MAX_LEN: usize = 32;

#[derive(Debug, Clone)]
enum Strategy {
    /// `table[k * len + n] = cos(pi*k*(2n+1) / 2N)`
    Direct(Vec<f64>),
    /// Even samples ascending then odd samples descending, one complex FFT,
    /// then a rotation by `e^(-i*pi*k / 2N)`.
    Fft {
        fft: FftPlan,
        rotation: Vec<Complex>,
    },
}

/// Transform plan for one length.
#[derive(Debug, Clone)]
pub struct DctPlan {
    len: usize,
    strategy: Strategy,
}

impl DctPlan {
    /// Build the plan for length `len`.
    pub fn new(len: usize) -> Self {
        let strategy = if len <= DIRECT_MAX_LEN {
            let mut table = Vec::with_capacity(len * len);
            for k in 0..len {
                for n in 0..len {
                    table.push((PI * k as f64 * (2 * n + 1) as f64 / (2 * len) as f64).cos());
                }
            }
            Strategy::Direct(table)
        } else {
            let rotation = (0..len)
                .map(|k| Complex::from_angle(-PI * k as f64 / (2 * len) as f64))
                .collect();
            Strategy::Fft {
                fft: FftPlan::new(len),
                rotation,
            }
        };
        Self { len, strategy }
    }

    /// Transform length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the plan is for length zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot of sample `n` in the reordered FFT line.
    fn reordered(&self, n: usize) -> usize {
        if n % 2 == 0 {
            n / 2
        } else {
            self.len - 1 - n / 2
        }
    }

    /// Unnormalized DCT-II of `input` into `output`.
    pub fn forward(&self, input: &[f64], output: &mut [f64]) {
        match &self.strategy {
            Strategy::Direct(table) => {
                for (k, out) in output.iter_mut().enumerate().take(self.len) {
                    let basis = &table[k * self.len..(k + 1) * self.len];
                    let sum: f64 = input.iter().zip(basis).map(|(x, c)| x * c).sum();
                    *out = 2.0 * sum;
                }
            }
            Strategy::Fft { fft, rotation } => {
                let mut line = vec![Complex::default(); self.len];
                for (n, &x) in input.iter().enumerate().take(self.len) {
                    line[self.reordered(n)] = Complex::new(x, 0.0);
                }
                fft.process(&mut line, Direction::Forward);
                for ((out, &v), &r) in output.iter_mut().zip(&line).zip(rotation) {
                    *out = 2.0 * (v * r).re;
                }
            }
        }
    }

    /// Unnormalized DCT-III of `input` into `output`.
    pub fn inverse(&self, input: &[f64], output: &mut [f64]) {
        match &self.strategy {
            Strategy::Direct(table) => {
                for (n, out) in output.iter_mut().enumerate().take(self.len) {
                    let mut sum = 0.0;
                    for k in 1..self.len {
                        sum += input[k] * table[k * self.len + n];
                    }
                    *out = input[0] + 2.0 * sum;
                }
            }
            Strategy::Fft { fft, rotation } => {
                let mut line: Vec<Complex> = input
                    .iter()
                    .zip(rotation)
                    .enumerate()
                    .map(|(k, (&x, r))| {
                        let weight = if k == 0 { x } else { 2.0 * x };
                        r.conj().scale(weight)
                    })
                    .collect();
                fft.process(&mut line, Direction::Backward);
                for (n, out) in output.iter_mut().enumerate().take(self.len) {
                    *out = line[self.reordered(n)].re;
                }
            }
        }
    }
}

/// Separable 2-D DCT over planes of a fixed size.
#[derive(Debug, Clone)]
pub struct Dct2d {
    rows: DctPlan,
    /// `None` when the plane is square and the row plan is reused.
    cols: Option<DctPlan>,
}

impl Dct2d {
    /// Plan for `width x height` planes.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rows: DctPlan::new(width),
            cols: (width != height).then(|| DctPlan::new(height)),
        }
    }

    fn col_plan(&self) -> &DctPlan {
        self.cols.as_ref().unwrap_or(&self.rows)
    }

    fn apply(&self, plane: &mut TransformBuffer, inverse: bool) {
        let (width, height) = (plane.width(), plane.height());
        let mut scratch = vec![0.0; width.max(height)];

        for y in 0..height {
            let row = plane.row_mut(y);
            if inverse {
                self.rows.inverse(row, &mut scratch[..width]);
            } else {
                self.rows.forward(row, &mut scratch[..width]);
            }
            row.copy_from_slice(&scratch[..width]);
        }

        let cols = self.col_plan();
        let mut column = vec![0.0; height];
        for x in 0..width {
            for (y, c) in column.iter_mut().enumerate() {
                *c = plane.get(x, y);
            }
            if inverse {
                cols.inverse(&column, &mut scratch[..height]);
            } else {
                cols.forward(&column, &mut scratch[..height]);
            }
            for (y, &v) in scratch[..height].iter().enumerate() {
                plane.set(x, y, v);
            }
        }
    }

    /// Unnormalized forward transform in place.
    pub fn forward(&self, plane: &mut TransformBuffer) {
        self.apply(plane, false);
    }

    /// Unnormalized inverse transform in place (result scaled by `4*W*H`).
    pub fn inverse(&self, plane: &mut TransformBuffer) {
        self.apply(plane, true);
    }

    /// Orthonormal forward transform in place.
    pub fn forward_orthonormal(&self, plane: &mut TransformBuffer) {
        self.forward(plane);
        scale_plane(plane, forward_scale);
    }

    /// Orthonormal inverse transform in place.
    pub fn inverse_orthonormal(&self, plane: &mut TransformBuffer) {
        scale_plane(plane, inverse_scale);
        self.inverse(plane);
    }
}

fn forward_scale(k: usize, n: usize) -> f64 {
    if k == 0 {
        (1.0 / (4 * n) as f64).sqrt()
    } else {
        (1.0 / (2 * n) as f64).sqrt()
    }
}

fn inverse_scale(k: usize, n: usize) -> f64 {
    if k == 0 {
        (1.0 / n as f64).sqrt()
    } else {
        (1.0 / (2 * n) as f64).sqrt()
    }
}

fn scale_plane(plane: &mut TransformBuffer, factor: fn(usize, usize) -> f64) {
    let (width, height) = (plane.width(), plane.height());
    for v in 0..height {
        let fv = factor(v, height);
        for u in 0..width {
            let value = plane.get(u, v) * fv * factor(u, width);
            plane.set(u, v, value);
        }
    }
}

/// Unnormalized 2-D forward DCT in place.
pub fn forward_2d(plane: &mut TransformBuffer) {
    Dct2d::new(plane.width(), plane.height()).forward(plane);
}

/// Unnormalized 2-D inverse DCT in place.
pub fn inverse_2d(plane: &mut TransformBuffer) {
    Dct2d::new(plane.width(), plane.height()).inverse(plane);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64], tol: f64) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < tol, "{x} vs {y}");
        }
    }

    #[test]
    fn test_1d_dc() {
        let plan = DctPlan::new(4);
        let mut out = [0.0; 4];
        plan.forward(&[1.0, 1.0, 1.0, 1.0], &mut out);
        assert_close(&out, &[8.0, 0.0, 0.0, 0.0], 1e-9);
    }

    #[test]
    fn test_1d_roundtrip_scale() {
        let plan = DctPlan::new(5);
        let input = [3.0, -1.0, 4.0, 1.0, -5.0];
        let mut coeffs = [0.0; 5];
        let mut back = [0.0; 5];
        plan.forward(&input, &mut coeffs);
        plan.inverse(&coeffs, &mut back);
        let scaled: Vec<f64> = input.iter().map(|v| v * 10.0).collect();
        assert_close(&back, &scaled, 1e-9);
    }

    fn naive_forward(input: &[f64]) -> Vec<f64> {
        let n = input.len();
        (0..n)
            .map(|k| {
                2.0 * input
                    .iter()
                    .enumerate()
                    .map(|(i, x)| x * (PI * k as f64 * (2 * i + 1) as f64 / (2 * n) as f64).cos())
                    .sum::<f64>()
            })
            .collect()
    }

    #[test]
    fn test_fft_path_matches_cosine_sum() {
        for len in [33, 45, 64, 97, 128] {
            let plan = DctPlan::new(len);
            assert!(matches!(plan.strategy, Strategy::Fft { .. }));
            let input: Vec<f64> = (0..len).map(|i| ((i * 29) % 61) as f64 - 30.0).collect();

            let mut coeffs = vec![0.0; len];
            plan.forward(&input, &mut coeffs);
            assert_close(&coeffs, &naive_forward(&input), 1e-7);

            let mut back = vec![0.0; len];
            plan.inverse(&coeffs, &mut back);
            let scaled: Vec<f64> = input.iter().map(|v| v * 2.0 * len as f64).collect();
            assert_close(&back, &scaled, 1e-6);
        }
    }

    #[test]
    fn test_large_plane_roundtrip_scale() {
        let (width, height) = (300, 41);
        let data: Vec<f64> = (0..width * height).map(|i| ((i * 7) % 255) as f64 - 128.0).collect();
        let mut plane = TransformBuffer::from_vec(width, height, data.clone()).unwrap();
        forward_2d(&mut plane);
        inverse_2d(&mut plane);
        let norm = 4.0 * (width * height) as f64;
        for (a, b) in plane.as_slice().iter().zip(&data) {
            assert!((a / norm - b).abs() < 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn test_2d_roundtrip_scale() {
        let data: Vec<f64> = (0..12).map(|i| (i * i % 7) as f64 - 3.0).collect();
        let mut plane = TransformBuffer::from_vec(4, 3, data.clone()).unwrap();
        forward_2d(&mut plane);
        inverse_2d(&mut plane);
        let scaled: Vec<f64> = data.iter().map(|v| v * 4.0 * 4.0 * 3.0).collect();
        assert_close(plane.as_slice(), &scaled, 1e-8);
    }

    #[test]
    fn test_orthonormal_roundtrip_and_energy() {
        let data: Vec<f64> = (0..64).map(|i| ((i * 37) % 255) as f64 - 128.0).collect();
        let mut plane = TransformBuffer::from_vec(8, 8, data.clone()).unwrap();
        let dct = Dct2d::new(8, 8);

        dct.forward_orthonormal(&mut plane);
        let energy_in: f64 = data.iter().map(|v| v * v).sum();
        let energy_out: f64 = plane.as_slice().iter().map(|v| v * v).sum();
        assert!((energy_in - energy_out).abs() < 1e-6 * energy_in);

        dct.inverse_orthonormal(&mut plane);
        assert_close(plane.as_slice(), &data, 1e-9);
    }

    #[test]
    fn test_orthonormal_dc_value() {
        let mut plane = TransformBuffer::from_vec(8, 8, vec![10.0; 64]).unwrap();
        Dct2d::new(8, 8).forward_orthonormal(&mut plane);
        assert!((plane.get(0, 0) - 80.0).abs() < 1e-9);
        assert!(plane.as_slice()[1..].iter().all(|v| v.abs() < 1e-9));
    }
}
