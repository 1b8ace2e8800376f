//! Two-dimensional complex discrete Fourier transform.
//!
//! Both directions are unnormalized: a forward/backward round trip scales
//! every sample by `W*H`. Rows and columns go through [`FftPlan`], so a
//! whole frame costs `O(W*H*log(W*H))` for any dimensions.

use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

/// A complex number in rectangular form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// Create from parts.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// `e^(i*theta)`.
    pub fn from_angle(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    /// Magnitude.
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Complex conjugate.
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Multiply both parts by a real factor.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Kernel `e^(-2*pi*i*k*n/N)`.
    Forward,
    /// Kernel `e^(+2*pi*i*k*n/N)`.
    Backward,
}

/// `e^(-2*pi*i*j/n)` for `j < n/2`.
fn radix2_twiddles(n: usize) -> Vec<Complex> {
    (0..n / 2)
        .map(|j| Complex::from_angle(-2.0 * PI * j as f64 / n as f64))
        .collect()
}

/// In-place iterative radix-2 forward transform. `data.len()` must be a
/// power of two and `twiddle` its [`radix2_twiddles`].
fn radix2_forward(data: &mut [Complex], twiddle: &[Complex]) {
    let n = data.len();
    if n <= 1 {
        return;
    }

    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            data.swap(i, j);
        }
    }

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let stride = n / size;
        for start in (0..n).step_by(size) {
            for j in 0..half {
                let w = twiddle[j * stride];
                let a = data[start + j];
                let b = data[start + j + half] * w;
                data[start + j] = a + b;
                data[start + j + half] = a - b;
            }
        }
        size *= 2;
    }
}

#[derive(Debug, Clone)]
enum FftKind {
    Radix2 {
        twiddle: Vec<Complex>,
    },
    /// Chirp-z through a zero-padded power-of-two transform.
    Bluestein {
        /// `e^(-i*pi*j^2/n)`
        chirp: Vec<Complex>,
        /// Forward transform of the conjugate chirp, wrapped around the
        /// padded length.
        kernel: Vec<Complex>,
        twiddle: Vec<Complex>,
    },
}

/// Fast Fourier transform of one length.
///
/// Power-of-two lengths run radix-2 directly; any other length uses
/// Bluestein's identity `jk = (j^2 + k^2 - (k-j)^2) / 2`, turning the
/// transform into a convolution of length at least `2n - 1`. Every length
/// costs `O(n log n)`.
#[derive(Debug, Clone)]
pub(crate) struct FftPlan {
    len: usize,
    kind: FftKind,
}

impl FftPlan {
    pub(crate) fn new(len: usize) -> Self {
        if len <= 1 || len.is_power_of_two() {
            return Self {
                len,
                kind: FftKind::Radix2 {
                    twiddle: radix2_twiddles(len),
                },
            };
        }

        let padded = (2 * len - 1).next_power_of_two();
        let twiddle = radix2_twiddles(padded);
        // j^2 mod 2n keeps the phase small for long transforms.
        let modulus = 2 * len as u128;
        let chirp: Vec<Complex> = (0..len)
            .map(|j| {
                let phase = (j as u128 * j as u128 % modulus) as f64;
                Complex::from_angle(-PI * phase / len as f64)
            })
            .collect();

        let mut kernel = vec![Complex::default(); padded];
        for (j, &c) in chirp.iter().enumerate() {
            kernel[j] = c.conj();
            if j > 0 {
                kernel[padded - j] = c.conj();
            }
        }
        radix2_forward(&mut kernel, &twiddle);

        Self {
            len,
            kind: FftKind::Bluestein {
                chirp,
                kernel,
                twiddle,
            },
        }
    }

    /// Transform `data` (exactly the plan length) in place, unnormalized.
    pub(crate) fn process(&self, data: &mut [Complex], direction: Direction) {
        debug_assert_eq!(data.len(), self.len);
        // backward(x) = conj(forward(conj(x)))
        if direction == Direction::Backward {
            data.iter_mut().for_each(|c| *c = c.conj());
        }
        self.forward(data);
        if direction == Direction::Backward {
            data.iter_mut().for_each(|c| *c = c.conj());
        }
    }

    fn forward(&self, data: &mut [Complex]) {
        match &self.kind {
            FftKind::Radix2 { twiddle } => radix2_forward(data, twiddle),
            FftKind::Bluestein {
                chirp,
                kernel,
                twiddle,
            } => {
                let padded = kernel.len();
                let mut work = vec![Complex::default(); padded];
                for ((w, &x), &c) in work.iter_mut().zip(data.iter()).zip(chirp) {
                    *w = x * c;
                }
                radix2_forward(&mut work, twiddle);
                for (w, &k) in work.iter_mut().zip(kernel) {
                    *w = (*w * k).conj();
                }
                radix2_forward(&mut work, twiddle);

                let norm = 1.0 / padded as f64;
                for ((x, &w), &c) in data.iter_mut().zip(&work).zip(chirp) {
                    *x = w.conj().scale(norm) * c;
                }
            }
        }
    }
}

/// Transform a row-major `width x height` grid in place.
pub fn dft_2d(data: &mut [Complex], width: usize, height: usize, direction: Direction) {
    debug_assert_eq!(data.len(), width * height);
    if width == 0 || height == 0 {
        return;
    }
    let rows = FftPlan::new(width);
    let cols = FftPlan::new(height);

    for row in data.chunks_exact_mut(width).take(height) {
        rows.process(row, direction);
    }

    let mut column = vec![Complex::default(); height];
    for x in 0..width {
        for (y, c) in column.iter_mut().enumerate() {
            *c = data[y * width + x];
        }
        cols.process(&mut column, direction);
        for (y, &v) in column.iter().enumerate() {
            data[y * width + x] = v;
        }
    }
}

/// Move the zero-frequency sample from `(0, 0)` to `(width/2, height/2)`.
pub fn fft_shift<T: Copy>(data: &mut [T], width: usize, height: usize) {
    let shifted: Vec<T> = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            let sx = (x + width - width / 2) % width;
            let sy = (y + height - height / 2) % height;
            data[sy * width + sx]
        })
        .collect();
    data.copy_from_slice(&shifted);
}
