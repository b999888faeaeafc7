//! Shared helpers for the integration tests.

#![allow(dead_code)]

use arvak_bch::Operator;
use ndarray::Array2;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeds used for the random-matrix comparisons.
pub const SEEDS: [u64; 5] = [13579, 34628, 2888, 11111, 67917];

/// Side length of the random test matrices.
pub const DIM: usize = 6;

/// Uniform [0, 1) real matrices `x` and `y` from one seed.
pub fn random_pair(seed: u64, dim: usize) -> (Array2<f64>, Array2<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = Array2::from_shape_fn((dim, dim), |_| rng.gen_range(0.0..1.0));
    let y = Array2::from_shape_fn((dim, dim), |_| rng.gen_range(0.0..1.0));
    (x, y)
}

/// Complex matrices with real and imaginary parts uniform in [-1, 1).
pub fn random_complex_pair(seed: u64, dim: usize) -> (Array2<Complex64>, Array2<Complex64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sample = move |_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
    let x = Array2::from_shape_fn((dim, dim), &mut sample);
    let y = Array2::from_shape_fn((dim, dim), &mut sample);
    (x, y)
}

/// Frobenius norm of a real matrix.
pub fn norm(a: &Array2<f64>) -> f64 {
    a.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Frobenius norm of a complex matrix.
pub fn complex_norm(a: &Array2<Complex64>) -> f64 {
    a.iter().map(|v| v.norm_sqr()).sum::<f64>().sqrt()
}

/// True if `‖a − b‖_F ≤ tol · (1 + ‖b‖_F)`.
pub fn close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) -> bool {
    norm(&(a - b)) <= tol * (1.0 + norm(b))
}

/// Complex counterpart of [`close`].
pub fn complex_close(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) -> bool {
    complex_norm(&(a - b)) <= tol * (1.0 + complex_norm(b))
}

/// Term-by-term BCH evaluation with every commutator spelled out.
///
/// Shares no intermediate values with the library's cascade, and brackets
/// are built from raw products rather than the library's commutator.
pub fn baseline<T: Operator>(x: &T, y: &T, order: u8) -> T {
    let c = |a: &T, b: &T| a.compose(b).minus(&b.compose(a));

    let mut z = x.plus(y);
    if order > 0 {
        z = z.plus(&c(x, y).divide(2.0));
    }
    if order > 1 {
        z = z.plus(&c(x, &c(x, y)).divide(12.0));
        z = z.plus(&c(y, &c(y, x)).divide(12.0));
    }
    if order > 2 {
        z = z.minus(&c(y, &c(x, &c(x, y))).divide(24.0));
    }
    if order > 3 {
        z = z.minus(&c(y, &c(y, &c(y, &c(y, x)))).divide(720.0));
        z = z.minus(&c(x, &c(x, &c(x, &c(x, y)))).divide(720.0));
        z = z.plus(&c(x, &c(y, &c(y, &c(y, x)))).divide(360.0));
        z = z.plus(&c(y, &c(x, &c(x, &c(x, y)))).divide(360.0));
        z = z.plus(&c(y, &c(x, &c(y, &c(x, y)))).divide(120.0));
        z = z.plus(&c(x, &c(y, &c(x, &c(y, x)))).divide(120.0));
    }
    z
}

/// The order-`k` increment of [`baseline`].
pub fn baseline_increment<T: Operator>(x: &T, y: &T, k: u8) -> T {
    if k == 0 {
        baseline(x, y, 0)
    } else {
        baseline(x, y, k).minus(&baseline(x, y, k - 1))
    }
}
