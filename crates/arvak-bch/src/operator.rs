//! The operator capability trait.
//!
//! An [`Operator`] is anything closed under addition, subtraction, scaling by
//! a real number and a (generally non-commutative) product. Every method
//! borrows its operands and returns a fresh value, so the expander never
//! mutates its inputs.
//!
//! Implementations are provided for:
//!
//! - `f64` and [`Complex64`] — commutative scalars, every commutator is zero
//! - [`Array2<f64>`] and [`Array2<Complex64>`] — dense square matrices
//! - [`PauliSum`](crate::pauli::PauliSum) — symbolic sums of Pauli strings

use std::ops::{Div, Mul};

use ndarray::{Array2, LinalgScalar};
use num_complex::Complex64;

use crate::error::{BchError, BchResult};

/// Algebraic operations required by [`commutator`](crate::commutator::commutator)
/// and [`bch_expand`](crate::bch::bch_expand).
pub trait Operator: Sized {
    /// Short name of the operator kind, used in logs and error messages.
    const KIND: &'static str;

    /// `self + other`.
    fn plus(&self, other: &Self) -> Self;

    /// `self - other`.
    fn minus(&self, other: &Self) -> Self;

    /// Operator product `self · other`.
    fn compose(&self, other: &Self) -> Self;

    /// `factor · self`.
    fn scale(&self, factor: f64) -> Self;

    /// `self / divisor`.
    ///
    /// Defaults to scaling by the reciprocal; floating-point types override
    /// this with a true division.
    fn divide(&self, divisor: f64) -> Self {
        self.scale(divisor.recip())
    }

    /// Commutator `self·other − other·self`.
    ///
    /// Types that know which pairs commute can skip the two full products.
    fn bracket(&self, other: &Self) -> Self {
        self.compose(other).minus(&other.compose(self))
    }

    /// `-self`.
    fn negated(&self) -> Self {
        self.scale(-1.0)
    }

    /// Check that `self` and `other` can be combined.
    ///
    /// Types whose values always combine (scalars, symbolic sums) keep the
    /// default.
    fn check_compatible(&self, _other: &Self) -> BchResult<()> {
        Ok(())
    }
}

impl Operator for f64 {
    const KIND: &'static str = "scalar";

    fn plus(&self, other: &Self) -> Self {
        *self + *other
    }

    fn minus(&self, other: &Self) -> Self {
        *self - *other
    }

    fn compose(&self, other: &Self) -> Self {
        *self * *other
    }

    fn scale(&self, factor: f64) -> Self {
        *self * factor
    }

    fn divide(&self, divisor: f64) -> Self {
        *self / divisor
    }

    fn negated(&self) -> Self {
        -*self
    }
}

impl Operator for Complex64 {
    const KIND: &'static str = "complex_scalar";

    fn plus(&self, other: &Self) -> Self {
        *self + *other
    }

    fn minus(&self, other: &Self) -> Self {
        *self - *other
    }

    fn compose(&self, other: &Self) -> Self {
        *self * *other
    }

    fn scale(&self, factor: f64) -> Self {
        *self * factor
    }

    fn divide(&self, divisor: f64) -> Self {
        *self / divisor
    }

    fn negated(&self) -> Self {
        -*self
    }
}

impl<A> Operator for Array2<A>
where
    A: LinalgScalar + Mul<f64, Output = A> + Div<f64, Output = A>,
{
    const KIND: &'static str = "matrix";

    fn plus(&self, other: &Self) -> Self {
        self + other
    }

    fn minus(&self, other: &Self) -> Self {
        self - other
    }

    fn compose(&self, other: &Self) -> Self {
        self.dot(other)
    }

    fn scale(&self, factor: f64) -> Self {
        self.mapv(|v| v * factor)
    }

    fn divide(&self, divisor: f64) -> Self {
        self.mapv(|v| v / divisor)
    }

    /// Both operands must be square and share one shape; ndarray would
    /// otherwise broadcast or panic inside the arithmetic.
    fn check_compatible(&self, other: &Self) -> BchResult<()> {
        let x = self.dim();
        let y = other.dim();
        if x != y || x.0 != x.1 {
            return Err(BchError::ShapeMismatch { x, y });
        }
        Ok(())
    }
}
