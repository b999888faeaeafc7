//! Dynamically-typed BCH requests.
//!
//! [`bch_expand`](crate::bch::bch_expand) is generic, so the compiler already
//! guarantees that `x` and `y` share a type. Operators that arrive as data
//! (JSON documents, Python bindings) carry their kind at runtime instead;
//! [`AnyOperator`] and [`bch_expand_any`] check it explicitly:
//!
//! 1. `x` and `y` are the same kind, else [`BchError::TypeMismatch`]
//! 2. the order is a non-negative JSON integer, else [`BchError::InvalidOrder`]
//! 3. the order is at most 4, else [`BchError::UnsupportedOrder`]
//! 4. dense operands share one square shape, else [`BchError::ShapeMismatch`]
//!
//! # Example
//!
//! ```rust
//! use arvak_bch::request::BchRequest;
//!
//! let request = BchRequest::from_json(r#"{
//!     "x": {"kind": "matrix", "value": [[0.0, 1.0], [0.0, 0.0]]},
//!     "y": {"kind": "matrix", "value": [[0.0, 0.0], [1.0, 0.0]]},
//!     "order": 3
//! }"#).unwrap();
//! let z = request.expand().unwrap();
//! assert_eq!(z.kind(), "matrix");
//! ```

use ndarray::Array2;
use num_complex::Complex64;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::bch::bch_expand;
use crate::error::{BchError, BchResult};
use crate::operator::Operator;
use crate::order::Order;
use crate::pauli::PauliSum;

/// An operator whose concrete type is known only at runtime.
///
/// Encoded as `{"kind": ..., "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireOperator", into = "WireOperator")]
pub enum AnyOperator {
    /// A real scalar.
    Scalar(f64),
    /// A complex scalar, serialised as `[re, im]`.
    ComplexScalar(Complex64),
    /// A dense real matrix, serialised as a list of rows.
    Matrix(Array2<f64>),
    /// A dense complex matrix, serialised as a list of rows of `[re, im]`.
    ComplexMatrix(Array2<Complex64>),
    /// A symbolic sum of Pauli strings.
    PauliSum(PauliSum),
}

impl AnyOperator {
    /// Name of the operator kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyOperator::Scalar(_) => f64::KIND,
            AnyOperator::ComplexScalar(_) => Complex64::KIND,
            AnyOperator::Matrix(_) => "matrix",
            AnyOperator::ComplexMatrix(_) => "complex_matrix",
            AnyOperator::PauliSum(_) => PauliSum::KIND,
        }
    }
}

impl From<f64> for AnyOperator {
    fn from(value: f64) -> Self {
        AnyOperator::Scalar(value)
    }
}

impl From<Complex64> for AnyOperator {
    fn from(value: Complex64) -> Self {
        AnyOperator::ComplexScalar(value)
    }
}

impl From<Array2<f64>> for AnyOperator {
    fn from(value: Array2<f64>) -> Self {
        AnyOperator::Matrix(value)
    }
}

impl From<Array2<Complex64>> for AnyOperator {
    fn from(value: Array2<Complex64>) -> Self {
        AnyOperator::ComplexMatrix(value)
    }
}

impl From<PauliSum> for AnyOperator {
    fn from(value: PauliSum) -> Self {
        AnyOperator::PauliSum(value)
    }
}

/// BCH expansion of runtime-typed operators with a raw JSON order.
pub fn bch_expand_any(x: &AnyOperator, y: &AnyOperator, order: &Value) -> BchResult<AnyOperator> {
    if x.kind() != y.kind() {
        return Err(BchError::TypeMismatch {
            x: x.kind(),
            y: y.kind(),
        });
    }
    let order = Order::try_from(order)?;
    debug!(kind = x.kind(), %order, "dispatching dynamic BCH request");

    match (x, y) {
        (AnyOperator::Scalar(a), AnyOperator::Scalar(b)) => {
            bch_expand(a, b, order).map(AnyOperator::Scalar)
        }
        (AnyOperator::ComplexScalar(a), AnyOperator::ComplexScalar(b)) => {
            bch_expand(a, b, order).map(AnyOperator::ComplexScalar)
        }
        (AnyOperator::Matrix(a), AnyOperator::Matrix(b)) => {
            bch_expand(a, b, order).map(AnyOperator::Matrix)
        }
        (AnyOperator::ComplexMatrix(a), AnyOperator::ComplexMatrix(b)) => {
            bch_expand(a, b, order).map(AnyOperator::ComplexMatrix)
        }
        (AnyOperator::PauliSum(a), AnyOperator::PauliSum(b)) => {
            bch_expand(a, b, order).map(AnyOperator::PauliSum)
        }
        _ => Err(BchError::TypeMismatch {
            x: x.kind(),
            y: y.kind(),
        }),
    }
}

/// A BCH request as received over a data boundary.
///
/// `order` is kept as raw JSON so that a malformed order (a string, a float)
/// is reported as [`BchError::InvalidOrder`] after the operand type check,
/// not as a decoding failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BchRequest {
    /// Left operand.
    pub x: AnyOperator,
    /// Right operand.
    pub y: AnyOperator,
    /// Requested truncation order.
    pub order: Value,
}

impl BchRequest {
    /// Create a request.
    pub fn new(x: impl Into<AnyOperator>, y: impl Into<AnyOperator>, order: impl Into<Value>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            order: order.into(),
        }
    }

    /// Decode a request from JSON.
    pub fn from_json(json: &str) -> BchResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run the expansion.
    pub fn expand(&self) -> BchResult<AnyOperator> {
        bch_expand_any(&self.x, &self.y, &self.order)
    }
}

/// Wire form of [`AnyOperator`].
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
enum WireOperator {
    Scalar(f64),
    ComplexScalar(Complex64),
    Matrix(Rows<f64>),
    ComplexMatrix(Rows<Complex64>),
    PauliSum(PauliSum),
}

impl From<WireOperator> for AnyOperator {
    fn from(wire: WireOperator) -> Self {
        match wire {
            WireOperator::Scalar(v) => AnyOperator::Scalar(v),
            WireOperator::ComplexScalar(v) => AnyOperator::ComplexScalar(v),
            WireOperator::Matrix(Rows(m)) => AnyOperator::Matrix(m),
            WireOperator::ComplexMatrix(Rows(m)) => AnyOperator::ComplexMatrix(m),
            WireOperator::PauliSum(p) => AnyOperator::PauliSum(p),
        }
    }
}

impl From<AnyOperator> for WireOperator {
    fn from(op: AnyOperator) -> Self {
        match op {
            AnyOperator::Scalar(v) => WireOperator::Scalar(v),
            AnyOperator::ComplexScalar(v) => WireOperator::ComplexScalar(v),
            AnyOperator::Matrix(m) => WireOperator::Matrix(Rows(m)),
            AnyOperator::ComplexMatrix(m) => WireOperator::ComplexMatrix(Rows(m)),
            AnyOperator::PauliSum(p) => WireOperator::PauliSum(p),
        }
    }
}

/// A dense matrix encoded as a list of equal-length rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Rows<A>(pub Array2<A>);

impl<A: Serialize> Serialize for Rows<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<Vec<&A>> = self
            .0
            .rows()
            .into_iter()
            .map(|r| r.into_iter().collect())
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de, A: Deserialize<'de>> Deserialize<'de> for Rows<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<A>>::deserialize(deserializer)?;
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != n_cols) {
            return Err(D::Error::custom("matrix rows have different lengths"));
        }
        let flat: Vec<A> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((n_rows, n_cols), flat)
            .map(Rows)
            .map_err(D::Error::custom)
    }
}
