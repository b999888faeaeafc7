//! Error types for the BCH crate.

use std::convert::Infallible;

use thiserror::Error;

/// Errors produced by BCH expansion and the operator types backing it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BchError {
    /// `x` and `y` are different kinds of operator.
    #[error("Operator x is not same type as operator y (x: {x}, y: {y})")]
    TypeMismatch {
        /// Kind of the left operand.
        x: &'static str,
        /// Kind of the right operand.
        y: &'static str,
    },

    /// Dense operands are not square matrices of one common shape.
    #[error("Operator shapes are incompatible: x is {x:?}, y is {y:?}")]
    ShapeMismatch {
        /// Shape of the left operand.
        x: (usize, usize),
        /// Shape of the right operand.
        y: (usize, usize),
    },

    /// The order is not a non-negative integer.
    #[error("Invalid order parameter: {0}")]
    InvalidOrder(String),

    /// The order is a non-negative integer above the highest implemented order.
    #[error("Order exceeds maximum order supported: {order} > {max}")]
    UnsupportedOrder {
        /// The requested order.
        order: u64,
        /// Highest supported order.
        max: u8,
    },

    /// A Pauli string references a qubit outside the requested matrix space.
    #[error("Pauli string references qubit {qubit} but the operator space only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits of the target space.
        n_qubits: u32,
    },

    /// A dense conversion was requested for more qubits than can be stored.
    #[error("Dense matrix on {n_qubits} qubits exceeds the limit of {max} qubits")]
    DenseTooLarge {
        /// Requested number of qubits.
        n_qubits: u32,
        /// Widest supported dense conversion.
        max: u32,
    },

    /// A JSON request could not be decoded.
    #[error("Invalid request: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Infallible> for BchError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Result type for BCH operations.
pub type BchResult<T> = Result<T, BchError>;
