//! `arvak-bch` — truncated Baker-Campbell-Hausdorff expansion.
//!
//! Given two non-commuting operators x and y, computes z with
//! `e^z ≈ e^x · e^y`, truncated at order 0 through 4. Works uniformly over:
//!
//! - **dense matrices** (`ndarray::Array2<f64>` / `Array2<Complex64>`)
//! - **symbolic qubit operators** ([`PauliSum`])
//! - **scalars** (`f64` / `Complex64`, where the series collapses to x + y)
//!
//! Any other type joins by implementing [`Operator`].
//!
//! # Quick start
//!
//! ```rust
//! use arvak_bch::bch_expand;
//! use arvak_bch::pauli::{PauliOp, PauliString, PauliSum};
//!
//! let x = PauliSum::term(0.1, PauliString::from_ops([(0, PauliOp::X)]));
//! let y = PauliSum::term(0.2, PauliString::from_ops([(0, PauliOp::Z)]));
//!
//! let z = bch_expand(&x, &y, 4).unwrap();
//! // X, Z and the Y generated by [X, Z]
//! assert_eq!(z.n_terms(), 3);
//! assert!(bch_expand(&x, &y, 5).is_err());
//! ```

pub mod bch;
pub mod commutator;
pub mod error;
pub mod operator;
pub mod order;
pub mod pauli;
pub mod request;

pub use bch::{bch_expand, bch_series};
pub use commutator::commutator;
pub use error::{BchError, BchResult};
pub use operator::Operator;
pub use order::{MAX_ORDER, Order};
pub use pauli::{MAX_DENSE_QUBITS, PauliOp, PauliString, PauliSum, PauliTerm};
pub use request::{AnyOperator, BchRequest, bch_expand_any};
