//! Symbolic qubit operators.
//!
//! A [`PauliSum`] is a complex-weighted sum of Pauli strings:
//!
//!   A = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℂ. Products of Pauli strings stay Pauli strings
//! up to a phase in {±1, ±i}, so the set is closed under every
//! [`Operator`] method and BCH expansion works on it symbolically.
//!
//! # Example
//!
//! ```rust
//! use arvak_bch::pauli::{PauliOp, PauliString, PauliSum};
//! use arvak_bch::commutator;
//! use num_complex::Complex64;
//!
//! let x = PauliSum::term(1.0, PauliString::from_ops([(0, PauliOp::X)]));
//! let y = PauliSum::term(1.0, PauliString::from_ops([(0, PauliOp::Y)]));
//!
//! // [X, Y] = 2i·Z
//! let c = commutator(&x, &y);
//! assert_eq!(c.n_terms(), 1);
//! assert_eq!(
//!     c.coefficient(&PauliString::from_ops([(0, PauliOp::Z)])),
//!     Complex64::new(0.0, 2.0),
//! );
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::{Add, Mul, Neg, Sub};

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{BchError, BchResult};
use crate::operator::Operator;

/// Widest operator [`PauliSum::to_matrix`] will build (a 65536 × 65536 matrix).
pub const MAX_DENSE_QUBITS: u32 = 16;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Single-qubit product `self · other = phase · op`.
    pub fn multiply(self, other: Self) -> (Complex64, Self) {
        use PauliOp::{I as Id, X, Y, Z};
        match (self, other) {
            (Id, p) | (p, Id) => (ONE, p),
            (X, X) | (Y, Y) | (Z, Z) => (ONE, Id),
            (X, Y) => (I, Z),
            (Y, X) => (-I, Z),
            (Y, Z) => (I, X),
            (Z, Y) => (-I, X),
            (Z, X) => (I, Y),
            (X, Z) => (-I, Y),
        }
    }

    /// Action on a computational basis bit: `op|bit⟩ = phase·|bit'⟩`.
    fn apply(self, bit: usize) -> (Complex64, usize) {
        match self {
            PauliOp::I => (ONE, bit),
            PauliOp::X => (ONE, bit ^ 1),
            // Y|0⟩ = i|1⟩, Y|1⟩ = -i|0⟩
            PauliOp::Y => (if bit == 0 { I } else { -I }, bit ^ 1),
            PauliOp::Z => (if bit == 0 { ONE } else { -ONE }, bit),
        }
    }
}

/// A tensor product of Pauli operators on indexed qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with Identity terms
/// omitted. Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawPauliString")]
pub struct PauliString {
    /// Non-identity terms, sorted by qubit index ascending.
    ops: Vec<(u32, PauliOp)>,
}

/// Decoded form of a [`PauliString`], normalised through `from_ops`.
#[derive(Deserialize)]
struct RawPauliString {
    ops: Vec<(u32, PauliOp)>,
}

impl From<RawPauliString> for PauliString {
    fn from(raw: RawPauliString) -> Self {
        PauliString::from_ops(raw.ops)
    }
}

impl PauliString {
    /// The identity string.
    pub fn identity() -> Self {
        Self { ops: Vec::new() }
    }

    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; repeated qubits are multiplied
    /// together left to right and the resulting phase is discarded, so pass
    /// each qubit at most once when the phase matters.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut merged: BTreeMap<u32, PauliOp> = BTreeMap::new();
        for (q, op) in ops {
            let slot = merged.entry(q).or_insert(PauliOp::I);
            *slot = slot.multiply(op).1;
        }
        Self {
            ops: merged
                .into_iter()
                .filter(|(_, op)| *op != PauliOp::I)
                .collect(),
        }
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity operators.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Product `self · other = phase · P`.
    pub fn multiply(&self, other: &Self) -> (Complex64, Self) {
        let mut phase = ONE;
        let mut ops = Vec::with_capacity(self.ops.len() + other.ops.len());
        let (mut i, mut j) = (0, 0);

        // Both sides are sorted by qubit: merge, multiplying shared qubits.
        while i < self.ops.len() && j < other.ops.len() {
            let (qa, a) = self.ops[i];
            let (qb, b) = other.ops[j];
            if qa < qb {
                ops.push((qa, a));
                i += 1;
            } else if qb < qa {
                ops.push((qb, b));
                j += 1;
            } else {
                let (p, op) = a.multiply(b);
                phase *= p;
                if op != PauliOp::I {
                    ops.push((qa, op));
                }
                i += 1;
                j += 1;
            }
        }
        ops.extend_from_slice(&self.ops[i..]);
        ops.extend_from_slice(&other.ops[j..]);

        (phase, Self { ops })
    }

    /// True if the two strings commute.
    ///
    /// Pauli strings either commute or anticommute; they anticommute when
    /// they differ non-trivially on an odd number of shared qubits.
    pub fn commutes_with(&self, other: &Self) -> bool {
        let (mut i, mut j) = (0, 0);
        let mut clashes = 0usize;
        while i < self.ops.len() && j < other.ops.len() {
            let (qa, a) = self.ops[i];
            let (qb, b) = other.ops[j];
            if qa < qb {
                i += 1;
            } else if qb < qa {
                j += 1;
            } else {
                if a != b {
                    clashes += 1;
                }
                i += 1;
                j += 1;
            }
        }
        clashes % 2 == 0
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
///
/// This is the serialised form of a [`PauliSum`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Complex coefficient.
    pub coeff: Complex64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl PauliTerm {
    /// Create a new term.
    pub fn new(coeff: impl Into<Complex64>, pauli: PauliString) -> Self {
        Self {
            coeff: coeff.into(),
            pauli,
        }
    }
}

/// A complex-weighted sum of Pauli strings with like terms merged.
///
/// Terms whose coefficient cancels to exactly zero are removed, so
/// commuting operands produce an empty commutator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PauliTerm>", into = "Vec<PauliTerm>")]
pub struct PauliSum {
    terms: BTreeMap<PauliString, Complex64>,
}

impl PauliSum {
    /// The zero operator.
    pub fn zero() -> Self {
        Self::default()
    }

    /// `coeff · I`.
    pub fn identity(coeff: impl Into<Complex64>) -> Self {
        Self::term(coeff, PauliString::identity())
    }

    /// A single-term operator `coeff · pauli`.
    pub fn term(coeff: impl Into<Complex64>, pauli: PauliString) -> Self {
        let mut sum = Self::zero();
        sum.accumulate(pauli, coeff.into());
        sum
    }

    /// Build from a list of terms, merging repeated strings.
    pub fn from_terms(terms: impl IntoIterator<Item = PauliTerm>) -> Self {
        let mut sum = Self::zero();
        for t in terms {
            sum.accumulate(t.pauli, t.coeff);
        }
        sum
    }

    /// Iterate over `(pauli, coeff)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&PauliString, &Complex64)> {
        self.terms.iter()
    }

    /// Coefficient of `pauli`, zero if absent.
    pub fn coefficient(&self, pauli: &PauliString) -> Complex64 {
        self.terms.get(pauli).copied().unwrap_or(ZERO)
    }

    /// Number of stored terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if no terms are stored.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The minimum number of qubits required to represent this operator.
    ///
    /// Returns 0 if the operator is empty or purely identity.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .keys()
            .filter_map(PauliString::max_qubit)
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Sum of |c_k|, an upper bound on the spectral norm.
    pub fn lambda(&self) -> f64 {
        self.terms.values().map(|c| c.norm()).sum()
    }

    /// Drop every term with |c_k| ≤ `abs_tol`.
    #[must_use]
    pub fn compress(mut self, abs_tol: f64) -> Self {
        self.terms.retain(|_, c| c.norm() > abs_tol);
        self
    }

    /// True if every coefficient of `self - other` is within `abs_tol`.
    pub fn approx_eq(&self, other: &Self, abs_tol: f64) -> bool {
        self.minus(other).iter().all(|(_, c)| c.norm() <= abs_tol)
    }

    /// Dense matrix of this operator on `n_qubits` qubits.
    ///
    /// Qubit 0 is the least significant bit of the basis index. At most
    /// [`MAX_DENSE_QUBITS`] qubits are accepted.
    pub fn to_matrix(&self, n_qubits: u32) -> BchResult<Array2<Complex64>> {
        if n_qubits > MAX_DENSE_QUBITS {
            return Err(BchError::DenseTooLarge {
                n_qubits,
                max: MAX_DENSE_QUBITS,
            });
        }
        if let Some(qubit) = self.terms.keys().filter_map(PauliString::max_qubit).max() {
            if qubit >= n_qubits {
                return Err(BchError::QubitOutOfRange { qubit, n_qubits });
            }
        }

        let dim = 1usize << n_qubits;
        let mut matrix = Array2::<Complex64>::zeros((dim, dim));
        for (pauli, coeff) in &self.terms {
            for col in 0..dim {
                let mut row = col;
                let mut amp = *coeff;
                for &(q, op) in pauli.ops() {
                    let bit = (row >> q) & 1;
                    let (phase, flipped) = op.apply(bit);
                    amp *= phase;
                    row = (row & !(1 << q)) | (flipped << q);
                }
                matrix[[row, col]] += amp;
            }
        }
        Ok(matrix)
    }

    fn accumulate(&mut self, pauli: PauliString, coeff: Complex64) {
        match self.terms.entry(pauli) {
            Entry::Vacant(slot) => {
                if coeff != ZERO {
                    slot.insert(coeff);
                }
            }
            Entry::Occupied(mut slot) => {
                *slot.get_mut() += coeff;
                if *slot.get() == ZERO {
                    slot.remove();
                }
            }
        }
    }

    fn map_coefficients(&self, f: impl Fn(Complex64) -> Complex64) -> Self {
        let mut out = Self::zero();
        for (pauli, coeff) in &self.terms {
            let c = f(*coeff);
            if c != ZERO {
                out.terms.insert(pauli.clone(), c);
            }
        }
        out
    }
}

impl Operator for PauliSum {
    const KIND: &'static str = "pauli_sum";

    fn plus(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (pauli, coeff) in &other.terms {
            out.accumulate(pauli.clone(), *coeff);
        }
        out
    }

    fn minus(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (pauli, coeff) in &other.terms {
            out.accumulate(pauli.clone(), -*coeff);
        }
        out
    }

    fn compose(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        for (pa, ca) in &self.terms {
            for (pb, cb) in &other.terms {
                let (phase, pauli) = pa.multiply(pb);
                out.accumulate(pauli, ca * cb * phase);
            }
        }
        out
    }

    /// Commuting string pairs cancel; anticommuting ones give `2·ca·cb·PQ`.
    fn bracket(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        for (pa, ca) in &self.terms {
            for (pb, cb) in &other.terms {
                if pa.commutes_with(pb) {
                    continue;
                }
                let (phase, pauli) = pa.multiply(pb);
                out.accumulate(pauli, ca * cb * phase * 2.0);
            }
        }
        out
    }

    fn scale(&self, factor: f64) -> Self {
        self.map_coefficients(|c| c * factor)
    }

    fn divide(&self, divisor: f64) -> Self {
        self.map_coefficients(|c| c / divisor)
    }
}

impl From<Vec<PauliTerm>> for PauliSum {
    fn from(terms: Vec<PauliTerm>) -> Self {
        Self::from_terms(terms)
    }
}

impl From<PauliSum> for Vec<PauliTerm> {
    fn from(sum: PauliSum) -> Self {
        sum.terms
            .into_iter()
            .map(|(pauli, coeff)| PauliTerm { coeff, pauli })
            .collect()
    }
}

impl FromIterator<PauliTerm> for PauliSum {
    fn from_iter<T: IntoIterator<Item = PauliTerm>>(iter: T) -> Self {
        Self::from_terms(iter)
    }
}

impl Add for &PauliSum {
    type Output = PauliSum;

    fn add(self, rhs: Self) -> PauliSum {
        self.plus(rhs)
    }
}

impl Add for PauliSum {
    type Output = PauliSum;

    fn add(self, rhs: Self) -> PauliSum {
        self.plus(&rhs)
    }
}

impl Sub for &PauliSum {
    type Output = PauliSum;

    fn sub(self, rhs: Self) -> PauliSum {
        self.minus(rhs)
    }
}

impl Sub for PauliSum {
    type Output = PauliSum;

    fn sub(self, rhs: Self) -> PauliSum {
        self.minus(&rhs)
    }
}

impl Mul for &PauliSum {
    type Output = PauliSum;

    fn mul(self, rhs: Self) -> PauliSum {
        self.compose(rhs)
    }
}

impl Mul for PauliSum {
    type Output = PauliSum;

    fn mul(self, rhs: Self) -> PauliSum {
        self.compose(&rhs)
    }
}

impl Mul<f64> for PauliSum {
    type Output = PauliSum;

    fn mul(self, rhs: f64) -> PauliSum {
        self.scale(rhs)
    }
}

impl Neg for PauliSum {
    type Output = PauliSum;

    fn neg(self) -> PauliSum {
        self.negated()
    }
}
