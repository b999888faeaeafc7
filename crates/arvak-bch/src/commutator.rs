//! The commutator bracket.

use crate::operator::Operator;

/// `[a, b] = a·b − b·a`.
///
/// Antisymmetric: `commutator(a, b) == −commutator(b, a)`. Operand
/// compatibility is the caller's concern (see [`Operator::check_compatible`]).
pub fn commutator<T: Operator>(a: &T, b: &T) -> T {
    a.bracket(b)
}
