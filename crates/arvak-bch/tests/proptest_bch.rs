//! Property-based tests for BCH expansion.
//!
//! Random operand pairs are checked against the term-by-term formula, the
//! cumulative-order structure and commutator antisymmetry.

mod common;

use arvak_bch::pauli::{PauliOp, PauliString, PauliSum, PauliTerm};
use arvak_bch::{BchError, Operator, bch_expand, bch_series, commutator};
use common::{baseline, baseline_increment, close, complex_close};
use ndarray::Array2;
use proptest::prelude::*;

/// A pair of square matrices of one random size with entries in [-1, 1].
fn arb_matrix_pair() -> impl Strategy<Value = (Array2<f64>, Array2<f64>)> {
    (1_usize..=5).prop_flat_map(|n| {
        (
            prop::collection::vec(-1.0_f64..1.0, n * n),
            prop::collection::vec(-1.0_f64..1.0, n * n),
        )
            .prop_map(move |(a, b)| {
                (
                    Array2::from_shape_vec((n, n), a).unwrap(),
                    Array2::from_shape_vec((n, n), b).unwrap(),
                )
            })
    })
}

fn arb_pauli_op() -> impl Strategy<Value = PauliOp> {
    prop_oneof![
        Just(PauliOp::I),
        Just(PauliOp::X),
        Just(PauliOp::Y),
        Just(PauliOp::Z),
    ]
}

/// A Pauli sum on two qubits with one to four terms.
fn arb_pauli_sum() -> impl Strategy<Value = PauliSum> {
    prop::collection::vec((arb_pauli_op(), arb_pauli_op(), -1.0_f64..1.0), 1..=4).prop_map(
        |terms| {
            terms
                .into_iter()
                .map(|(a, b, c)| PauliTerm::new(c, PauliString::from_ops([(0, a), (1, b)])))
                .collect::<PauliSum>()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn expansion_matches_baseline((x, y) in arb_matrix_pair(), order in 0_u8..=4) {
        let z = bch_expand(&x, &y, order).unwrap();
        prop_assert!(close(&z, &baseline(&x, &y, order), 1e-10));
    }

    #[test]
    fn series_terms_are_order_increments((x, y) in arb_matrix_pair()) {
        let series = bch_series(&x, &y, 4).unwrap();
        for (k, term) in series.iter().enumerate() {
            prop_assert!(close(term, &baseline_increment(&x, &y, k as u8), 1e-9));
        }
    }

    #[test]
    fn commutator_is_antisymmetric((a, b) in arb_matrix_pair()) {
        let ab = commutator(&a, &b);
        let ba = commutator(&b, &a);
        prop_assert!(close(&ab, &ba.negated(), 1e-14));
    }

    #[test]
    fn pauli_commutator_is_antisymmetric(a in arb_pauli_sum(), b in arb_pauli_sum()) {
        let sum = commutator(&a, &b).plus(&commutator(&b, &a));
        prop_assert!(sum.approx_eq(&PauliSum::zero(), 1e-14));
    }

    #[test]
    fn pauli_expansion_matches_dense(a in arb_pauli_sum(), b in arb_pauli_sum(), order in 0_u8..=4) {
        let symbolic = bch_expand(&a, &b, order).unwrap().to_matrix(2).unwrap();
        let dense = bch_expand(&a.to_matrix(2).unwrap(), &b.to_matrix(2).unwrap(), order).unwrap();
        prop_assert!(complex_close(&symbolic, &dense, 1e-10));
    }

    #[test]
    fn orders_above_four_always_fail(order in 5_u64..10_000) {
        let x = Array2::<f64>::eye(2);
        let is_unsupported = matches!(
            bch_expand(&x, &x, order),
            Err(BchError::UnsupportedOrder { .. })
        );
        prop_assert!(is_unsupported);
    }

    #[test]
    fn negative_orders_always_fail(order in i64::MIN..0) {
        let x = Array2::<f64>::eye(2);
        let is_invalid = matches!(bch_expand(&x, &x, order), Err(BchError::InvalidOrder(_)));
        prop_assert!(is_invalid);
    }
}
