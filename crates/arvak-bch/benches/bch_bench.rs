//! Benchmarks for BCH expansion
//!
//! Run with: cargo bench -p arvak-bch

use arvak_bch::pauli::{PauliOp, PauliString, PauliSum, PauliTerm};
use arvak_bch::{Order, bch_expand};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ndarray::Array2;

/// Deterministic dense matrix with no special structure.
fn dense(n: usize, shift: f64) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(i, j)| ((i * 7 + j * 3) as f64 + shift).sin())
}

/// Transverse-field Ising chain split into its ZZ and X parts.
fn ising(n_qubits: u32) -> (PauliSum, PauliSum) {
    let zz = (0..n_qubits - 1)
        .map(|q| {
            PauliTerm::new(
                -1.0,
                PauliString::from_ops([(q, PauliOp::Z), (q + 1, PauliOp::Z)]),
            )
        })
        .collect();
    let x = (0..n_qubits)
        .map(|q| PauliTerm::new(-0.5, PauliString::from_ops([(q, PauliOp::X)])))
        .collect();
    (zz, x)
}

/// Benchmark dense-matrix expansion at every order
fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("bch_dense");
    let x = dense(16, 0.0);
    let y = dense(16, 1.0);

    for order in Order::all() {
        group.bench_with_input(BenchmarkId::new("order", order.get()), &order, |b, &o| {
            b.iter(|| bch_expand(black_box(&x), black_box(&y), o).unwrap());
        });
    }

    group.finish();
}

/// Benchmark symbolic expansion of an Ising Hamiltonian split
fn bench_pauli(c: &mut Criterion) {
    let mut group = c.benchmark_group("bch_pauli");

    for n_qubits in &[4u32, 8] {
        let (zz, x) = ising(*n_qubits);
        group.bench_with_input(BenchmarkId::new("ising", n_qubits), n_qubits, |b, _| {
            b.iter(|| bch_expand(black_box(&zz), black_box(&x), 4).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dense, bench_pauli);
criterion_main!(benches);
