//! Engine-level properties: correctness against the sequential sum,
//! determinism, degenerate worker counts and the error contract.

use approx::assert_relative_eq;
use proptest::prelude::*;

use parsum::model::{chunk_size, Partition};
use parsum::{sum, ChunkedSum, Dispatch, Matrix, ParsumError, SequentialSum, SumMatrix, SyntheticMatrix};

// =============================================================================
// Fixed scenarios
// =============================================================================

fn ten_element_matrix() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![7.0, 8.0, 9.0, 10.0],
    ]
}

#[test]
fn ragged_ten_elements_three_workers() {
    let m = ten_element_matrix();
    let engine = ChunkedSum::new(3).unwrap();
    let partition = engine.partition_for(10);
    let ranges: Vec<_> = partition.ranges().collect();
    assert_eq!(ranges, vec![0..4, 4..8, 8..10]);
    assert_eq!(engine.sum_rows(&m).unwrap(), 55.0);
}

#[test]
fn every_worker_count_up_to_double_the_elements() {
    let m = ten_element_matrix();
    for n in 1..=21 {
        for dispatch in [Dispatch::Threads, Dispatch::Pool] {
            let total = ChunkedSum::new(n).unwrap().dispatch(dispatch).sum_rows(&m).unwrap();
            assert_eq!(total, 55.0, "n={} dispatch={:?}", n, dispatch);
        }
    }
}

#[test]
fn empty_inputs_sum_to_zero() {
    let no_rows: Vec<Vec<f64>> = vec![];
    let empty_rows: Vec<Vec<f64>> = vec![vec![], vec![], vec![]];
    for n in [1, 3, 64] {
        assert_eq!(sum(&no_rows, n).unwrap(), 0.0);
        assert_eq!(sum(&[Vec::<f64>::new()], n).unwrap(), 0.0);
        assert_eq!(sum(&empty_rows, n).unwrap(), 0.0);
        assert_eq!(ChunkedSum::new(n).unwrap().sum_matrix(&Matrix::empty()).unwrap(), 0.0);
    }
}

#[test]
fn invalid_worker_counts_fail_fast() {
    for workers in [0, -1, -64] {
        match sum(&ten_element_matrix(), workers) {
            Err(ParsumError::InvalidConfiguration { workers: w }) => assert_eq!(w, workers),
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
        assert!(ChunkedSum::new(workers).is_err());
    }
}

#[test]
fn single_worker_reproduces_sequential_order() {
    let m = SyntheticMatrix::new(200).max_cols(50).seed(11).build();
    let sequential = SequentialSum.sum_matrix(&m).unwrap();
    for dispatch in [Dispatch::Threads, Dispatch::Pool] {
        let chunked = ChunkedSum::new(1).unwrap().dispatch(dispatch).sum_matrix(&m).unwrap();
        assert_eq!(chunked.to_bits(), sequential.to_bits());
    }
}

#[test]
fn repeated_calls_are_bit_identical() {
    let m = SyntheticMatrix::new(300).max_cols(40).seed(3).build();
    for n in [2, 3, 7, 16] {
        let engine = ChunkedSum::new(n).unwrap();
        let first = engine.sum_matrix(&m).unwrap();
        for _ in 0..5 {
            assert_eq!(engine.sum_matrix(&m).unwrap().to_bits(), first.to_bits(), "n={}", n);
        }
    }
}

#[test]
fn concurrent_callers_do_not_interfere() {
    let matrices: Vec<Matrix> = (0..4)
        .map(|seed| SyntheticMatrix::new(100).max_cols(30).seed(seed).build())
        .collect();
    let expected: Vec<u64> = matrices
        .iter()
        .map(|m| sum(m.rows(), 5).unwrap().to_bits())
        .collect();

    let got: Vec<u64> = std::thread::scope(|s| {
        let handles: Vec<_> = matrices
            .iter()
            .map(|m| s.spawn(move || sum(m.rows(), 5).unwrap().to_bits()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(got, expected);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn oversized_worker_count_is_an_error_not_a_panic() {
    for dispatch in [Dispatch::Threads, Dispatch::Pool] {
        let engine = ChunkedSum::new(i64::MAX).unwrap().dispatch(dispatch);
        match engine.sum_rows(&[vec![1.0]]) {
            Err(ParsumError::ResourceExhausted { .. }) => {}
            other => panic!("expected ResourceExhausted for {:?}, got {:?}", dispatch, other),
        }
    }
}

#[test]
fn non_finite_values_are_results_not_errors() {
    let m = vec![vec![1.0, 2.0], vec![f64::NAN], vec![3.0]];
    assert!(sum(&m, 2).unwrap().is_nan());
    let m = vec![vec![f64::INFINITY, 1.0], vec![2.0]];
    assert_eq!(sum(&m, 3).unwrap(), f64::INFINITY);
}

#[test]
fn skewed_partition_shape() {
    // 10 elements over 6 workers: size 5, only the first two chunks get data
    let n = std::num::NonZeroUsize::new(6).unwrap();
    assert_eq!(chunk_size(10, n), 5);
    let p = Partition::new(10, n);
    assert_eq!(p.n_nonempty(), 2);
    assert_eq!(p.len(), 6);
}

// =============================================================================
// Properties
// =============================================================================

fn ragged_matrix() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-1.0e6f64..1.0e6, 0..12), 0..12)
}

proptest! {
    #[test]
    fn chunked_matches_sequential(rows in ragged_matrix(), extra in 0usize..1000) {
        let elements: usize = rows.iter().map(Vec::len).sum();
        let workers = 1 + extra % (2 * elements + 1);
        let expected = SequentialSum.sum_rows(&rows).unwrap();
        let got = sum(&rows, workers as i64).unwrap();
        let scale: f64 = rows.iter().flatten().map(|x| x.abs()).sum::<f64>().max(1.0);
        assert_relative_eq!(got, expected, epsilon = scale * 1e-12);
    }

    #[test]
    fn dispatch_modes_agree(rows in ragged_matrix(), workers in 1i64..10) {
        let threads = ChunkedSum::new(workers).unwrap().sum_rows(&rows).unwrap();
        let pool = ChunkedSum::new(workers).unwrap().dispatch(Dispatch::Pool).sum_rows(&rows).unwrap();
        prop_assert_eq!(threads.to_bits(), pool.to_bits());
    }

    #[test]
    fn non_positive_workers_always_rejected(workers in i64::MIN..=0) {
        let err = sum(&[vec![1.0]], workers).unwrap_err();
        prop_assert!(err.is_invalid_configuration());
    }
}
