//! Tests for the fan-out partitioning policy

use super::*;

#[test]
fn test_zero_messages_spawns_no_workers() {
    assert!(worker_counts(0).is_empty());
}

#[test]
fn test_small_totals_use_a_single_worker() {
    assert_eq!(worker_counts(1), vec![1]);
    assert_eq!(worker_counts(5), vec![5]);
    assert_eq!(worker_counts(11), vec![11]);
    assert_eq!(worker_counts(200), vec![200]);
}

#[test]
fn test_mid_totals_split_into_two_halves() {
    assert_eq!(worker_counts(201), vec![100, 101]);
    assert_eq!(worker_counts(1000), vec![500, 500]);
    assert_eq!(worker_counts(1001), vec![500, 501]);
    assert_eq!(worker_counts(2000), vec![1000, 1000]);
}

#[test]
fn test_large_totals_split_into_four_quarters() {
    assert_eq!(worker_counts(2001), vec![500, 500, 500, 501]);
    assert_eq!(worker_counts(2500), vec![625, 625, 625, 625]);
    assert_eq!(worker_counts(2501), vec![625, 625, 625, 626]);
    assert_eq!(worker_counts(10_000), vec![2500, 2500, 2500, 2500]);
}

#[test]
fn test_counts_always_sum_to_total() {
    for total in (0..=4096).chain([9_999, 100_000, 123_457]) {
        let counts = worker_counts(total);
        assert_eq!(
            counts.iter().sum::<usize>(),
            total,
            "counts {:?} do not sum to {}",
            counts,
            total
        );
    }
}

#[test]
fn test_remainder_lands_in_the_last_worker() {
    for total in [203, 2003, 2502, 2503] {
        let counts = worker_counts(total);
        let (last, rest) = counts.split_last().expect("at least one worker");
        for &count in rest {
            assert!(
                count <= *last,
                "earlier worker {} exceeds last {} for total {}",
                count,
                last,
                total
            );
        }
    }
}
