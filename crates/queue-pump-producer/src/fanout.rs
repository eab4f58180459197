//! Work-splitting policy for bulk production.
//!
//! A pure function from total message count to per-worker counts, so the
//! partitioning policy is unit-testable apart from the task spawning that
//! drives it. Worker count is a static tier function of the total, not
//! adaptive: the tiers bound per-worker batch-loop latency while keeping
//! concurrency bounded.

/// Totals at or below this are sent individually, one call per message
pub const INDIVIDUAL_SEND_MAX: usize = 10;

/// Largest total handled by a single batching worker
const SINGLE_WORKER_MAX: usize = 200;

/// Largest total handled by two workers
const TWO_WORKER_MAX: usize = 2000;

/// Split a total message count into per-worker counts.
///
/// - `0` → no workers
/// - `1..=200` → one worker
/// - `201..=2000` → two equal (±1) halves
/// - `2001..` → four quarters, the last absorbing the remainder
///
/// The counts always sum to `total`; each worker owns a disjoint slice of
/// the message index range.
pub fn worker_counts(total: usize) -> Vec<usize> {
    match total {
        0 => Vec::new(),
        1..=SINGLE_WORKER_MAX => vec![total],
        n if n <= TWO_WORKER_MAX => {
            let half = n / 2;
            vec![half, n - half]
        }
        n => {
            let quarter = n / 4;
            vec![quarter, quarter, quarter, n - quarter * 3]
        }
    }
}

#[cfg(test)]
#[path = "fanout_tests.rs"]
mod tests;
