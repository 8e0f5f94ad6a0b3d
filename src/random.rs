use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/// Source of uniform integers used for food placement.
pub trait RandomSource {
    /// Returns a uniform integer in `[0, bound)`. `bound` must be positive.
    fn int_below(&mut self, bound: i32) -> i32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn int_below(&mut self, bound: i32) -> i32 {
        self.gen_range(0..bound)
    }
}

/// Derives a start-up seed from the system clock.
///
/// The nanosecond count is wider than 64 bits; the high half is folded into
/// the low one.
#[must_use]
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| fold_nanos(elapsed.as_nanos()))
        .unwrap_or_default()
}

fn fold_nanos(nanos: u128) -> u64 {
    (nanos as u64) ^ ((nanos >> 64) as u64)
}
