//! Exhaustive comparators used as a conformance oracle for the DP forms.
//!
//! Both searches are intentionally naive. They exist so the DP answers can be
//! checked against something that is obviously correct, not to be fast.

pub mod subsequence;
pub mod substring;

pub use self::subsequence::{brute_force_subsequence, IndexCombinations};
pub use self::substring::brute_force_substring;

use crate::comparator::{Match, Variant};
use crate::error::{LcsError, LcsResult};
use std::time::{Duration, Instant};

/// Candidates examined between two clock reads.
pub const CHECK_INTERVAL: u64 = 4096;

/// Wall-clock bound for one exhaustive search.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn none() -> Self {
        Self {
            started: Instant::now(),
            limit: None,
        }
    }

    pub fn after(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit: Some(limit),
        }
    }

    pub fn from_limit(limit: Option<Duration>) -> Self {
        match limit {
            Some(l) => Self::after(l),
            None => Self::none(),
        }
    }

    pub fn check(&self, candidates: u64) -> LcsResult<()> {
        if let Some(limit) = self.limit {
            let elapsed = self.started.elapsed();
            if elapsed >= limit {
                return Err(LcsError::DeadlineExceeded {
                    elapsed,
                    candidates,
                });
            }
        }
        Ok(())
    }
}

/// Runs the exhaustive form selected by `variant`.
pub fn brute_force<T: PartialEq + Clone>(
    variant: Variant,
    a: &[T],
    b: &[T],
    deadline: &Deadline,
) -> LcsResult<Match<T>> {
    match variant {
        Variant::Subsequence => brute_force_subsequence(a, b, deadline),
        Variant::Substring => brute_force_substring(a, b, deadline),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_deadline_expires_immediately() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(matches!(
            deadline.check(1),
            Err(LcsError::DeadlineExceeded { candidates: 1, .. })
        ));
        assert!(Deadline::none().check(u64::MAX).is_ok());
    }
}
