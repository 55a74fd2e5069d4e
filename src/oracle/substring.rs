use super::Deadline;
use crate::comparator::{is_substring, Match};
use crate::error::LcsResult;

/// Exhaustive substring search: every contiguous slice of `a`, tested for
/// containment in `b` with a naive window scan. O(m²·n).
pub fn brute_force_substring<T: PartialEq + Clone>(
    a: &[T],
    b: &[T],
    deadline: &Deadline,
) -> LcsResult<Match<T>> {
    if a.is_empty() || b.is_empty() {
        return Ok(Match::empty());
    }

    let mut best: Option<(usize, usize)> = None;
    let mut best_len = 0;
    let mut checked: u64 = 0;

    for start in 0..a.len() {
        deadline.check(checked)?;
        for end in start + 1..=a.len() {
            checked += 1;
            let len = end - start;
            if len > best_len && is_substring(&a[start..end], b) {
                best = Some((start, end));
                best_len = len;
            }
        }
    }

    Ok(match best {
        Some((start, end)) => Match {
            symbols: a[start..end].to_vec(),
            length: best_len,
        },
        None => Match::empty(),
    })
}
