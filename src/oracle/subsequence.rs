use super::{Deadline, CHECK_INTERVAL};
use crate::comparator::{is_subsequence, Match};
use crate::error::LcsResult;

/// Lexicographic `k`-of-`n` index combinations.
///
/// Yields borrowed slices, so it is driven with [`IndexCombinations::advance`]
/// instead of `Iterator`.
#[derive(Debug, Clone)]
pub struct IndexCombinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl IndexCombinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }

    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.as_slice());
        }

        let k = self.indices.len();
        // Rightmost slot that can still move right.
        let pivot = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i);
        match pivot {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                Some(self.indices.as_slice())
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Exhaustive subsequence search.
///
/// Tries every index subset of the shorter input, longest first, and returns
/// the first candidate that embeds in the longer input. Exponential in the
/// shorter length.
pub fn brute_force_subsequence<T: PartialEq + Clone>(
    a: &[T],
    b: &[T],
    deadline: &Deadline,
) -> LcsResult<Match<T>> {
    if a.is_empty() || b.is_empty() {
        return Ok(Match::empty());
    }

    let (short, long) = if a.len() > b.len() { (b, a) } else { (a, b) };
    let mut candidate = Vec::with_capacity(short.len());
    let mut checked: u64 = 0;

    for length in (1..=short.len()).rev() {
        let mut combos = IndexCombinations::new(short.len(), length);
        while let Some(indices) = combos.advance() {
            checked += 1;
            if checked == 1 || checked % CHECK_INTERVAL == 0 {
                deadline.check(checked)?;
            }

            candidate.clear();
            candidate.extend(indices.iter().map(|&i| short[i].clone()));
            if is_subsequence(&candidate, long) {
                return Ok(Match {
                    symbols: candidate,
                    length,
                });
            }
        }
    }

    Ok(Match::empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(n: usize, k: usize) -> Vec<Vec<usize>> {
        let mut combos = IndexCombinations::new(n, k);
        let mut out = Vec::new();
        while let Some(c) = combos.advance() {
            out.push(c.to_vec());
        }
        out
    }

    #[test]
    fn test_combinations_are_lexicographic() {
        assert_eq!(
            collect(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(collect(3, 3), vec![vec![0, 1, 2]]);
        assert!(collect(2, 3).is_empty());
    }

    #[test]
    fn test_finds_longest_first() {
        let a: Vec<char> = "ABCBDAB".chars().collect();
        let b: Vec<char> = "BDCABA".chars().collect();
        let m = brute_force_subsequence(&a, &b, &Deadline::none()).unwrap();
        assert_eq!(m.length, 4);
        assert!(is_subsequence(&m.symbols, &a));
        assert!(is_subsequence(&m.symbols, &b));
    }

    #[test]
    fn test_disjoint_inputs() {
        let m = brute_force_subsequence(&['A', 'B'], &['C', 'D'], &Deadline::none()).unwrap();
        assert_eq!(m, Match::empty());
    }
}
