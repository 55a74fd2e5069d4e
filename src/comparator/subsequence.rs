use super::table::{Coord, DpTable};
use super::Match;
use serde::{Deserialize, Serialize};

/// Which neighbour a subsequence cell took its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Diagonal,
    Up,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWrite {
    pub source: Source,
    pub value: u32,
}

/// The subsequence recurrence for one cell.
///
/// Reads only `(i-1, j-1)`, `(i-1, j)` and `(i, j-1)`, all of which precede
/// `(i, j)` in row-major order. On a mismatch with equal neighbours the upper
/// cell wins.
#[inline(always)]
pub fn resolve_cell<T: PartialEq>(table: &DpTable, a: &[T], b: &[T], i: usize, j: usize) -> CellWrite {
    if a[i - 1] == b[j - 1] {
        return CellWrite {
            source: Source::Diagonal,
            value: table.get(i - 1, j - 1) + 1,
        };
    }

    let up = table.get(i - 1, j);
    let left = table.get(i, j - 1);
    if up >= left {
        CellWrite {
            source: Source::Up,
            value: up,
        }
    } else {
        CellWrite {
            source: Source::Left,
            value: left,
        }
    }
}

pub fn subsequence_table<T: PartialEq>(a: &[T], b: &[T]) -> DpTable {
    let mut table = DpTable::for_inputs(a.len(), b.len());
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let write = resolve_cell(&table, a, b, i, j);
            table.set(i, j, write.value);
        }
    }
    table
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traceback<T> {
    /// Matched symbols in input order.
    pub symbols: Vec<T>,
    /// Every cell visited, starting at `(m, n)`.
    pub path: Vec<Coord>,
    /// Cells where a symbol was emitted, in input order.
    pub matched: Vec<Coord>,
}

/// Walks a filled subsequence table back from the bottom-right cell.
pub fn traceback<T: PartialEq + Clone>(table: &DpTable, a: &[T], b: &[T]) -> Traceback<T> {
    let (mut i, mut j) = (a.len(), b.len());
    let mut symbols = Vec::with_capacity(table.final_cell() as usize);
    let mut path = Vec::new();
    let mut matched = Vec::with_capacity(table.final_cell() as usize);

    while i > 0 && j > 0 {
        path.push((i, j));
        if a[i - 1] == b[j - 1] {
            symbols.push(a[i - 1].clone());
            matched.push((i, j));
            i -= 1;
            j -= 1;
        } else if table.get(i - 1, j) >= table.get(i, j - 1) {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    symbols.reverse();
    matched.reverse();
    Traceback {
        symbols,
        path,
        matched,
    }
}

/// Longest common subsequence of `a` and `b`.
///
/// Empty inputs short-circuit without building a table. When several
/// optima exist the up-preferring walk picks one deterministically.
pub fn longest_common_subsequence<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Match<T> {
    if a.is_empty() || b.is_empty() {
        return Match::empty();
    }

    let table = subsequence_table(a, b);
    let trace = traceback(&table, a, b);
    debug_assert_eq!(trace.symbols.len(), table.final_cell() as usize);

    Match {
        length: trace.symbols.len(),
        symbols: trace.symbols,
    }
}

/// Character-level convenience wrapper returning `(subsequence, length)`.
pub fn lcs_str(a: &str, b: &str) -> (String, usize) {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    longest_common_subsequence(&a, &b).into_pair()
}
