//! Step-by-step capture of the subsequence table fill, for replay.
//!
//! The recorder re-runs the recurrence itself (through
//! [`resolve_cell`](crate::comparator::resolve_cell)) rather than observing
//! the batch fill, and snapshots the whole table after every write.
//! Snapshot cost is quadratic in the table size, so this is meant for the
//! small inputs a person steps through by hand.

use crate::comparator::{resolve_cell, traceback, Coord, DpTable, Source};
use std::fmt::Display;

pub const INITIAL_DESCRIPTION: &str = "Initial DP table (all cells set to 0)";

/// One immutable snapshot of the fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub index: usize,
    pub table: DpTable,
    /// Cell written by this step; `None` for the initial snapshot.
    pub cell: Option<Coord>,
    pub source: Option<Source>,
    pub description: String,
    /// Current value of the bottom-right cell. Only meaningful on the last
    /// step: earlier steps read 0 until the last row reaches the last column.
    pub final_cell: u32,
    /// Largest value written so far.
    pub best_so_far: u32,
    /// Traceback cells, set on the last step only.
    pub path: Vec<Coord>,
    /// Cells where the traceback emitted a symbol, last step only.
    pub matched: Vec<Coord>,
    /// `Final result: '<lcs>' (length: <n>)`, last step only.
    pub summary: Option<String>,
}

impl StepRecord {
    pub fn is_initial(&self) -> bool {
        self.cell.is_none()
    }
}

/// Records every cell write of the subsequence fill for `a` and `b`.
///
/// Always returns `a.len() * b.len() + 1` records, the first being the
/// all-zero table. The last record carries the traceback.
pub fn record_steps<T: PartialEq + Clone + Display>(a: &[T], b: &[T]) -> Vec<StepRecord> {
    let (m, n) = (a.len(), b.len());
    let mut table = DpTable::for_inputs(m, n);
    let mut steps = Vec::with_capacity(m * n + 1);
    let mut best_so_far = 0;

    steps.push(StepRecord {
        index: 0,
        table: table.clone(),
        cell: None,
        source: None,
        description: INITIAL_DESCRIPTION.to_string(),
        final_cell: 0,
        best_so_far: 0,
        path: Vec::new(),
        matched: Vec::new(),
        summary: None,
    });

    for i in 1..=m {
        for j in 1..=n {
            let write = resolve_cell(&table, a, b, i, j);
            table.set(i, j, write.value);
            best_so_far = best_so_far.max(write.value);

            let description = match write.source {
                Source::Diagonal => format!(
                    "Match: '{}' at DP[{},{}] = {} (diagonal + 1)",
                    a[i - 1],
                    i,
                    j,
                    write.value
                ),
                Source::Up => format!(
                    "No match: DP[{},{}] = {} (from top cell)",
                    i, j, write.value
                ),
                Source::Left => format!(
                    "No match: DP[{},{}] = {} (from left cell)",
                    i, j, write.value
                ),
            };

            steps.push(StepRecord {
                index: steps.len(),
                table: table.clone(),
                cell: Some((i, j)),
                source: Some(write.source),
                description,
                final_cell: table.final_cell(),
                best_so_far,
                path: Vec::new(),
                matched: Vec::new(),
                summary: None,
            });
        }
    }

    let trace = traceback(&table, a, b);
    let text: String = trace.symbols.iter().map(|s| s.to_string()).collect();
    if let Some(last) = steps.last_mut() {
        last.summary = Some(format!(
            "Final result: '{}' (length: {})",
            text,
            trace.symbols.len()
        ));
        last.path = trace.path;
        last.matched = trace.matched;
    }

    steps
}

/// A materialized recording with clamped random access.
#[derive(Debug, Clone)]
pub struct Recording {
    steps: Vec<StepRecord>,
}

impl Recording {
    pub fn new<T: PartialEq + Clone + Display>(a: &[T], b: &[T]) -> Self {
        Self {
            steps: record_steps(a, b),
        }
    }

    pub fn from_str_pair(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        Self::new(&a, &b)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Never true: a recording always holds the initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.steps.len() - 1)
    }

    /// Step `index`, clamped to the last step.
    pub fn step(&self, index: usize) -> &StepRecord {
        &self.steps[self.clamp(index)]
    }

    pub fn last(&self) -> &StepRecord {
        self.step(usize::MAX)
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }
}
