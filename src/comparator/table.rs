use std::fmt;
use std::ops::Index;

/// A table coordinate, `(row, column)`.
pub type Coord = (usize, usize);

/// Row-major grid of subproblem values.
///
/// Row 0 and column 0 are the boundary and stay at 0 for both recurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpTable {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl DpTable {
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Table sized for inputs of length `m` and `n`: `(m + 1) x (n + 1)`.
    pub fn for_inputs(m: usize, n: usize) -> Self {
        Self::zeroed(m + 1, n + 1)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: u32) {
        self.cells[i * self.cols + j] = value;
    }

    pub fn row(&self, i: usize) -> &[u32] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// Bottom-right cell. Holds the subsequence answer once the fill is done.
    pub fn final_cell(&self) -> u32 {
        if self.cells.is_empty() {
            0
        } else {
            self.cells[self.cells.len() - 1]
        }
    }

    pub fn max_cell(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }
}

impl Index<Coord> for DpTable {
    type Output = u32;

    fn index(&self, (i, j): Coord) -> &u32 {
        &self.cells[i * self.cols + j]
    }
}

impl fmt::Display for DpTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let line: Vec<String> = self.row(i).iter().map(|v| format!("{:>3}", v)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_zeroed() {
        let table = DpTable::for_inputs(3, 2);
        assert_eq!(table.rows(), 4);
        assert_eq!(table.cols(), 3);
        assert!(table.to_rows().iter().flatten().all(|&v| v == 0));
    }

    #[test]
    fn test_index_matches_get() {
        let mut table = DpTable::for_inputs(2, 2);
        table.set(2, 1, 7);
        assert_eq!(table[(2, 1)], 7);
        assert_eq!(table.get(2, 1), 7);
        assert_eq!(table.row(2), &[0, 7, 0]);
        assert_eq!(table.max_cell(), 7);
    }
}
