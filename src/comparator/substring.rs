use super::table::DpTable;
use super::Match;

/// Result of filling a longest-common-run table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringFill {
    pub table: DpTable,
    pub max_length: u32,
    /// Exclusive end of the best run inside the first input.
    pub end_index: usize,
}

/// Fills the run-length table: a match extends the diagonal run, anything
/// else resets the cell to 0.
///
/// The first maximum in row-major order is kept, so among equally long runs
/// the one ending earliest in `a` wins.
pub fn substring_table<T: PartialEq>(a: &[T], b: &[T]) -> SubstringFill {
    let mut table = DpTable::for_inputs(a.len(), b.len());
    let mut max_length = 0;
    let mut end_index = 0;

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            if a[i - 1] != b[j - 1] {
                continue;
            }
            let run = table.get(i - 1, j - 1) + 1;
            table.set(i, j, run);
            if run > max_length {
                max_length = run;
                end_index = i;
            }
        }
    }

    SubstringFill {
        table,
        max_length,
        end_index,
    }
}

/// Longest contiguous run shared by `a` and `b`, sliced out of `a`.
pub fn longest_common_substring<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Match<T> {
    if a.is_empty() || b.is_empty() {
        return Match::empty();
    }

    let fill = substring_table(a, b);
    let length = fill.max_length as usize;
    let start = fill.end_index - length;

    Match {
        symbols: a[start..fill.end_index].to_vec(),
        length,
    }
}

pub fn substring_str(a: &str, b: &str) -> (String, usize) {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    longest_common_substring(&a, &b).into_pair()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_resets_on_mismatch() {
        let a: Vec<char> = "ABXAB".chars().collect();
        let b: Vec<char> = "AB".chars().collect();
        let fill = substring_table(&a, &b);

        assert_eq!(fill.table.get(2, 2), 2);
        assert_eq!(fill.table.get(3, 2), 0);
        assert_eq!(fill.table.get(5, 2), 2);
        assert_eq!(fill.max_length, 2);
        assert_eq!(fill.end_index, 2);
    }

    #[test]
    fn test_best_run_need_not_end_bottom_right() {
        assert_eq!(substring_str("ABABC", "BABCA"), ("BABC".to_string(), 4));
        assert_eq!(substring_str("XYZ", "ABC"), (String::new(), 0));
        assert_eq!(substring_str("", "ABC"), (String::new(), 0));
    }
}
