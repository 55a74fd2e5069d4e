use lcsforge::comparator::{
    compare, is_subsequence, lcs_str, longest_common_subsequence, subsequence_table,
    substring_str, substring_table, traceback, Variant,
};
use rstest::rstest;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[rstest]
#[case("ABCBDAB", "BDCABA", "BCBA", 4)]
#[case("BDCABA", "ABCBDAB", "BDAB", 4)]
#[case("", "XYZ", "", 0)]
#[case("XYZ", "", "", 0)]
#[case("ABCDE", "ACE", "ACE", 3)]
#[case("AAAA", "AA", "AA", 2)]
#[case("ABC", "DEF", "", 0)]
#[case("SAME", "SAME", "SAME", 4)]
#[case("AB", "BA", "A", 1)] // tie at (2,2) goes up
fn test_subsequence_scenarios(
    #[case] a: &str,
    #[case] b: &str,
    #[case] expected: &str,
    #[case] length: usize,
) {
    assert_eq!(lcs_str(a, b), (expected.to_string(), length));
}

#[rstest]
#[case("ABABC", "BABCA", "BABC", 4)]
#[case("ABCDE", "ACE", "A", 1)]
#[case("", "ABC", "", 0)]
#[case("XYZ", "ABC", "", 0)]
#[case("ZZABCZZ", "QABCQ", "ABC", 3)]
fn test_substring_scenarios(
    #[case] a: &str,
    #[case] b: &str,
    #[case] expected: &str,
    #[case] length: usize,
) {
    assert_eq!(substring_str(a, b), (expected.to_string(), length));
}

#[test]
fn test_variant_dispatch_is_explicit() {
    assert_eq!(compare(Variant::Subsequence, "ABABC", "BABCA").1, 4);
    assert_eq!(compare(Variant::Substring, "ABCBDAB", "BDCABA").1, 2);
}

#[test]
fn test_traceback_path_follows_recurrence() {
    let (a, b) = (chars("ABCBDAB"), chars("BDCABA"));
    let table = subsequence_table(&a, &b);
    let trace = traceback(&table, &a, &b);

    assert_eq!(trace.path.first(), Some(&(7, 6)));
    for window in trace.path.windows(2) {
        let ((i, j), (ni, nj)) = (window[0], window[1]);
        if a[i - 1] == b[j - 1] {
            assert_eq!((ni, nj), (i - 1, j - 1));
        } else {
            assert!(table.get(ni, nj) == table.get(i, j));
            assert!((ni, nj) == (i - 1, j) || (ni, nj) == (i, j - 1));
        }
    }
    assert_eq!(trace.matched.len(), 4);
}

#[test]
fn test_result_embeds_in_both_inputs() {
    let (a, b) = (chars("AGGTAB"), chars("GXTXAYB"));
    let m = longest_common_subsequence(&a, &b);
    assert_eq!(m.length, 4);
    assert!(is_subsequence(&m.symbols, &a));
    assert!(is_subsequence(&m.symbols, &b));
}

#[test]
fn test_substring_table_resets() {
    let fill = substring_table(&chars("ABAB"), &chars("BABA"));
    for i in 0..fill.table.rows() {
        for j in 0..fill.table.cols() {
            assert!(fill.table.get(i, j) as usize <= i.min(j));
        }
    }
    assert_eq!(fill.max_length, 3);
}

#[test]
fn test_generic_symbols() {
    let a = [3u32, 1, 4, 1, 5, 9, 2, 6];
    let b = [1u32, 4, 5, 9, 6];
    let m = longest_common_subsequence(&a, &b);
    assert_eq!(m.symbols, vec![1, 4, 5, 9, 6]);
}
