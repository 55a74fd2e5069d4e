use lcsforge::comparator::{
    is_subsequence, is_substring, longest_common_subsequence, longest_common_substring,
    subsequence_table, substring_table,
};
use lcsforge::oracle::{brute_force_subsequence, brute_force_substring, Deadline};
use lcsforge::recorder::record_steps;
use proptest::prelude::*;

// --- STRATEGIES ---

// Small alphabets so common subsequences are long enough to be interesting.
prop_compose! {
    fn arb_seq(max_len: usize)(
        v in prop::collection::vec(prop::sample::select(vec!['A', 'B', 'C', 'D']), 0..=max_len)
    ) -> Vec<char> {
        v
    }
}

prop_compose! {
    fn arb_pair()(a in arb_seq(9), b in arb_seq(9)) -> (Vec<char>, Vec<char>) {
        (a, b)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn dp_subsequence_matches_oracle((a, b) in arb_pair()) {
        let dp = longest_common_subsequence(&a, &b);
        let bf = brute_force_subsequence(&a, &b, &Deadline::none()).unwrap();
        prop_assert_eq!(dp.length, bf.length);
    }

    #[test]
    fn dp_substring_matches_oracle((a, b) in arb_pair()) {
        let dp = longest_common_substring(&a, &b);
        let bf = brute_force_substring(&a, &b, &Deadline::none()).unwrap();
        prop_assert_eq!(dp.length, bf.length);
        prop_assert_eq!(dp.symbols, bf.symbols);
    }

    #[test]
    fn subsequence_embeds_in_both((a, b) in arb_pair()) {
        let m = longest_common_subsequence(&a, &b);
        prop_assert_eq!(m.symbols.len(), m.length);
        prop_assert!(is_subsequence(&m.symbols, &a));
        prop_assert!(is_subsequence(&m.symbols, &b));
    }

    #[test]
    fn substring_embeds_in_both((a, b) in arb_pair()) {
        let m = longest_common_substring(&a, &b);
        prop_assert!(is_substring(&m.symbols, &a));
        prop_assert!(is_substring(&m.symbols, &b));
    }

    #[test]
    fn lengths_are_symmetric((a, b) in arb_pair()) {
        prop_assert_eq!(
            longest_common_subsequence(&a, &b).length,
            longest_common_subsequence(&b, &a).length
        );
        prop_assert_eq!(
            longest_common_substring(&a, &b).length,
            longest_common_substring(&b, &a).length
        );
    }

    #[test]
    fn substring_cells_bounded((a, b) in arb_pair()) {
        let fill = substring_table(&a, &b);
        for i in 0..fill.table.rows() {
            for j in 0..fill.table.cols() {
                prop_assert!(fill.table.get(i, j) as usize <= i.min(j));
            }
        }
    }

    #[test]
    fn recorder_replays_batch_fill((a, b) in arb_pair()) {
        let steps = record_steps(&a, &b);
        prop_assert_eq!(steps.len(), a.len() * b.len() + 1);

        let last = steps.last().unwrap();
        prop_assert_eq!(&last.table, &subsequence_table(&a, &b));
        prop_assert_eq!(last.matched.len() as u32, last.final_cell);
        prop_assert_eq!(last.best_so_far, last.final_cell);
    }

    #[test]
    fn identical_inputs_match_fully(a in arb_seq(12)) {
        prop_assert_eq!(longest_common_subsequence(&a, &a).symbols, a.clone());
        prop_assert_eq!(longest_common_substring(&a, &a).length, a.len());
    }

    #[test]
    fn reversed_input_agrees_with_oracle(a in arb_seq(9)) {
        let r: Vec<char> = a.iter().rev().copied().collect();
        let dp = longest_common_subsequence(&a, &r);
        let bf = brute_force_subsequence(&a, &r, &Deadline::none()).unwrap();
        prop_assert_eq!(dp.length, bf.length);
    }
}

#[test]
fn disjoint_inputs_have_empty_answers() {
    let a: Vec<char> = "ABAB".chars().collect();
    let b: Vec<char> = "CDCD".chars().collect();
    assert_eq!(longest_common_subsequence(&a, &b).length, 0);
    assert_eq!(brute_force_subsequence(&a, &b, &Deadline::none()).unwrap().length, 0);
    assert_eq!(brute_force_substring(&a, &b, &Deadline::none()).unwrap().length, 0);
}
