use lcsforge::comparator::{Match, Variant};
use lcsforge::config::{Config, SizeRange};
use lcsforge::error::LcsResult;
use lcsforge::harness::{
    load_test_cases, plan_from_cases, save_test_cases, size_pairs, BreakerState, HarnessMode,
    HarnessOptions, ProgressCallback, ResultStore, SilentProgress, TestCase, TrialHarness,
    TrialRecord,
};
use lcsforge::oracle::Deadline;
use std::cell::Cell;
use std::time::Duration;
use tempfile::tempdir;

fn options(mode: HarnessMode) -> HarnessOptions {
    HarnessOptions {
        mode,
        variant: Variant::Subsequence,
        runs: 2,
        bf_product_ceiling: 100,
        bf_deadline: None,
        seed: Some(1234),
        alphabet: vec!['A', 'B', 'C', 'D'],
    }
}

#[test]
fn test_options_from_config() {
    let mut config = Config::default();
    config.harness.bf_deadline_ms = 0;
    config.harness.variant = Variant::Substring;
    let opts = HarnessOptions::from(&config);
    assert_eq!(opts.bf_deadline, None);
    assert_eq!(opts.variant, Variant::Substring);
    assert_eq!(opts.alphabet.len(), 52);
    assert_eq!(opts.mode, HarnessMode::Combined);
}

#[test]
fn test_combined_run_persists_every_trial() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path().join("nested").join("performance_results.csv"));
    let plan = size_pairs(&SizeRange::new(2, 4, 1));

    let summary = TrialHarness::new(options(HarnessMode::Combined))
        .run(&plan, Some(&store), &SilentProgress)
        .unwrap();

    assert_eq!(summary.records.len(), 9);
    assert_eq!(summary.oracle_completed, 9);
    assert_eq!(summary.breaker, BreakerState::Closed);

    let products: Vec<_> = summary.records.iter().map(|r| r.product_length).collect();
    let mut sorted = products.clone();
    sorted.sort();
    assert_eq!(products, sorted);

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 9);
    assert!(loaded.iter().all(TrialRecord::is_complete));
    assert!(loaded.iter().all(|r| r.speedup.is_some()));
}

#[test]
fn test_zero_deadline_trips_breaker_for_the_rest_of_the_run() {
    let mut opts = options(HarnessMode::Combined);
    opts.bf_deadline = Some(Duration::ZERO);
    let plan = size_pairs(&SizeRange::new(1, 3, 1));

    let summary = TrialHarness::new(opts)
        .run(&plan, None, &SilentProgress)
        .unwrap();

    assert!(matches!(summary.breaker, BreakerState::Open { case_id: 0, .. }));
    assert_eq!(summary.oracle_completed, 0);
    assert!(summary
        .records
        .iter()
        .all(|r| r.brute_force_time.is_none() && r.dp_time.is_some()));
}

#[test]
fn test_ceiling_skips_without_tripping() {
    let mut opts = options(HarnessMode::BruteForceOnly);
    opts.bf_product_ceiling = 4;
    let plan = size_pairs(&SizeRange::new(1, 3, 1));

    let summary = TrialHarness::new(opts)
        .run(&plan, None, &SilentProgress)
        .unwrap();

    assert_eq!(summary.breaker, BreakerState::Closed);
    for r in &summary.records {
        assert!(r.dp_time.is_none());
        assert_eq!(r.brute_force_time.is_some(), r.product_length <= 4);
    }
    assert_eq!(summary.oracle_skipped, 3);
}

struct StopAfter {
    limit: usize,
    seen: Cell<usize>,
}

impl ProgressCallback for StopAfter {
    fn on_trial(&self, done: usize, _total: usize, _record: &TrialRecord) -> bool {
        self.seen.set(done);
        done < self.limit
    }
}

#[test]
fn test_callback_can_stop_the_run() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path().join("dp_results.csv"));
    let plan = size_pairs(&SizeRange::new(1, 5, 1));
    let cb = StopAfter {
        limit: 3,
        seen: Cell::new(0),
    };

    let summary = TrialHarness::new(options(HarnessMode::DpOnly))
        .run(&plan, Some(&store), &cb)
        .unwrap();

    assert!(summary.aborted);
    assert_eq!(cb.seen.get(), 3);
    assert_eq!(store.load().unwrap().len(), 3);
}

#[test]
fn test_fixed_cases_round_trip_through_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test_cases.json");
    let cases = vec![
        TestCase::new(0, "ABCBDAB".into(), "BDCABA".into()),
        TestCase::new(1, "AB".into(), "BA".into()),
    ];
    save_test_cases(&path, &cases).unwrap();
    let loaded = load_test_cases(&path).unwrap();
    assert_eq!(loaded, cases);

    let summary = TrialHarness::new(options(HarnessMode::Combined))
        .run(&plan_from_cases(&loaded), None, &SilentProgress)
        .unwrap();
    assert_eq!(summary.records[0].product_length, 4);
    assert_eq!(summary.records[1].product_length, 42);
    // Rows keep the ids from the case file, not their run order.
    assert_eq!(summary.records[0].case_id, 1);
    assert_eq!(summary.records[1].case_id, 0);
}

fn exploding_oracle(
    _variant: Variant,
    _a: &[char],
    _b: &[char],
    _deadline: &Deadline,
) -> LcsResult<Match<char>> {
    panic!("oracle blew up")
}

#[test]
fn test_oracle_panic_trips_breaker() {
    let plan = size_pairs(&SizeRange::new(1, 3, 1));

    let summary = TrialHarness::new(options(HarnessMode::Combined))
        .with_oracle(exploding_oracle)
        .run(&plan, None, &SilentProgress)
        .unwrap();

    match &summary.breaker {
        BreakerState::Open { case_id, reason } => {
            assert_eq!(*case_id, 0);
            assert!(reason.contains("oracle blew up"), "reason: {}", reason);
        }
        BreakerState::Closed => panic!("breaker stayed closed"),
    }
    assert_eq!(summary.records.len(), 9);
    assert_eq!(summary.oracle_completed, 0);
    assert!(summary
        .records
        .iter()
        .all(|r| r.brute_force_time.is_none() && r.dp_time.is_some()));
}

#[test]
fn test_case_file_with_wrong_lengths_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"[{"id": 0, "str1": "ABC", "str2": "AB", "len1": 5, "len2": 2}]"#,
    )
    .unwrap();
    assert!(load_test_cases(&path).is_err());
}
