use super::generator::random_sequence;
use super::plan::{TrialInputs, TrialSpec};
use super::store::ResultStore;
use super::TrialRecord;
use crate::comparator::{self, Match, Variant};
use crate::config::Config;
use crate::error::{LcsError, LcsResult};
use crate::oracle::{self, Deadline};
use std::any::Any;
use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};
use strum_macros::Display;
use tracing::{debug, info, warn};

/// Which algorithms a harness run times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, clap::ValueEnum)]
#[strum(serialize_all = "snake_case")]
pub enum HarnessMode {
    /// DP on every trial, the oracle on the same inputs until it is cut off.
    Combined,
    #[value(name = "dp")]
    DpOnly,
    #[value(name = "bf")]
    BruteForceOnly,
}

impl HarnessMode {
    pub fn default_file_name(self) -> &'static str {
        match self {
            HarnessMode::Combined => "performance_results.csv",
            HarnessMode::DpOnly => "dp_results.csv",
            HarnessMode::BruteForceOnly => "bf_results.csv",
        }
    }

    pub fn times_dp(self) -> bool {
        !matches!(self, HarnessMode::BruteForceOnly)
    }

    pub fn times_oracle(self) -> bool {
        !matches!(self, HarnessMode::DpOnly)
    }
}

pub struct HarnessOptions {
    pub mode: HarnessMode,
    pub variant: Variant,
    pub runs: usize,
    pub bf_product_ceiling: usize,
    pub bf_deadline: Option<Duration>,
    pub seed: Option<u64>,
    pub alphabet: Vec<char>,
}

impl From<&Config> for HarnessOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            // The config carries no mode; callers choose it.
            mode: HarnessMode::Combined,
            variant: cfg.harness.variant,
            runs: cfg.harness.runs.max(1),
            bf_product_ceiling: cfg.harness.bf_product_ceiling,
            bf_deadline: cfg.harness.bf_deadline(),
            seed: cfg.harness.seed,
            alphabet: cfg.harness.alphabet_chars(),
        }
    }
}

/// Receives each finished trial. Returning `false` stops the run after the
/// current trial has been persisted.
pub trait ProgressCallback {
    fn on_trial(&self, done: usize, total: usize, record: &TrialRecord) -> bool;
}

pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_trial(&self, _done: usize, _total: usize, _record: &TrialRecord) -> bool {
        true
    }
}

/// Oracle circuit breaker. Once open, it stays open for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open { case_id: usize, reason: String },
}

impl BreakerState {
    pub fn is_open(&self) -> bool {
        matches!(self, BreakerState::Open { .. })
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: Vec<TrialRecord>,
    pub oracle_completed: usize,
    /// Trials over the product ceiling.
    pub oracle_skipped: usize,
    pub breaker: BreakerState,
    /// The progress callback stopped the run early.
    pub aborted: bool,
}

impl RunSummary {
    pub fn complete_records(&self) -> impl Iterator<Item = &TrialRecord> {
        self.records.iter().filter(|r| r.is_complete())
    }
}

/// The exhaustive search a harness times.
pub type OracleFn = fn(Variant, &[char], &[char], &Deadline) -> LcsResult<Match<char>>;

pub struct TrialHarness {
    options: HarnessOptions,
    oracle: OracleFn,
}

enum OracleOutcome {
    Timed { seconds: f64, length: usize },
    Failed(String),
}

impl TrialHarness {
    pub fn new(options: HarnessOptions) -> Self {
        Self {
            options,
            oracle: oracle::brute_force::<char>,
        }
    }

    /// Times `oracle` in place of the built-in exhaustive search.
    pub fn with_oracle(mut self, oracle: OracleFn) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }

    /// Executes `plan` in order. When `store` is given, the full result set is
    /// rewritten after every trial.
    pub fn run<CB: ProgressCallback>(
        &self,
        plan: &[TrialSpec],
        store: Option<&ResultStore>,
        callback: &CB,
    ) -> LcsResult<RunSummary> {
        let opts = &self.options;
        let mut rng = match opts.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        info!(
            "Running {} trials ({} mode, {}, {} run(s) each)",
            plan.len(),
            opts.mode,
            opts.variant,
            opts.runs
        );

        let mut summary = RunSummary {
            records: Vec::with_capacity(plan.len()),
            oracle_completed: 0,
            oracle_skipped: 0,
            breaker: BreakerState::Closed,
            aborted: false,
        };

        for trial in plan {
            let (str1, str2) = match &trial.inputs {
                TrialInputs::Generated => (
                    random_sequence(&mut rng, trial.len1, &opts.alphabet)?,
                    random_sequence(&mut rng, trial.len2, &opts.alphabet)?,
                ),
                TrialInputs::Fixed { str1, str2, .. } => (str1.clone(), str2.clone()),
            };
            let a: Vec<char> = str1.chars().collect();
            let b: Vec<char> = str2.chars().collect();

            // Stored cases keep the id from their file.
            let case_id = match &trial.inputs {
                TrialInputs::Fixed { id, .. } => *id,
                TrialInputs::Generated => summary.records.len(),
            };
            let mut record = TrialRecord::new(case_id, a.len(), b.len());
            let mut dp_length = None;

            if opts.mode.times_dp() {
                let (seconds, length) = self.time_dp(&a, &b);
                record.dp_time = Some(seconds);
                dp_length = Some(length);
                debug!(
                    "DP {}x{} (product {}): {:.6}s",
                    a.len(),
                    b.len(),
                    record.product_length,
                    seconds
                );
            }

            if opts.mode.times_oracle() {
                if summary.breaker.is_open() {
                    // Skipped for the rest of the run.
                } else if record.product_length > opts.bf_product_ceiling {
                    summary.oracle_skipped += 1;
                    debug!(
                        "Oracle skipped for product {} (ceiling {})",
                        record.product_length, opts.bf_product_ceiling
                    );
                } else {
                    match self.time_oracle(&a, &b) {
                        OracleOutcome::Timed { seconds, length } => {
                            if let Some(dp_len) = dp_length {
                                if dp_len != length {
                                    return Err(LcsError::Validation(format!(
                                        "DP and oracle disagree on '{}' / '{}': {} vs {}",
                                        str1, str2, dp_len, length
                                    )));
                                }
                            }
                            record.brute_force_time = Some(seconds);
                            summary.oracle_completed += 1;
                        }
                        OracleOutcome::Failed(reason) => {
                            warn!(
                                "Oracle failed on case {} ({}x{}): {}. Skipping it from here on",
                                case_id,
                                a.len(),
                                b.len(),
                                reason
                            );
                            summary.breaker = BreakerState::Open { case_id, reason };
                        }
                    }
                }
            }

            record.refresh_speedup();
            summary.records.push(record);

            if let Some(store) = store {
                store.save(&summary.records)?;
            }

            let done = summary.records.len();
            if let Some(last) = summary.records.last() {
                if !callback.on_trial(done, plan.len(), last) {
                    info!("Run stopped after {} of {} trials", done, plan.len());
                    summary.aborted = true;
                    break;
                }
            }
        }

        info!(
            "Finished: {} trials, {} with oracle timings, {} over the ceiling",
            summary.records.len(),
            summary.oracle_completed,
            summary.oracle_skipped
        );
        Ok(summary)
    }

    fn time_dp(&self, a: &[char], b: &[char]) -> (f64, usize) {
        let runs = self.options.runs.max(1);
        let mut total = 0.0;
        let mut length = 0;
        for _ in 0..runs {
            let start = Instant::now();
            let m = black_box(comparator::run(self.options.variant, black_box(a), black_box(b)));
            total += start.elapsed().as_secs_f64();
            length = m.length;
        }
        (total / runs as f64, length)
    }

    /// Each run gets its own deadline. A deadline miss or a panic ends the
    /// trial as a failure.
    fn time_oracle(&self, a: &[char], b: &[char]) -> OracleOutcome {
        let runs = self.options.runs.max(1);
        let mut total = 0.0;
        let mut length = 0;
        for _ in 0..runs {
            let deadline = Deadline::from_limit(self.options.bf_deadline);
            let start = Instant::now();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                (self.oracle)(self.options.variant, black_box(a), black_box(b), &deadline)
            }));
            let elapsed = start.elapsed().as_secs_f64();

            match outcome {
                Ok(Ok(m)) => {
                    total += elapsed;
                    length = m.length;
                }
                Ok(Err(e)) => return OracleOutcome::Failed(e.to_string()),
                Err(payload) => {
                    return OracleOutcome::Failed(
                        LcsError::OracleAborted(panic_message(payload.as_ref())).to_string(),
                    )
                }
            }
        }
        OracleOutcome::Timed {
            seconds: total / runs as f64,
            length,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SizeRange;
    use crate::harness::plan::size_pairs;

    fn options(mode: HarnessMode) -> HarnessOptions {
        HarnessOptions {
            mode,
            variant: Variant::Subsequence,
            runs: 1,
            bf_product_ceiling: 16,
            bf_deadline: None,
            seed: Some(42),
            alphabet: vec!['A', 'B', 'C'],
        }
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(HarnessMode::DpOnly.to_string(), "dp_only");
        assert_eq!(HarnessMode::Combined.default_file_name(), "performance_results.csv");
    }

    #[test]
    fn test_dp_only_leaves_oracle_missing() {
        let plan = size_pairs(&SizeRange::new(1, 3, 1));
        let summary = TrialHarness::new(options(HarnessMode::DpOnly))
            .run(&plan, None, &SilentProgress)
            .unwrap();
        assert_eq!(summary.records.len(), 9);
        assert!(summary
            .records
            .iter()
            .all(|r| r.dp_time.is_some() && r.brute_force_time.is_none() && r.speedup.is_none()));
    }

    #[test]
    fn test_ceiling_skip_keeps_breaker_closed() {
        let plan = size_pairs(&SizeRange::new(3, 5, 1));
        let summary = TrialHarness::new(options(HarnessMode::Combined))
            .run(&plan, None, &SilentProgress)
            .unwrap();

        assert_eq!(summary.breaker, BreakerState::Closed);
        for r in &summary.records {
            assert_eq!(r.brute_force_time.is_some(), r.product_length <= 16);
        }
        assert!(summary.oracle_skipped > 0);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
    }
}
