//! Timing harness: random inputs of controlled size, DP and oracle runs,
//! and the CSV result set they produce.

pub mod generator;
pub mod plan;
pub mod runner;
pub mod store;

pub use self::generator::{
    generate_test_cases, load_test_cases, random_sequence, save_test_cases, TestCase,
};
pub use self::plan::{plan_from_cases, size_pairs, TrialInputs, TrialSpec};
pub use self::runner::{
    BreakerState, HarnessMode, HarnessOptions, OracleFn, ProgressCallback, RunSummary,
    SilentProgress, TrialHarness,
};
pub use self::store::{merge_passes, ResultStore};

use serde::{Deserialize, Serialize};

/// One row of the result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub case_id: usize,
    pub str1_length: usize,
    pub str2_length: usize,
    pub product_length: usize,
    #[serde(with = "na_marker")]
    pub brute_force_time: Option<f64>,
    #[serde(with = "na_marker")]
    pub dp_time: Option<f64>,
    #[serde(with = "na_marker")]
    pub speedup: Option<f64>,
}

impl TrialRecord {
    pub const HEADERS: [&'static str; 7] = [
        "case_id",
        "str1_length",
        "str2_length",
        "product_length",
        "brute_force_time",
        "dp_time",
        "speedup",
    ];

    pub fn new(case_id: usize, len1: usize, len2: usize) -> Self {
        Self {
            case_id,
            str1_length: len1,
            str2_length: len2,
            product_length: len1 * len2,
            brute_force_time: None,
            dp_time: None,
            speedup: None,
        }
    }

    /// Both timings present.
    pub fn is_complete(&self) -> bool {
        self.brute_force_time.is_some() && self.dp_time.is_some()
    }

    /// Recomputes `speedup` from the two timings, clearing it if either is missing.
    pub fn refresh_speedup(&mut self) {
        self.speedup = match (self.brute_force_time, self.dp_time) {
            (Some(bf), Some(dp)) => Some(speedup(bf, dp)),
            _ => None,
        };
    }
}

/// Brute force time over DP time; infinite when the DP time rounds to zero.
pub fn speedup(bf_time: f64, dp_time: f64) -> f64 {
    if dp_time > 0.0 {
        bf_time / dp_time
    } else {
        f64::INFINITY
    }
}

/// Optional measurements in CSV: `NA` for a missing value, `inf` for an
/// unbounded ratio. Empty fields read back as missing too.
pub mod na_marker {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const NA: &str = "NA";

    pub fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            None => s.serialize_str(NA),
            Some(v) if v.is_infinite() && *v > 0.0 => s.serialize_str("inf"),
            Some(v) if v.is_infinite() => s.serialize_str("-inf"),
            Some(v) => s.serialize_f64(*v),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();
        if raw.is_empty() || raw == NA {
            return Ok(None);
        }
        raw.parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid measurement '{}'", raw)))
    }
}
