use crate::comparator::Variant;
use crate::error::{LcsError, LcsResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const ASCII_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub sizes: SizeRange,
    #[command(flatten)]
    pub harness: HarnessParams,
    #[command(flatten)]
    pub generation: GenerationParams,
    #[command(flatten)]
    pub output: OutputPaths,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeRange {
    #[arg(long, default_value_t = 10)]
    pub min_length: usize,
    #[arg(long, default_value_t = 30)]
    pub max_length: usize,
    #[arg(long, default_value_t = 1)]
    pub step: usize,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self {
            min_length: 10,
            max_length: 30,
            step: 1,
        }
    }
}

impl SizeRange {
    pub fn new(min_length: usize, max_length: usize, step: usize) -> Self {
        Self {
            min_length,
            max_length,
            step,
        }
    }

    pub fn lengths(&self) -> Vec<usize> {
        if self.step == 0 || self.min_length > self.max_length {
            return Vec::new();
        }
        (self.min_length..=self.max_length)
            .step_by(self.step)
            .collect()
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessParams {
    /// Which question every algorithm in the run answers.
    #[arg(long, value_enum, default_value_t = Variant::Subsequence)]
    pub variant: Variant,

    /// Timed repetitions per trial; the mean is reported.
    #[arg(long, default_value_t = 1)]
    pub runs: usize,

    /// Brute force is skipped for trials whose length product exceeds this.
    #[arg(long, default_value_t = 900)]
    pub bf_product_ceiling: usize,

    /// Per-run brute force deadline in milliseconds (0 disables it).
    #[arg(long, default_value_t = 10_000)]
    pub bf_deadline_ms: u64,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = ASCII_LETTERS)]
    pub alphabet: String,
}

impl Default for HarnessParams {
    fn default() -> Self {
        Self {
            variant: Variant::Subsequence,
            runs: 1,
            bf_product_ceiling: 900,
            bf_deadline_ms: 10_000,
            seed: None,
            alphabet: ASCII_LETTERS.to_string(),
        }
    }
}

impl HarnessParams {
    pub fn bf_deadline(&self) -> Option<Duration> {
        if self.bf_deadline_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.bf_deadline_ms))
        }
    }

    pub fn alphabet_chars(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Test cases generated per size combination.
    #[arg(long, default_value_t = 3)]
    pub cases: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { cases: 3 }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    #[arg(long, default_value = "data")]
    pub data_dir: String,
    #[arg(long, default_value = "figures")]
    pub figures_dir: String,
    /// TrueType font used for chart text. Searched in common system
    /// locations when unset.
    #[arg(long)]
    pub font: Option<String>,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            figures_dir: "figures".to_string(),
            font: None,
        }
    }
}

impl OutputPaths {
    pub fn data_file(&self, name: &str) -> PathBuf {
        Path::new(&self.data_dir).join(name)
    }

    pub fn figure_file(&self, name: &str) -> PathBuf {
        Path::new(&self.figures_dir).join(name)
    }

    pub fn test_cases_file(&self) -> PathBuf {
        self.data_file("test_cases.json")
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LcsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LcsError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every flag the user actually typed over the file-loaded values.
    /// Flags the subcommand does not define are skipped.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        let defined: HashSet<&str> = matches.ids().map(|id| id.as_str()).collect();

        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if defined.contains(stringify!($field))
                    && matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine)
                {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(sizes.min_length);
        update_if_present!(sizes.max_length);
        update_if_present!(sizes.step);

        update_if_present!(harness.variant);
        update_if_present!(harness.runs);
        update_if_present!(harness.bf_product_ceiling);
        update_if_present!(harness.bf_deadline_ms);
        update_if_present!(harness.seed);
        update_if_present!(harness.alphabet);

        update_if_present!(generation.cases);

        update_if_present!(output.data_dir);
        update_if_present!(output.figures_dir);
        update_if_present!(output.font);
    }

    pub fn validate(&self) -> LcsResult<()> {
        if self.sizes.step == 0 {
            return Err(LcsError::Config("--step must be at least 1".to_string()));
        }
        if self.sizes.min_length > self.sizes.max_length {
            return Err(LcsError::Config(format!(
                "--min-length ({}) is larger than --max-length ({})",
                self.sizes.min_length, self.sizes.max_length
            )));
        }
        if self.harness.alphabet.is_empty() {
            return Err(LcsError::Config("--alphabet must not be empty".to_string()));
        }
        if self.harness.runs == 0 {
            return Err(LcsError::Config("--runs must be at least 1".to_string()));
        }
        Ok(())
    }
}
