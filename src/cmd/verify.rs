use clap::Args;
use lcsforge::comparator::{self, is_subsequence, is_substring, subsequence_table, Variant};
use lcsforge::config::{Config, HarnessParams};
use lcsforge::error::{LcsError, LcsResult};
use lcsforge::harness::random_sequence;
use lcsforge::oracle::{self, Deadline};
use lcsforge::recorder::record_steps;
use rayon::prelude::*;
use strum::IntoEnumIterator;
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub harness: HarnessParams,

    /// Random input pairs to check.
    #[arg(long, default_value_t = 500)]
    pub trials: usize,

    /// Longest input drawn (lengths are uniform in 0..=max).
    #[arg(long, default_value_t = 10)]
    pub max_len: usize,
}

/// Every check for one pair; returns the failures.
fn check_pair(a: &[char], b: &[char]) -> LcsResult<Vec<String>> {
    let mut failures = Vec::new();
    let label = || format!("'{}' / '{}'", a.iter().collect::<String>(), b.iter().collect::<String>());

    for variant in Variant::iter() {
        let dp = comparator::run(variant, a, b);
        let bf = oracle::brute_force(variant, a, b, &Deadline::none())?;
        if dp.length != bf.length {
            failures.push(format!(
                "{} {}: DP {} vs brute force {}",
                variant,
                label(),
                dp.length,
                bf.length
            ));
        }

        let embeds = match variant {
            Variant::Subsequence => is_subsequence(&dp.symbols, a) && is_subsequence(&dp.symbols, b),
            Variant::Substring => is_substring(&dp.symbols, a) && is_substring(&dp.symbols, b),
        };
        if !embeds || dp.symbols.len() != dp.length {
            failures.push(format!("{} {}: result does not embed in both inputs", variant, label()));
        }

        if comparator::run(variant, b, a).length != dp.length {
            failures.push(format!("{} {}: length is not symmetric", variant, label()));
        }
    }

    let steps = record_steps(a, b);
    let expected_steps = a.len() * b.len() + 1;
    let final_matches = steps
        .last()
        .is_some_and(|s| s.table == subsequence_table(a, b));
    if steps.len() != expected_steps || !final_matches {
        failures.push(format!("recorder {}: replay differs from the batch fill", label()));
    }

    Ok(failures)
}

pub fn run(args: &VerifyArgs, config: &Config) -> LcsResult<()> {
    let alphabet = config.harness.alphabet_chars();
    let base_seed = config.harness.seed.unwrap_or_else(|| fastrand::u64(..));

    println!(
        "🔍 Checking {} random pairs (length 0..={}, seed {})",
        args.trials, args.max_len, base_seed
    );

    let results: Vec<LcsResult<Vec<String>>> = (0..args.trials)
        .into_par_iter()
        .map(|i| {
            let mut rng = fastrand::Rng::with_seed(base_seed.wrapping_add(i as u64));
            let (len1, len2) = (rng.usize(..=args.max_len), rng.usize(..=args.max_len));
            let a: Vec<char> = random_sequence(&mut rng, len1, &alphabet)?.chars().collect();
            let b: Vec<char> = random_sequence(&mut rng, len2, &alphabet)?.chars().collect();
            debug!("trial {}: {} x {}", i, a.len(), b.len());
            check_pair(&a, &b)
        })
        .collect();

    let mut failures = Vec::new();
    for r in results {
        failures.extend(r?);
    }

    if failures.is_empty() {
        println!("✅ All {} pairs agree", args.trials);
        Ok(())
    } else {
        for f in failures.iter().take(20) {
            println!("❌ {}", f);
        }
        Err(LcsError::Validation(format!(
            "{} conformance failures",
            failures.len()
        )))
    }
}
