use crate::reports::{self, ComparisonRow};
use clap::Args;
use lcsforge::comparator::{self, Variant};
use lcsforge::config::{Config, HarnessParams};
use lcsforge::error::{LcsError, LcsResult};
use lcsforge::oracle::{self, Deadline};
use std::time::Instant;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub harness: HarnessParams,

    #[arg(long, default_value = "ABCBDAB")]
    pub str1: String,

    #[arg(long, default_value = "BDCABA")]
    pub str2: String,
}

pub fn run(args: &CompareArgs, config: &Config) -> LcsResult<()> {
    let a: Vec<char> = args.str1.chars().collect();
    let b: Vec<char> = args.str2.chars().collect();
    let product = a.len() * b.len();
    let run_oracle = product <= config.harness.bf_product_ceiling;

    println!("String 1: '{}'", args.str1);
    println!("String 2: '{}'", args.str2);

    let mut rows = Vec::new();
    for variant in Variant::iter() {
        let start = Instant::now();
        let dp = comparator::run(variant, &a, &b);
        rows.push(ComparisonRow {
            variant,
            algorithm: "dynamic programming",
            result: dp.as_string(),
            length: Some(dp.length),
            seconds: Some(start.elapsed().as_secs_f64()),
        });

        if !run_oracle {
            rows.push(ComparisonRow {
                variant,
                algorithm: "brute force",
                result: format!("skipped (product {} > {})", product, config.harness.bf_product_ceiling),
                length: None,
                seconds: None,
            });
            continue;
        }

        let deadline = Deadline::from_limit(config.harness.bf_deadline());
        let start = Instant::now();
        match oracle::brute_force(variant, &a, &b, &deadline) {
            Ok(bf) => {
                if bf.length != dp.length {
                    return Err(LcsError::Validation(format!(
                        "{} lengths disagree: DP {} vs brute force {}",
                        variant, dp.length, bf.length
                    )));
                }
                rows.push(ComparisonRow {
                    variant,
                    algorithm: "brute force",
                    result: bf.as_string(),
                    length: Some(bf.length),
                    seconds: Some(start.elapsed().as_secs_f64()),
                });
            }
            Err(e) => rows.push(ComparisonRow {
                variant,
                algorithm: "brute force",
                result: e.to_string(),
                length: None,
                seconds: None,
            }),
        }
    }

    reports::print_comparison(&rows);
    Ok(())
}
