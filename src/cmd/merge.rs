use crate::reports;
use clap::Args;
use lcsforge::charts::stats::SpeedupSummary;
use lcsforge::config::{Config, OutputPaths};
use lcsforge::error::LcsResult;
use lcsforge::harness::{merge_passes, HarnessMode, ResultStore};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[command(flatten)]
    pub output_paths: OutputPaths,

    /// DP-only results (default: <data-dir>/dp_results.csv).
    #[arg(long)]
    pub dp: Option<String>,

    /// Brute-force-only results (default: <data-dir>/bf_results.csv).
    #[arg(long)]
    pub bf: Option<String>,

    /// Merged file (default: <data-dir>/performance_results.csv).
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(args: &MergeArgs, config: &Config) -> LcsResult<()> {
    let resolve = |given: &Option<String>, mode: HarnessMode| {
        given
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| config.output.data_file(mode.default_file_name()))
    };

    let dp = ResultStore::new(resolve(&args.dp, HarnessMode::DpOnly)).load()?;
    let bf = ResultStore::new(resolve(&args.bf, HarnessMode::BruteForceOnly)).load()?;
    let merged = merge_passes(&dp, &bf);

    let out = ResultStore::new(resolve(&args.output, HarnessMode::Combined));
    out.save(&merged)?;
    println!(
        "🔗 Merged {} DP rows and {} brute force rows into {} length pairs -> {}",
        dp.len(),
        bf.len(),
        merged.len(),
        out.path().display()
    );

    reports::print_results(&merged);
    reports::print_speedup_summary(SpeedupSummary::from_records(&merged).as_ref());
    Ok(())
}
