use crate::reports;
use clap::Args;
use lcsforge::charts::{self, stats::SpeedupSummary};
use lcsforge::config::Config;
use lcsforge::error::LcsResult;
use lcsforge::harness::{
    load_test_cases, plan_from_cases, size_pairs, HarnessMode, HarnessOptions, ProgressCallback,
    ResultStore, TrialHarness, TrialRecord,
};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long, value_enum, default_value_t = HarnessMode::Combined)]
    pub mode: HarnessMode,

    /// Reuse an existing result file instead of running again.
    #[arg(long, default_value_t = false)]
    pub skip_existing: bool,

    /// Time stored test cases instead of fresh random pairs.
    #[arg(long)]
    pub cases_file: Option<String>,

    /// Result file (default depends on --mode).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Draw the charts when the run finishes.
    #[arg(long, default_value_t = false)]
    pub plot: bool,
}

struct CliProgress;

impl ProgressCallback for CliProgress {
    fn on_trial(&self, done: usize, total: usize, record: &TrialRecord) -> bool {
        println!(
            "[{}/{}] {}x{} (product {}): DP {}  BF {}",
            done,
            total,
            record.str1_length,
            record.str2_length,
            record.product_length,
            reports::fmt_seconds(record.dp_time),
            reports::fmt_seconds(record.brute_force_time),
        );
        true
    }
}

pub fn run(args: &BenchArgs, config: &Config) -> LcsResult<()> {
    let path = args
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.output.data_file(args.mode.default_file_name()));
    let store = ResultStore::new(&path);

    let records = if args.skip_existing && store.exists() {
        println!("📂 Using existing results from {}", path.display());
        store.load()?
    } else {
        let plan = match &args.cases_file {
            Some(file) => {
                let cases = load_test_cases(file)?;
                println!("📂 Loaded {} test cases from {}", cases.len(), file);
                plan_from_cases(&cases)
            }
            None => size_pairs(&config.sizes),
        };

        let mut options = HarnessOptions::from(config);
        options.mode = args.mode;

        println!(
            "⏱️  {} trials, {} mode, {} variant, {} run(s) each",
            plan.len(),
            args.mode,
            options.variant,
            options.runs
        );

        store.clear()?;
        let summary = TrialHarness::new(options).run(&plan, Some(&store), &CliProgress)?;

        println!(
            "\nCompleted {} trials, {} with both algorithms",
            summary.records.len(),
            summary.complete_records().count()
        );
        if let lcsforge::harness::BreakerState::Open { case_id, reason } = &summary.breaker {
            println!("⚠️  Brute force stopped at case {}: {}", case_id, reason);
        }
        println!("💾 Results saved to {}", path.display());
        summary.records
    };

    reports::print_results(&records);
    reports::print_speedup_summary(SpeedupSummary::from_records(&records).as_ref());

    if args.plot {
        charts::init_fonts(config.output.font.as_deref().map(Path::new));
        let written =
            charts::plot_all(&records, config.harness.variant, Path::new(&config.output.figures_dir))?;
        for p in written {
            println!("📈 {}", p.display());
        }
    }
    Ok(())
}
