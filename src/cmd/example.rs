use crate::reports;
use clap::Args;
use lcsforge::charts::{self, DP_TABLE_CHART};
use lcsforge::config::{Config, OutputPaths};
use lcsforge::error::LcsResult;
use lcsforge::recorder::Recording;
use std::path::Path;

#[derive(Args, Debug, Clone)]
pub struct ExampleArgs {
    #[command(flatten)]
    pub output: OutputPaths,

    #[arg(long, default_value = "abcdef")]
    pub str1: String,

    #[arg(long, default_value = "acbcf")]
    pub str2: String,

    /// Show the table as it was after this many writes (default: finished).
    #[arg(long)]
    pub at_step: Option<usize>,

    /// Print only; do not write the image.
    #[arg(long, default_value_t = false)]
    pub no_image: bool,
}

pub fn run(args: &ExampleArgs, config: &Config) -> LcsResult<()> {
    let a: Vec<char> = args.str1.chars().collect();
    let b: Vec<char> = args.str2.chars().collect();
    let recording = Recording::new(&a, &b);
    let step = match args.at_step {
        Some(i) => recording.step(i),
        None => recording.last(),
    };

    println!("String 1: '{}'", args.str1);
    println!("String 2: '{}'", args.str2);
    reports::print_dp_table(&a, &b, step);
    println!(
        "Step {} of {}: {}",
        step.index,
        recording.len() - 1,
        step.description
    );
    if let Some(summary) = &step.summary {
        println!("{}", summary);
    }

    if !args.no_image {
        charts::init_fonts(config.output.font.as_deref().map(Path::new));
        let out = Path::new(&config.output.figures_dir).join(DP_TABLE_CHART);
        charts::dp_table_heatmap(&step.table, &a, &b, &step.path, &out)?;
        println!("🖼️  Saved DP table visualization to {}", out.display());
    }
    Ok(())
}
