use clap::Args;
use lcsforge::charts;
use lcsforge::config::{Config, HarnessParams, OutputPaths};
use lcsforge::error::LcsResult;
use lcsforge::harness::{HarnessMode, ResultStore};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub harness: HarnessParams,

    #[command(flatten)]
    pub output: OutputPaths,

    /// Result file (default: <data-dir>/performance_results.csv).
    #[arg(short, long)]
    pub input: Option<String>,
}

pub fn run(args: &PlotArgs, config: &Config) -> LcsResult<()> {
    let path = args
        .input
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.output.data_file(HarnessMode::Combined.default_file_name()));

    let records = ResultStore::new(&path).load()?;
    charts::init_fonts(config.output.font.as_deref().map(Path::new));
    let written = charts::plot_all(
        &records,
        config.harness.variant,
        Path::new(&config.output.figures_dir),
    )?;

    println!("📈 Created {} plots:", written.len());
    for p in written {
        println!("   {}", p.display());
    }
    Ok(())
}
