use super::rng_for;
use clap::Args;
use lcsforge::config::Config;
use lcsforge::error::LcsResult;
use lcsforge::harness::{generate_test_cases, save_test_cases};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Output file (default: <data-dir>/test_cases.json).
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(args: &GenerateArgs, config: &Config) -> LcsResult<()> {
    let path = args
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.output.test_cases_file());

    println!(
        "🎲 Generating test cases from length {} to {} (step {}), {} per pair",
        config.sizes.min_length, config.sizes.max_length, config.sizes.step, config.generation.cases
    );

    let mut rng = rng_for(config.harness.seed);
    let cases = generate_test_cases(
        &config.sizes,
        config.generation.cases,
        &config.harness.alphabet_chars(),
        &mut rng,
    )?;
    save_test_cases(&path, &cases)?;

    println!("✅ Generated {} test cases -> {}", cases.len(), path.display());
    Ok(())
}
