use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use lcsforge::config::Config;
use lcsforge::error::LcsResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Longest common subsequence: DP engine, oracle and timing harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags typed on the command line override it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate random test cases and save them as JSON
    Generate(cmd::generate::GenerateArgs),
    /// Time the DP engine and the brute force oracle
    Bench(cmd::bench::BenchArgs),
    /// Join a DP-only and a brute-force-only result file
    Merge(cmd::merge::MergeArgs),
    /// Draw the result charts
    Plot(cmd::plot::PlotArgs),
    /// Compare two strings with every algorithm
    Compare(cmd::compare::CompareArgs),
    /// Print one DP table and save it as an image
    Example(cmd::example::ExampleArgs),
    /// Serve the step-by-step table visualizer
    Serve(cmd::serve::ServeArgs),
    /// Check the DP engine against the oracle on random inputs
    Verify(cmd::verify::VerifyArgs),
}

/// File config (when given) with the flags the user actually typed on top.
fn resolve_config(
    path: Option<&str>,
    cli_config: &Config,
    sub_matches: &ArgMatches,
) -> LcsResult<Config> {
    let config = match path {
        Some(p) => {
            info!("📂 Loading config from {}", p);
            let mut file_config = Config::load_from_file(p)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let Some((name, sub_matches)) = matches.subcommand() else {
        error!("No command given");
        process::exit(2);
    };

    // Each subcommand only defines the groups it reads; the rest stay at defaults.
    let cli_config = match &cli.command {
        Commands::Generate(args) => args.config.clone(),
        Commands::Bench(args) => args.config.clone(),
        Commands::Merge(args) => Config {
            output: args.output_paths.clone(),
            ..Config::default()
        },
        Commands::Plot(args) => Config {
            harness: args.harness.clone(),
            output: args.output.clone(),
            ..Config::default()
        },
        Commands::Compare(args) => Config {
            harness: args.harness.clone(),
            ..Config::default()
        },
        Commands::Example(args) => Config {
            output: args.output.clone(),
            ..Config::default()
        },
        Commands::Verify(args) => Config {
            harness: args.harness.clone(),
            ..Config::default()
        },
        Commands::Serve(_) => Config::default(),
    };

    // serve reads no config, so a config file is not even loaded for it.
    let config = if matches!(cli.command, Commands::Serve(_)) {
        cli_config
    } else {
        resolve_config(cli.config.as_deref(), &cli_config, sub_matches).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        })
    };

    let result = match &cli.command {
        Commands::Generate(args) => cmd::generate::run(args, &config),
        Commands::Bench(args) => cmd::bench::run(args, &config),
        Commands::Merge(args) => cmd::merge::run(args, &config),
        Commands::Plot(args) => cmd::plot::run(args, &config),
        Commands::Compare(args) => cmd::compare::run(args, &config),
        Commands::Example(args) => cmd::example::run(args, &config),
        Commands::Serve(args) => cmd::serve::run(args),
        Commands::Verify(args) => cmd::verify::run(args, &config),
    };

    if let Err(e) = result {
        error!("❌ {} failed: {}", name, e);
        process::exit(1);
    }
}
