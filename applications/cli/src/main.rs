/// Wavedit - glitch and crunch effects for WAVE files
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wavedit_cli::{build_chain, commands, parse_region, WaveditConfig};
use wavedit_effects::GlitchRegion;

#[derive(Parser)]
#[command(name = "wavedit")]
#[command(about = "Glitch and crunch effects for WAVE files", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./wavedit.toml if present)
    #[arg(short, long, global = true, env = "WAVEDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the format of a wave file
    Info {
        /// Input wave file
        input: PathBuf,
    },
    /// Apply the crunch waveshaper to the whole file
    Crunch {
        /// Input wave file
        input: PathBuf,
        /// Output wave file
        output: PathBuf,
        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Glitch one or more regions
    Glitch {
        /// Input wave file
        input: PathBuf,
        /// Output wave file
        output: PathBuf,
        /// Region as start:end:beat in seconds (repeatable)
        #[arg(short, long = "region", value_parser = parse_region, required = true)]
        regions: Vec<GlitchRegion>,
        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Crunch the whole file, then glitch the given regions
    Process {
        /// Input wave file
        input: PathBuf,
        /// Output wave file
        output: PathBuf,
        /// Region as start:end:beat in seconds (repeatable)
        #[arg(short, long = "region", value_parser = parse_region)]
        regions: Vec<GlitchRegion>,
        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "wavedit=debug,wavedit_cli=debug,wavedit_effects=debug,wavedit_wave=debug,wavedit_riff=debug"
    } else {
        "wavedit=info,wavedit_cli=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WaveditConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Info { input } => {
            println!("{}", commands::info(&input)?);
        }
        Commands::Crunch {
            input,
            output,
            force,
        } => {
            let mut chain = build_chain(&config, true, Vec::new())?;
            commands::run(&mut chain, &input, &output, force || config.output.overwrite)?;
        }
        Commands::Glitch {
            input,
            output,
            regions,
            force,
        } => {
            let mut chain = build_chain(&config, false, regions)?;
            commands::run(&mut chain, &input, &output, force || config.output.overwrite)?;
        }
        Commands::Process {
            input,
            output,
            regions,
            force,
        } => {
            let mut chain = build_chain(&config, true, regions)?;
            commands::run(&mut chain, &input, &output, force || config.output.overwrite)?;
        }
    }

    Ok(())
}
