//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{check, init, models, status, version};

const BANNER: &str = r"
 ___ ___ ___ ___ ___ ___ _ _
| __| _ \ __/ __|_ _| __| | |
|__ \  _/ _| (__ | || _||_  |
|___/_| |___\___|___|_|   |_|
";

const TAGLINE: &str = "Spec-Driven Development Toolkit";

#[derive(Parser)]
#[command(name = "specify")]
#[command(author, version, about = "Setup tool for Specify spec-driven development projects")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new Specify project from the latest template
    Init(init::InitArgs),

    /// Show workflow artifact status for the current project
    Status,

    /// List available GitHub Models
    ListModels(models::ListModelsArgs),

    /// Check that required tools are installed
    Check,

    /// Show version and cache information
    Version,
}

/// Prints the banner (text mode only; JSON consumers get clean output)
pub fn show_banner(output: &Output) {
    if output.is_text() {
        println!("{}", BANNER.trim_end_matches(' '));
        println!("{}\n", TAGLINE);
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Specify CLI starting");

    let Some(command) = cli.command else {
        show_banner(&output);
        println!("Run 'specify --help' for usage information");
        return Ok(());
    };

    match command {
        Commands::Init(args) => {
            show_banner(&output);
            init::run(&output, args)?;
        }

        Commands::Status => {
            status::run(&output)?;
        }

        Commands::ListModels(args) => {
            show_banner(&output);
            models::run(&output, args)?;
        }

        Commands::Check => {
            show_banner(&output);
            check::run(&output)?;
        }

        Commands::Version => {
            show_banner(&output);
            version::run(&output)?;
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
