use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use diffsim_cli::commands::{align_file, simulate_file};
use diffsim_cli::{is_unstable, EXIT_UNSTABLE};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(name = "diffsim")]
#[command(about = "Concentration-dependent diffusion with electromigration", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a simulation described by a JSON file and print the profile as CSV
    Simulate {
        /// Run description
        run: PathBuf,
    },
    /// Align two curves from a JSON file ({"y1": [...], "y2": [...]})
    Align {
        /// Curves to align
        curves: PathBuf,
    },
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = TermLogger::init(
        level(cli.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("warning: logger not installed: {e}");
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = match &cli.command {
        Command::Simulate { run } => simulate_file(run, &mut out),
        Command::Align { curves } => align_file(curves, &mut out),
    }
    .and_then(|()| out.flush().map_err(Into::into));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if is_unstable(&e) {
                ExitCode::from(EXIT_UNSTABLE)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
