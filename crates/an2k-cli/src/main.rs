/// ANSI/NIST transaction command-line tool — inspect, validate and
/// probe `.an2` / `.nist` / `.eft` files.
///
/// # Command overview
///
/// ```text
/// an2k <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print a human-readable record summary of a transaction file
///   validate   Check a transaction file for structural correctness
///   probe      Classify an image payload and print its metadata as JSON
///   help       Print help information
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_inspect;
mod cmd_probe;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The ANSI/NIST transaction file CLI.
#[derive(Parser)]
#[command(name = "an2k", version, about = "ANSI/NIST transaction file CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print a human-readable summary of each record in a file.
    Inspect(InspectArgs),
    /// Check a file for structural correctness.
    Validate(ValidateArgs),
    /// Classify an image payload and print its metadata as JSON.
    Probe(ProbeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `an2k inspect`.
///
/// Decodes the file and prints one line per record (type tag, label,
/// IDC, declared length). `--show-fields` adds a per-field listing with
/// text values and image-byte counts.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the transaction file to inspect.
    pub file: PathBuf,

    /// List every field of every record.
    #[arg(long)]
    pub show_fields: bool,
}

/// Arguments for `an2k validate`.
///
/// Attempts a full decode, then re-checks the directory and length
/// invariants against a fresh serialization. Exit code 0 on a valid
/// file, 1 on any structural problem.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the transaction file to validate.
    pub file: PathBuf,
}

/// Arguments for `an2k probe`.
///
/// Runs the image-header prober on a standalone payload (JPEG, PNG,
/// JPEG 2000 or WSQ) and prints the extracted metadata as JSON.
#[derive(clap::Args)]
pub struct ProbeArgs {
    /// Path to the image payload.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Probe(args) => cmd_probe::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
