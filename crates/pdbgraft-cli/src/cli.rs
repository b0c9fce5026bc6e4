use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pdbgraft - Graft residues between PDB structures as described by a TOML plan.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the plan file in TOML format.
    #[arg(value_name = "PLAN")]
    pub plan: PathBuf,

    /// Load structures and apply every operation, but write no output files.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
