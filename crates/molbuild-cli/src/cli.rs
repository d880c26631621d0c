use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "molbuild CLI - Generates three-dimensional benzobisazole structures from compact textual names and writes quantum-chemistry job inputs.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build molecules from their names and write structure files.
    Build(BuildArgs),
    /// Parse names and print their structural breakdown without building.
    Explain(ExplainArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// One or more molecule names to build (e.g. 4a_TON_4b_4c_n3).
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,

    /// Path to the fragment store directory.
    #[arg(short, long, default_value = "data", value_name = "PATH")]
    pub store: PathBuf,

    /// Directory for the output files; created if missing.
    #[arg(short, long, default_value = ".", value_name = "PATH")]
    pub output_dir: PathBuf,

    /// Output format(s) to write.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Gjf)]
    pub format: OutputFormat,

    /// Path to a TOML file overriding the default job settings.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Randomly displace every coordinate by up to this amount (angstroms).
    #[arg(long, value_name = "FLOAT")]
    pub perturb: Option<f64>,

    /// Seed for the perturbation; a fixed seed gives reproducible output.
    #[arg(long, value_name = "INT", requires = "perturb")]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Quantum-chemistry job input (.gjf).
    Gjf,
    /// Tripos interchange format (.mol2).
    Mol2,
    /// Both formats side by side.
    Both,
}

impl OutputFormat {
    pub fn wants_gjf(self) -> bool {
        matches!(self, Self::Gjf | Self::Both)
    }

    pub fn wants_mol2(self) -> bool {
        matches!(self, Self::Mol2 | Self::Both)
    }
}

/// Arguments for the `explain` subcommand.
#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// One or more molecule names to parse.
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,

    /// Path to the fragment store directory.
    #[arg(short, long, default_value = "data", value_name = "PATH")]
    pub store: PathBuf,
}
