use clap::{Args, Parser, Subcommand};
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
    about = "dos - inspect, filter, group and broaden density-of-states series.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the series described in an input file.
    Summary(SummaryArgs),
    /// Broaden the series onto a common energy grid and write CSV columns.
    Sample(SampleArgs),
}

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Path to the input series file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `sample` subcommand.
#[derive(Args, Debug)]
pub struct SampleArgs {
    // --- Core Arguments ---
    /// Path to the input series file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output CSV file. Writes to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Selection ---
    /// Keep only series whose info contains KEY=VALUE. Can be repeated.
    #[arg(long = "select", value_name = "KEY=VALUE")]
    pub select: Vec<String>,

    /// Drop series whose info contains every given KEY=VALUE. Can be repeated.
    #[arg(long = "exclude", value_name = "KEY=VALUE")]
    pub exclude: Vec<String>,

    /// Sum series sharing the same values for KEY. Can be repeated.
    #[arg(long = "sum-by", value_name = "KEY")]
    pub sum_by: Vec<String>,

    /// Append a column with the sum of all (selected) series.
    #[arg(long)]
    pub total: bool,

    // --- Sampling Overrides ---
    /// Override the number of grid points.
    #[arg(short, long, value_name = "INT")]
    pub npts: Option<usize>,

    /// Override the broadening width.
    #[arg(short, long, value_name = "FLOAT")]
    pub width: Option<f64>,

    /// Override the padding (in widths) added around the data range.
    #[arg(long, value_name = "FLOAT")]
    pub padding: Option<f64>,

    /// Override the lower bound of the energy grid.
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub xmin: Option<f64>,

    /// Override the upper bound of the energy grid.
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub xmax: Option<f64>,

    /// Override the smearing kernel (only 'gauss' is available).
    #[arg(long, value_name = "NAME")]
    pub smearing: Option<String>,

    /// Override any sampling value from the input file (e.g., -S sampling.npts=200).
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}
