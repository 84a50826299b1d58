use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Classify and tally institutional survey spreadsheets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show how input columns classify into role, school, and questions
    Inspect(InspectArgs),
    /// Preview the first few parsed rows in a formatted table
    Preview(PreviewArgs),
    /// Summarize response totals and role/school distributions
    Summary(SummaryArgs),
    /// Produce per-question frequency counts and percentages
    Tally(TallyArgs),
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Input survey file (.csv, .xlsx or .xls; '-' reads CSV from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Character encoding of delimited-text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Emit the classification as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input survey file (.csv, .xlsx or .xls; '-' reads CSV from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Character encoding of delimited-text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Input survey file (.csv, .xlsx or .xls; '-' reads CSV from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Character encoding of delimited-text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Restrict to responses with this role value (repeatable)
    #[arg(long = "role", action = clap::ArgAction::Append)]
    pub roles: Vec<String>,
    /// Restrict to responses from this school value (repeatable)
    #[arg(long = "school", action = clap::ArgAction::Append)]
    pub schools: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TallyArgs {
    /// Input survey file (.csv, .xlsx or .xls; '-' reads CSV from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Columns to tally (defaults to every question column)
    #[arg(short = 'C', long = "columns", action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// Restrict to responses with this role value (repeatable)
    #[arg(long = "role", action = clap::ArgAction::Append)]
    pub roles: Vec<String>,
    /// Restrict to responses from this school value (repeatable)
    #[arg(long = "school", action = clap::ArgAction::Append)]
    pub schools: Vec<String>,
    /// Maximum answer values to display per column (0 = all)
    #[arg(long, default_value_t = 0)]
    pub top: usize,
    /// Write the tally as CSV to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Emit the tally as JSON instead of a table
    #[arg(long)]
    pub json: bool,
    /// Character encoding of delimited-text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}
