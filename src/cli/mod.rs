pub mod config;
pub mod form;
pub mod message;
pub mod pnr;
pub mod report;
pub mod transactions;

use std::io::Read;
use std::path::Path;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use daftar::error::{DaftarError, Result};
use daftar::settings::{load_settings, OutputFormat};

#[derive(Parser)]
#[command(
    name = "daftar",
    about = "Validate and summarize chat lines, report cards, UPI logs, forms and PNR status."
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print the result as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse one exported chat line.
    Message {
        /// Line such as '25/01/2025, 14:30 - Rahul: Bhai party kab hai?'
        line: String,
    },
    /// Build a report card from a student JSON record.
    Report {
        /// Path to JSON file, or '-' for stdin
        file: String,
    },
    /// Summarize a UPI transaction log.
    Transactions {
        /// Path to JSON (or CSV with --csv) file, or '-' for stdin
        file: String,
        /// Read the log as CSV with id,type,amount,to,category,date columns
        #[arg(long)]
        csv: bool,
    },
    /// Validate an admission form JSON record.
    Form {
        /// Path to JSON file, or '-' for stdin
        file: String,
    },
    /// Show reservation status from a PNR JSON record.
    Pnr {
        /// Path to JSON file, or '-' for stdin
        file: String,
    },
    /// Show or update settings.
    Config {
        /// Default output: table or json
        #[arg(long)]
        format: Option<FormatArg>,
        /// Colored output
        #[arg(long)]
        color: Option<bool>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// How results are written, resolved from flags and settings.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn resolve(json_flag: bool) -> Self {
        let settings = load_settings();
        if !settings.color {
            colored::control::set_override(false);
        }
        Output {
            json: json_flag || settings.output_format == OutputFormat::Json,
        }
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Read an input file, with `-` meaning stdin.
pub(crate) fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(Path::new(file))?)
    }
}

pub(crate) fn read_json(file: &str) -> Result<Value> {
    Ok(serde_json::from_str(&read_input(file)?)?)
}

pub(crate) fn invalid(what: &str) -> DaftarError {
    DaftarError::Other(format!("Invalid {what}"))
}
