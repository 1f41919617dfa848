//! CLI subcommand definitions
//!
//! The briefing form is shared by `prompt` and `query`.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::briefing::{BriefingForm, BriefingMode, Quarter};
use crate::error::AppError;
use crate::utils::parse_time_of_day;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the prompt that would be sent, without calling the API
    Prompt(FormArgs),
    /// Request a briefing, print it, and optionally export it
    Query(QueryArgs),
    /// Export text from a file or stdin
    Export(ExportArgs),
    /// Interactive session with history and export
    Shell,
}

/// Briefing form fields
#[derive(Args, Debug, Clone)]
pub(crate) struct FormArgs {
    /// Departure airport (ICAO)
    #[arg(short = 'd', long)]
    pub(crate) departure: String,

    /// Arrival airport (ICAO)
    #[arg(short = 'a', long)]
    pub(crate) arrival: Option<String>,

    /// Departure time in UTC (HH:MM or HHMM); defaults to now
    #[arg(short = 't', long)]
    pub(crate) time: Option<String>,

    /// Route (fixes, airways)
    #[arg(short = 'r', long)]
    pub(crate) route: Option<String>,

    /// Flight levels per fix (e.g., "TERAS/F340 JCL/F360")
    #[arg(short = 'l', long)]
    pub(crate) levels: Option<String>,

    /// Quarters to estimate; repeat or comma-separate (Q1,Q3)
    #[arg(short = 'q', long = "quarter", value_enum, value_delimiter = ',', ignore_case = true)]
    pub(crate) quarters: Vec<Quarter>,

    /// Safety-margin mode (default from config, else conservative)
    #[arg(short = 'm', long, value_enum)]
    pub(crate) mode: Option<BriefingMode>,
}

impl FormArgs {
    pub(crate) fn to_form(&self, default_mode: BriefingMode) -> Result<BriefingForm, AppError> {
        let departure_time = self.time.as_deref().map(parse_time_of_day).transpose()?;
        Ok(BriefingForm {
            departure: self.departure.clone(),
            arrival: self.arrival.clone().unwrap_or_default(),
            departure_time,
            route: self.route.clone().unwrap_or_default(),
            flight_levels: self.levels.clone().unwrap_or_default(),
            quarters: self.quarters.clone(),
            mode: self.mode.unwrap_or(default_mode),
        })
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct QueryArgs {
    #[command(flatten)]
    pub(crate) form: FormArgs,

    /// Export the result (TXT, XML, PDF, Excel)
    #[arg(short = 'x', long, value_name = "FORMAT")]
    pub(crate) export: Option<String>,

    /// Base file name for the export (default: briefing_<AIRPORT>_<STAMP>)
    #[arg(short = 'n', long, value_name = "BASE")]
    pub(crate) name: Option<String>,

    /// Directory the export is written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub(crate) out_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ExportArgs {
    /// Output format (TXT, XML, PDF, Excel); anything else is written as TXT
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub(crate) format: String,

    /// Base file name (default: briefing_export_<STAMP>)
    #[arg(short = 'n', long, value_name = "BASE")]
    pub(crate) name: Option<String>,

    /// Read content from this file instead of stdin
    #[arg(short = 'i', long, value_name = "FILE")]
    pub(crate) input: Option<PathBuf>,

    /// Directory the export is written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub(crate) out_dir: Option<PathBuf>,
}
