use crate::cli::display;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::extract::Extractor;
use crate::models::{ManualFlags, ReportRecord, StationOverride, StationTable};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extracts water levels, rainfall and alerts from a pasted daily irrigation report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML station table to use instead of the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    pub stations: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a record from a report (stdin by default)
    Extract(ExtractArgs),

    /// Print the active station table
    Stations,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// Report file, or "-" for stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Primary station level entered by hand (ม.รทก.)
    #[arg(long, allow_hyphen_values = true)]
    pub override_level: Option<f64>,

    /// Primary station change since yesterday (m)
    #[arg(long, allow_hyphen_values = true)]
    pub override_diff: Option<f64>,

    /// Primary station flow (ลบ.ม./วิ)
    #[arg(long)]
    pub override_flow: Option<String>,

    /// Keep the override values but read the primary station from the text
    #[arg(long)]
    pub no_override: bool,

    /// Force the reservoir alert on or off
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub reservoir: Option<bool>,

    /// Force the flood alert on or off
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub flood: Option<bool>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Date used when the report states none (YYYY-MM-DD, default: today)
    #[arg(long, value_name = "DATE")]
    pub date_today: Option<NaiveDate>,
}

impl ExtractArgs {
    /// Builds the primary-station override from the flags, if any were given.
    pub fn primary_override(&self) -> Result<Option<StationOverride>> {
        let over = match (self.override_level, self.override_diff) {
            (Some(level), Some(diff)) => {
                let flow = self.override_flow.as_deref().unwrap_or(crate::models::NO_VALUE);
                StationOverride::new(level, diff, flow)
            },
            (None, None) if self.override_flow.is_none() => return Ok(None),
            _ => {
                return Err(AppError::Cli(
                    "--override-level and --override-diff must be given together".to_string(),
                ))
            },
        };

        Ok(Some(StationOverride {
            enabled: !self.no_override,
            ..over
        }))
    }

    pub fn manual_flags(&self) -> ManualFlags {
        ManualFlags {
            reservoir: self.reservoir,
            flood: self.flood,
        }
    }
}

/// CLI application
pub struct App {
    table: StationTable,
    extractor: Extractor,
}

impl App {
    /// Loads the station table and compiles its matchers.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let table = config.station_table()?;
        Self::with_table(table)
    }

    pub fn with_table(table: StationTable) -> Result<Self> {
        let extractor = Extractor::new(&table)?;
        info!("Ready with {} stations", table.len());
        Ok(Self { table, extractor })
    }

    pub fn table(&self) -> &StationTable {
        &self.table
    }

    /// Run one command
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Extract(args) => {
                let text = read_input(args.input.as_deref())?;
                let record = self.extract_with(&text, &args)?;
                println!("{}", self.render(&record, args.format)?);
            },
            Commands::Stations => {
                println!("{}", display::stations_table(&self.table));
            },
        }

        Ok(())
    }

    /// Extracts a record using the overrides and flags in `args`.
    pub fn extract_with(&self, text: &str, args: &ExtractArgs) -> Result<ReportRecord> {
        let over = args.primary_override()?;
        let today = args.date_today.unwrap_or_else(|| Local::now().date_naive());
        Ok(self
            .extractor
            .extract_on(text, over.as_ref(), args.manual_flags(), today))
    }

    /// Extracts with the local date as fallback; used by the interactive menu.
    pub fn extract(
        &self,
        text: &str,
        primary_override: Option<&StationOverride>,
        manual: ManualFlags,
    ) -> ReportRecord {
        self.extractor.extract(text, primary_override, manual)
    }

    pub fn render(&self, record: &ReportRecord, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(display::record_summary(record, &self.table)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        }
    }
}

/// Reads the report from a file, or from stdin when the path is absent or "-".
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            debug!("Reading report from {}", p.display());
            Ok(fs::read_to_string(p)?)
        },
        _ => {
            debug!("Reading report from stdin");
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        },
    }
}
