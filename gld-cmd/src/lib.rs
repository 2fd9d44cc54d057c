//! Command implementations for GLD CLI.
//!
//! Each subcommand loads a lake levels document, builds a [`ChartConfig`]
//! from the shared chart flags and runs one recomputation of the engine.

use clap::{Args, Subcommand};
use gld_data::{ChartConfig, SeriesKind, SpanOverride, TimeWindow};
use gld_lakes::{Lake, YearMonth};
use gld_utils::units::UnitSystem;
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub mod extents;
pub mod panels;

/// Flags every subcommand shares: the data source and the chart configuration.
#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    /// Path to the lake levels JSON document
    #[arg(short = 'j', long)]
    pub lakes_json: String,

    /// First visible month (YYYY-MM)
    #[arg(long)]
    pub start: YearMonth,

    /// Last visible month (YYYY-MM)
    #[arg(long)]
    pub end: YearMonth,

    /// Unit system for displayed values (metric or imperial)
    #[arg(short, long, default_value = "metric")]
    pub units: UnitSystem,

    /// Series to draw, comma separated
    /// (monthly, annual, record_max, record_min, record_mean, period_of_record_mean)
    #[arg(short, long, value_delimiter = ',', default_value = "monthly")]
    pub series: Vec<SeriesKind>,

    /// Hide the coordinated forecast
    #[arg(long)]
    pub no_forecast: bool,

    /// Vertical span shared by every panel, or "auto"
    #[arg(long, default_value = "auto")]
    pub span: SpanOverride,

    /// Only show these lakes (repeatable); all lakes when omitted
    #[arg(short, long = "lake")]
    pub lakes: Vec<String>,
}

impl ChartArgs {
    pub fn to_config(&self) -> anyhow::Result<ChartConfig> {
        let window = TimeWindow::new(self.start, self.end)?;
        Ok(ChartConfig::new(window)
            .with_units(self.units)
            .with_series(self.series.iter().copied())
            .with_forecast(!self.no_forecast)
            .with_span_override(self.span))
    }

    /// Read the lake document and check every requested lake exists in it.
    pub fn load_lakes(&self) -> anyhow::Result<Vec<Lake>> {
        let json = std::fs::read_to_string(&self.lakes_json)?;
        let lakes = Lake::parse_lakes_json(&json)?;
        for id in &self.lakes {
            if !lakes.iter().any(|lake| lake.id == *id) {
                anyhow::bail!("lake {id:?} not found in {}", self.lakes_json);
            }
        }
        Ok(lakes)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Build every visible panel (segments, forecast bands, shared scale, hover index) as JSON
    Panels {
        #[command(flatten)]
        chart: ChartArgs,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Write per-lake extents and shared-scale bounds as CSV
    Extents {
        #[command(flatten)]
        chart: ChartArgs,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show the synchronized hover record of every visible lake for one month
    Hover {
        #[command(flatten)]
        chart: ChartArgs,

        /// Month to inspect (YYYY-MM)
        #[arg(short, long)]
        period: YearMonth,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Panels { chart, output } => panels::run_panels(&chart, output.as_deref()),
        Command::Extents { chart, output } => extents::run_extents(&chart, output.as_deref()),
        Command::Hover { chart, period } => panels::run_hover(&chart, &period),
    }
}

/// Open the output file, or stdout when no path is given.
pub(crate) fn open_output(path: Option<&str>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}
