//! Per-lake extents and shared-scale bounds as CSV.

use crate::{open_output, ChartArgs};
use gld_data::{build_dashboard, Dashboard};
use log::info;
use serde::Serialize;

/// One CSV row. Empty cells mean the lake has no extent for this configuration.
#[derive(Debug, Serialize, PartialEq)]
pub struct ExtentRow {
    pub lake: String,
    pub name: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

pub fn extent_rows(dashboard: &Dashboard) -> Vec<ExtentRow> {
    dashboard
        .panels
        .iter()
        .map(|panel| ExtentRow {
            lake: panel.lake_id.clone(),
            name: panel.name.clone(),
            min: panel.extent.map(|e| e.min),
            max: panel.extent.map(|e| e.max),
            y_min: panel.y_range.map(|r| r.y_min),
            y_max: panel.y_range.map(|r| r.y_max),
        })
        .collect()
}

/// Compute extents and the shared scale, then write one CSV row per lake.
pub fn run_extents(chart: &ChartArgs, output: Option<&str>) -> anyhow::Result<()> {
    let config = chart.to_config()?;
    let lakes = chart.load_lakes()?;
    let dashboard = build_dashboard(&lakes, &chart.lakes, &config);
    let rows = extent_rows(&dashboard);

    match &dashboard.scale {
        Some(scale) => info!("Shared span {} {}", scale.span, config.units.label()),
        None => info!("No lake has data in the window; panels scale themselves"),
    }

    let mut wtr = csv::Writer::from_writer(open_output(output)?);
    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    info!("Wrote {} extent rows", rows.len());
    Ok(())
}
