//! Panel and hover output as JSON.

use crate::{open_output, ChartArgs};
use gld_data::{build_dashboard, build_hover_index, visible_lakes, HoverRecord};
use gld_lakes::{Lake, YearMonth};
use log::info;
use std::collections::BTreeMap;
use std::io::Write;

/// Build the dashboard for the visible lakes and write it as pretty JSON.
pub fn run_panels(chart: &ChartArgs, output: Option<&str>) -> anyhow::Result<()> {
    let config = chart.to_config()?;
    let lakes = chart.load_lakes()?;
    let dashboard = build_dashboard(&lakes, &chart.lakes, &config);

    info!(
        "Built {} panels for {} to {}",
        dashboard.panels.len(),
        config.window.start(),
        config.window.end()
    );

    let mut out = open_output(output)?;
    serde_json::to_writer_pretty(&mut out, &dashboard)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Hover records of every visible lake for one month, keyed by lake id.
///
/// Lakes with nothing to show at that month are left out.
pub fn hover_records(
    lakes: &[Lake],
    visible: &[String],
    config: &gld_data::ChartConfig,
    period: &YearMonth,
) -> BTreeMap<String, HoverRecord> {
    visible_lakes(lakes, visible)
        .into_iter()
        .filter_map(|lake| {
            build_hover_index(lake, config)
                .get_month(period)
                .cloned()
                .map(|record| (lake.id.clone(), record))
        })
        .collect()
}

/// Print the synchronized hover records for one month as JSON.
pub fn run_hover(chart: &ChartArgs, period: &YearMonth) -> anyhow::Result<()> {
    let config = chart.to_config()?;
    let lakes = chart.load_lakes()?;
    let records = hover_records(&lakes, &chart.lakes, &config, period);
    info!("{} lakes have values at {}", records.len(), period);

    let mut out = open_output(None)?;
    serde_json::to_writer_pretty(&mut out, &records)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
