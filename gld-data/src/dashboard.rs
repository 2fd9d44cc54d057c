//! One full recomputation: every visible lake's panel plus the shared scale.
//!
//! Nothing here is cached. Call [`build_dashboard`] again whenever the
//! window, units, enabled series, forecast flag or span override change.

use crate::config::{ChartConfig, SeriesKind};
use crate::extent::{lake_extent, Extent};
use crate::hover::{build_hover_index, HoverIndex};
use crate::scale::{solve_uniform_scale, PanelRange, SharedScale};
use crate::segment::{forecast_bands, series_line, ForecastBands, SegmentedLine};
use crate::window::TimeWindow;
use chrono::NaiveDate;
use gld_lakes::lake::sort_for_display;
use gld_lakes::series::{AllTimeRecords, DatedValue, MeanValue};
use gld_lakes::Lake;
use gld_utils::units::{UnitSystem, DATUM_LABEL};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Everything the renderer needs for one lake.
#[derive(Debug, Clone, Serialize)]
pub struct LakePanel {
    pub lake_id: String,
    pub name: String,
    /// Non-empty lines of the enabled series.
    pub lines: BTreeMap<SeriesKind, SegmentedLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastBands>,
    pub extent: Option<Extent>,
    /// All-time max, min and average, in display units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_time_records: Option<AllTimeRecords>,
    /// Shared-scale bounds; None means the panel scales itself.
    pub y_range: Option<PanelRange>,
    pub hover: HoverIndex,
}

/// Horizontal axis shared by every panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeDomain {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub window: TimeWindow,
    pub units: UnitSystem,
    pub axis_label: String,
    pub x_domain: TimeDomain,
    pub scale: Option<SharedScale>,
    pub panels: Vec<LakePanel>,
}

impl Dashboard {
    pub fn panel(&self, lake_id: &str) -> Option<&LakePanel> {
        self.panels.iter().find(|panel| panel.lake_id == lake_id)
    }
}

fn display_records(records: &AllTimeRecords, units: UnitSystem) -> AllTimeRecords {
    let dated = |record: DatedValue| DatedValue {
        value: units.from_meters(record.value),
        ..record
    };
    AllTimeRecords {
        max: records.max.map(dated),
        min: records.min.map(dated),
        avg: records.avg.map(|mean| MeanValue {
            value: units.from_meters(mean.value),
        }),
    }
}

/// Build one lake's lines, forecast, extent and hover index.
pub fn build_panel(lake: &Lake, config: &ChartConfig) -> LakePanel {
    let lines: BTreeMap<SeriesKind, SegmentedLine> = match lake.water_level() {
        Some(series) => config
            .series
            .iter()
            .map(|kind| (*kind, series_line(series, *kind, &config.window, config.units)))
            .filter(|(_, line)| !line.is_empty())
            .collect(),
        None => BTreeMap::new(),
    };
    let forecast = if config.forecast {
        lake.forecast()
            .map(|f| forecast_bands(&f.monthly_forecast, &config.window, config.units))
            .filter(|bands| !bands.is_empty())
    } else {
        None
    };
    LakePanel {
        lake_id: lake.id.clone(),
        name: lake.name.clone(),
        lines,
        forecast,
        extent: lake_extent(lake, config),
        all_time_records: lake
            .water_level()
            .and_then(|series| series.all_time_records.as_ref())
            .filter(|records| !records.is_empty())
            .map(|records| display_records(records, config.units)),
        y_range: None,
        hover: build_hover_index(lake, config),
    }
}

/// The lakes to show, in display order. An empty `visible` list shows every
/// lake. Only the first lake with a given id is kept.
pub fn visible_lakes<'a>(lakes: &'a [Lake], visible: &[String]) -> Vec<&'a Lake> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut shown: Vec<&Lake> = lakes
        .iter()
        .filter(|lake| visible.is_empty() || visible.iter().any(|id| *id == lake.id))
        .filter(|&lake| {
            let first = seen.insert(lake.id.as_str());
            if !first {
                log::warn!("Skipping repeated lake id {}", lake.id);
            }
            first
        })
        .collect();
    sort_for_display(&mut shown);
    shown
}

/// Build panels for the visible lakes and synchronize their vertical scale.
///
/// Panels follow [`visible_lakes`]. The time domain extends past the window
/// end when a forecast continues beyond it.
pub fn build_dashboard(lakes: &[Lake], visible: &[String], config: &ChartConfig) -> Dashboard {
    let shown = visible_lakes(lakes, visible);

    let mut panels: Vec<LakePanel> = shown.iter().map(|lake| build_panel(lake, config)).collect();

    let scale = solve_uniform_scale(
        panels
            .iter()
            .filter_map(|panel| panel.extent.map(|extent| (panel.lake_id.clone(), extent))),
        config.span_override,
    );
    if let Some(scale) = &scale {
        for panel in &mut panels {
            panel.y_range = scale.per_lake.get(&panel.lake_id).copied();
        }
    }

    let forecast_end = panels
        .iter()
        .filter_map(|panel| panel.forecast.as_ref().and_then(|f| f.max_end))
        .max();
    let window_end = config.window.end_date();
    let x_domain = TimeDomain {
        start: config.window.start_date(),
        end: forecast_end.map_or(window_end, |end| end.max(window_end)),
    };

    log::info!(
        "Built {} panels, {} on the shared scale",
        panels.len(),
        scale.as_ref().map_or(0, |s| s.per_lake.len())
    );
    Dashboard {
        window: config.window,
        units: config.units,
        axis_label: format!("Elevation ({}, {})", config.units.label(), DATUM_LABEL),
        x_domain,
        scale,
        panels,
    }
}
