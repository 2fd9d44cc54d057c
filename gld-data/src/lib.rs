//! Segmentation and synchronized scaling for stacked lake level panels.
//!
//! Pipeline, per recomputation:
//! lake records -> [`filter`] -> [`segment`] -> [`extent`] per lake ->
//! [`scale`] across lakes. [`hover`] is built from the same filtered points.
//! [`dashboard`] runs all of it for a set of visible lakes.
//!
//! Every function is a pure transform of its arguments.

pub mod config;
pub mod dashboard;
pub mod extent;
pub mod filter;
pub mod hover;
pub mod scale;
pub mod segment;
pub mod window;

pub use config::{ChartConfig, SeriesKind, SpanOverride};
pub use dashboard::{build_dashboard, build_panel, visible_lakes, Dashboard, LakePanel};
pub use extent::{lake_extent, Extent};
pub use hover::{build_hover_index, HoverIndex, HoverRecord};
pub use scale::{solve_uniform_scale, PanelRange, SharedScale};
pub use segment::{ForecastBands, SegmentedLine};
pub use window::{TimeWindow, WindowError};
