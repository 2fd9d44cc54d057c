//! Shared vertical scale across visible lakes.
//!
//! Every panel gets the same `y_max - y_min`; each lake's own data is
//! centred in it by padding symmetrically, so panels keep their real
//! elevations while equal heights mean equal physical range.

use crate::config::SpanOverride;
use crate::extent::Extent;
use serde::Serialize;
use std::collections::BTreeMap;

/// The vertical axis bounds of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelRange {
    pub y_min: f64,
    pub y_max: f64,
}

impl PanelRange {
    /// Pad `extent` evenly on both sides until it is `span` tall.
    pub fn padded(extent: &Extent, span: f64) -> PanelRange {
        let padding = (span - extent.range()) / 2.0;
        PanelRange {
            y_min: extent.min - padding,
            y_max: extent.max + padding,
        }
    }

    pub fn span(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// One span shared by all panels and the bounds that realize it per lake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedScale {
    pub span: f64,
    pub per_lake: BTreeMap<String, PanelRange>,
}

/// Solve the shared span over lakes that have an extent.
///
/// An explicit, positive override wins; otherwise the span is the largest
/// observed range. Returns None when no lake has an extent, in which case
/// panels fall back to their own automatic scaling.
///
/// An override smaller than a lake's own range is applied as given: that
/// lake's bounds are narrower than its extent and its data overflows the panel.
pub fn solve_uniform_scale<K, I>(extents: I, span_override: SpanOverride) -> Option<SharedScale>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Extent)>,
{
    let extents: Vec<(String, Extent)> = extents
        .into_iter()
        .map(|(lake, extent)| (lake.into(), extent))
        .collect();
    if extents.is_empty() {
        log::debug!("No extents, falling back to auto scaling");
        return None;
    }
    let span = match span_override.span() {
        Some(span) => span,
        None => extents
            .iter()
            .map(|(_, extent)| extent.range())
            .fold(0.0, f64::max),
    };
    let per_lake: BTreeMap<String, PanelRange> = extents
        .into_iter()
        .map(|(lake, extent)| (lake, PanelRange::padded(&extent, span)))
        .collect();
    log::info!(
        "Shared span {} across {} lakes",
        span,
        per_lake.len()
    );
    Some(SharedScale { span, per_lake })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn two_lakes() -> Vec<(&'static str, Extent)> {
        vec![
            ("x", Extent::new(180.0, 181.0)),
            ("y", Extent::new(75.0, 76.5)),
        ]
    }

    #[test]
    fn test_auto_span_uses_largest_range() {
        let scale = solve_uniform_scale(two_lakes(), SpanOverride::Auto).unwrap();
        assert!(close(scale.span, 1.5));
        let x = scale.per_lake["x"];
        assert!(close(x.y_min, 179.75));
        assert!(close(x.y_max, 181.25));
        let y = scale.per_lake["y"];
        assert!(close(y.y_min, 75.0));
        assert!(close(y.y_max, 76.5));
    }

    #[test]
    fn test_explicit_override() {
        let scale = solve_uniform_scale(two_lakes(), SpanOverride::Fixed(2.0)).unwrap();
        assert!(close(scale.span, 2.0));
        let x = scale.per_lake["x"];
        assert!(close(x.y_min, 179.5));
        assert!(close(x.y_max, 181.5));
        let y = scale.per_lake["y"];
        assert!(close(y.y_min, 75.25));
        assert!(close(y.y_max, 76.75));
    }

    #[test]
    fn test_non_positive_override_falls_back_to_auto() {
        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let scale = solve_uniform_scale(two_lakes(), SpanOverride::Fixed(bad)).unwrap();
            assert!(close(scale.span, 1.5));
        }
    }

    #[test]
    fn test_override_below_observed_range_is_applied_as_given() {
        let scale = solve_uniform_scale(two_lakes(), SpanOverride::Fixed(0.5)).unwrap();
        assert!(close(scale.span, 0.5));
        let y = scale.per_lake["y"];
        assert!(close(y.span(), 0.5));
        // 1.5 m of data in a 0.5 m panel, centred
        assert!(close(y.y_min, 75.5));
        assert!(close(y.y_max, 76.0));
        assert!(y.y_min > 75.0 && y.y_max < 76.5);
    }

    #[test]
    fn test_empty_is_undefined() {
        let none: Vec<(&str, Extent)> = Vec::new();
        assert!(solve_uniform_scale(none.clone(), SpanOverride::Auto).is_none());
        assert!(solve_uniform_scale(none, SpanOverride::Fixed(2.0)).is_none());
    }

    #[test]
    fn test_equal_spans_and_containment() {
        let extents = vec![
            ("a", Extent::new(183.12, 183.97)),
            ("b", Extent::new(176.01, 177.45)),
            ("c", Extent::new(174.33, 174.33)),
            ("d", Extent::new(74.02, 75.91)),
            ("e", Extent::new(-3.5, 0.25)),
        ];
        let scale = solve_uniform_scale(extents.clone(), SpanOverride::Auto).unwrap();
        for (lake, extent) in &extents {
            let range = scale.per_lake[*lake];
            assert!((range.span() - scale.span).abs() < TOLERANCE, "{lake}");
            assert!(range.y_min <= extent.min + TOLERANCE);
            assert!(range.y_max >= extent.max - TOLERANCE);
        }
    }

    #[test]
    fn test_lake_defining_span_gets_no_padding() {
        let scale = solve_uniform_scale(two_lakes(), SpanOverride::Auto).unwrap();
        assert_eq!(scale.per_lake["y"], PanelRange { y_min: 75.0, y_max: 76.5 });
    }

    #[test]
    fn test_single_flat_lake() {
        let scale = solve_uniform_scale([("flat", Extent::new(10.0, 10.0))], SpanOverride::Auto).unwrap();
        assert_eq!(scale.span, 0.0);
        assert_eq!(scale.per_lake["flat"], PanelRange { y_min: 10.0, y_max: 10.0 });
    }
}
