//! Dashboard chart derivation. The donut is drawn with plain SVG circles and
//! stroke-dasharray arcs; this module computes the geometry so the markup
//! stays declarative.

use std::f64::consts::PI;

use crate::models::ChartSlice;

pub const SEGMENT_COLORS: [&str; 5] = ["#6366f1", "#8b5cf6", "#ec4899", "#10b981", "#f59e0b"];
pub const NO_DATA_LABEL: &str = "No data";

#[derive(Clone, PartialEq)]
pub struct DonutSegment {
    pub name: String,
    pub value: f64,
    /// Share of the whole, 0..=1.
    pub percent: f64,
    pub color: &'static str,
    /// stroke-dasharray arc length, in the same units as the radius.
    pub dash: f64,
    /// Remainder of the circumference after the arc.
    pub gap: f64,
    /// stroke-dashoffset rotating this arc past the previous ones.
    pub offset: f64,
}

/// An empty or all-zero distribution renders as one full placeholder slice
/// instead of a blank chart.
pub fn distribution_series(slices: &[ChartSlice]) -> Vec<ChartSlice> {
    let cleaned: Vec<ChartSlice> = slices.iter().filter(|s| s.value > 0.0).cloned().collect();
    if cleaned.is_empty() {
        vec![ChartSlice {
            name: NO_DATA_LABEL.to_string(),
            value: 1.0,
        }]
    } else {
        cleaned
    }
}

pub fn donut_segments(slices: &[ChartSlice], radius: f64) -> Vec<DonutSegment> {
    let series = distribution_series(slices);
    let total: f64 = series.iter().map(|s| s.value).sum();
    let circumference = 2.0 * PI * radius;

    let mut consumed = 0.0;
    series
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            let percent = slice.value / total;
            let dash = percent * circumference;
            let segment = DonutSegment {
                name: slice.name.clone(),
                value: slice.value,
                percent,
                color: SEGMENT_COLORS[index % SEGMENT_COLORS.len()],
                dash,
                gap: circumference - dash,
                offset: -consumed,
            };
            consumed += dash;
            segment
        })
        .collect()
}

pub fn percent_label(percent: f64) -> String {
    format!("{}%", (percent * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(name: &str, value: f64) -> ChartSlice {
        ChartSlice {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn empty_distribution_becomes_single_placeholder() {
        let series = distribution_series(&[]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, NO_DATA_LABEL);
        assert_eq!(series[0].value, 1.0);
    }

    #[test]
    fn zero_valued_slices_count_as_no_data() {
        let series = distribution_series(&[slice("quotes", 0.0), slice("complaints", 0.0)]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, NO_DATA_LABEL);
    }

    #[test]
    fn real_slices_pass_through() {
        let series = distribution_series(&[slice("quotes", 3.0), slice("complaints", 1.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "quotes");
    }

    #[test]
    fn segment_percents_sum_to_one() {
        let segments = donut_segments(&[slice("a", 1.0), slice("b", 3.0)], 80.0);
        let total: f64 = segments.iter().map(|s| s.percent).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((segments[1].percent - 0.75).abs() < 1e-9);
    }

    #[test]
    fn arcs_tile_the_circumference() {
        let radius = 80.0;
        let segments = donut_segments(&[slice("a", 2.0), slice("b", 5.0), slice("c", 3.0)], radius);
        let arc_sum: f64 = segments.iter().map(|s| s.dash).sum();
        assert!((arc_sum - 2.0 * PI * radius).abs() < 1e-9);
        // Each arc starts where the previous one ended.
        assert_eq!(segments[0].offset, 0.0);
        assert!((segments[1].offset + segments[0].dash).abs() < 1e-9);
    }

    #[test]
    fn percent_labels_round() {
        assert_eq!(percent_label(0.333), "33%");
        assert_eq!(percent_label(1.0), "100%");
    }
}
