//! Chart-facing projection of the reading window
//!
//! The rendering layer draws one line per metric over a shared label axis.
//! This module builds those arrays from the current window. A missing metric
//! value projects to `None`, which the chart renders as a gap in the line;
//! it is never substituted with zero.
//!
//! # Examples
//!
//! ```rust
//! use hydro_metrics::chart::format_number;
//!
//! assert_eq!(format_number(None, 1), "N/A");
//! assert_eq!(format_number(Some(3.14159), 2), "3.14");
//! ```

use std::collections::BTreeMap;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::error::Result;
use crate::reading::Reading;

/// Charted metrics, in the fixed order the dashboard renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Temperature,
    Humidity,
    Vpd,
    Ph,
}

impl Metric {
    /// All charted metrics in render order.
    pub const ALL: [Metric; 4] = [Metric::Temperature, Metric::Humidity, Metric::Vpd, Metric::Ph];

    /// Dataset label shown in the chart legend.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature (°C)",
            Metric::Humidity => "Humidity (%)",
            Metric::Vpd => "VPD (kPa)",
            Metric::Ph => "pH",
        }
    }

    /// Decimal places used when displaying a point-in-time value of this
    /// metric.
    pub fn decimals(&self) -> usize {
        match self {
            Metric::Temperature | Metric::Humidity => 1,
            Metric::Vpd | Metric::Ph => 2,
        }
    }

    fn value(&self, reading: &Reading) -> Option<f64> {
        match self {
            Metric::Temperature => Some(reading.temperature),
            Metric::Humidity => reading.humidity,
            Metric::Vpd => reading.vpd,
            Metric::Ph => reading.ph,
        }
    }
}

/// Chart-ready projection of one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// One local time-of-day label per window element
    pub labels: Vec<String>,
    /// Per-metric value arrays aligned with `labels`
    pub series: BTreeMap<Metric, Vec<Option<f64>>>,
}

impl ChartSeries {
    /// Project a window into labels plus per-metric value arrays.
    pub fn project(window: &[Reading]) -> Self {
        let labels = window.iter().map(|r| time_label(r.timestamp)).collect();
        let series = Metric::ALL
            .iter()
            .map(|metric| (*metric, window.iter().map(|r| metric.value(r)).collect()))
            .collect();
        Self { labels, series }
    }

    /// Serialize the projection for a charting frontend.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Local time-of-day label for a unix-seconds timestamp.
fn time_label(timestamp: i64) -> String {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| String::from("N/A"))
}

/// Fixed-decimal display formatting with an explicit `"N/A"` for gaps.
///
/// Returns `"N/A"` for missing and non-finite values; otherwise a string
/// with exactly `decimals` fractional digits.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => String::from("N/A"),
    }
}
