//! Typed sensor readings parsed from loosely-typed remote records
//!
//! The remote store delivers each record as a mapping of field names to
//! scalars that may be JSON numbers or strings, depending on which firmware
//! revision wrote them. This module coerces those scalars into a typed
//! [`Reading`] or drops the record.
//!
//! # Examples
//!
//! ```rust
//! use hydro_metrics::reading::Reading;
//! use serde_json::json;
//!
//! let reading = Reading::from_record("r1", &json!({
//!     "timestamp": 100,
//!     "temperature": "22.5",
//!     "humidity": "60",
//! })).unwrap();
//!
//! assert_eq!(reading.temperature, 22.5);
//! assert_eq!(reading.humidity, Some(60.0));
//! assert_eq!(reading.ph, None);
//! ```

use chrono::{Local, TimeZone};
use serde::Serialize;
use serde_json::Value;

/// One validated sensor sample with a required timestamp.
///
/// Metric fields other than `temperature` carry `None` when the source value
/// is absent or unparsable. `None` is the only representation of a missing
/// value; it is never collapsed to `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Opaque unique key of the record within its snapshot
    pub id: String,
    /// Sample time in unix seconds
    pub timestamp: i64,
    /// Air temperature in °C; the only field gating acceptance
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Vapour pressure deficit in kPa
    pub vpd: Option<f64>,
    /// Nutrient solution pH
    pub ph: Option<f64>,
    /// Reservoir water level in cm
    pub water_level: Option<f64>,
    /// Reservoir volume in litres
    pub reservoir_volume: Option<f64>,
}

impl Reading {
    /// Parse one raw snapshot record into a `Reading`.
    ///
    /// Returns `None` when the record is not a mapping, has no parsable
    /// integer `timestamp`, or its `temperature` does not coerce to a finite
    /// number. Acceptance is gated on temperature alone; every other metric
    /// degrades to `None` independently.
    ///
    /// Pure function of the record; rejected records are not reported
    /// individually, they just never reach the window.
    pub fn from_record(id: impl Into<String>, record: &Value) -> Option<Self> {
        let fields = record.as_object()?;
        let timestamp = coerce_i64(fields.get("timestamp")?)?;
        let temperature = coerce_f64(fields.get("temperature")?)?;

        Some(Self {
            id: id.into(),
            timestamp,
            temperature,
            humidity: fields.get("humidity").and_then(coerce_f64),
            vpd: fields.get("vpd").and_then(coerce_f64),
            ph: fields.get("ph").and_then(coerce_f64),
            water_level: fields.get("waterLevel").and_then(coerce_f64),
            reservoir_volume: fields.get("reservoirVolume").and_then(coerce_f64),
        })
    }

    /// Localized date-time string for the latest-reading panel.
    pub fn local_timestamp_display(&self) -> String {
        Local
            .timestamp_opt(self.timestamp, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| String::from("N/A"))
    }
}

/// Coerce a loosely-typed scalar into a finite float.
///
/// Accepts JSON numbers and decimal strings (`str::parse`, so the decimal
/// separator is always `.` regardless of locale). Anything else, and any
/// non-finite result, is treated as missing.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Coerce a loosely-typed scalar into an integer.
///
/// Fractional JSON numbers are truncated; strings must parse as plain
/// integers.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_numeric_and_string_scalars() {
        let reading = Reading::from_record(
            "r1",
            &json!({
                "timestamp": "100",
                "temperature": 22.5,
                "humidity": "60",
                "vpd": 1.2,
                "ph": "6.0",
                "waterLevel": "10",
                "reservoirVolume": 42.0,
            }),
        )
        .unwrap();

        assert_eq!(reading.id, "r1");
        assert_eq!(reading.timestamp, 100);
        assert_eq!(reading.temperature, 22.5);
        assert_eq!(reading.humidity, Some(60.0));
        assert_eq!(reading.vpd, Some(1.2));
        assert_eq!(reading.ph, Some(6.0));
        assert_eq!(reading.water_level, Some(10.0));
        assert_eq!(reading.reservoir_volume, Some(42.0));
    }

    #[test]
    fn test_rejects_unparsable_temperature() {
        let record = json!({ "timestamp": 90, "temperature": "bad" });
        assert!(Reading::from_record("r2", &record).is_none());
    }

    #[test]
    fn test_rejects_non_finite_temperature() {
        let record = json!({ "timestamp": 90, "temperature": "NaN" });
        assert!(Reading::from_record("r2", &record).is_none());

        let record = json!({ "timestamp": 90, "temperature": "inf" });
        assert!(Reading::from_record("r2", &record).is_none());
    }

    #[test]
    fn test_rejects_missing_timestamp() {
        let record = json!({ "temperature": 22.5 });
        assert!(Reading::from_record("r1", &record).is_none());

        let record = json!({ "timestamp": "soon", "temperature": 22.5 });
        assert!(Reading::from_record("r1", &record).is_none());
    }

    #[test]
    fn test_rejects_non_mapping_record() {
        assert!(Reading::from_record("r1", &json!("22.5")).is_none());
        assert!(Reading::from_record("r1", &json!(null)).is_none());
    }

    #[test]
    fn test_missing_metrics_stay_missing() {
        let reading = Reading::from_record(
            "r1",
            &json!({
                "timestamp": 100,
                "temperature": 22.5,
                "humidity": "not a number",
                "ph": null,
            }),
        )
        .unwrap();

        assert_eq!(reading.humidity, None);
        assert_eq!(reading.vpd, None);
        assert_eq!(reading.ph, None);
        assert_eq!(reading.water_level, None);
    }

    #[test]
    fn test_coerce_f64_forms() {
        assert_eq!(coerce_f64(&json!(1.5)), Some(1.5));
        assert_eq!(coerce_f64(&json!(" 1.5 ")), Some(1.5));
        assert_eq!(coerce_f64(&json!("1e3")), Some(1000.0));
        assert_eq!(coerce_f64(&json!(true)), None);
        assert_eq!(coerce_f64(&json!(null)), None);
        assert_eq!(coerce_f64(&json!([1.5])), None);
    }

    #[test]
    fn test_coerce_i64_forms() {
        assert_eq!(coerce_i64(&json!(100)), Some(100));
        assert_eq!(coerce_i64(&json!(100.9)), Some(100));
        assert_eq!(coerce_i64(&json!("100")), Some(100));
        assert_eq!(coerce_i64(&json!("100.5")), None);
        assert_eq!(coerce_i64(&json!(false)), None);
    }

    #[test]
    fn test_local_timestamp_display_is_wall_clock() {
        let reading =
            Reading::from_record("r1", &json!({ "timestamp": 100, "temperature": 22.5 })).unwrap();
        let display = reading.local_timestamp_display();
        assert_ne!(display, "N/A");
        assert!(display.contains(':'));
    }
}
