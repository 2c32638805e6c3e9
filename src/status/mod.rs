//! Point-in-time system status with sparse-update semantics
//!
//! The status feed is a second, independent subscription carrying a single
//! record. Unlike the readings window it is sparsely updated: a null
//! snapshot means "nothing new", not "clear".

use serde::Serialize;
use serde_json::Value;

/// Operating state of the dosing and circulation hardware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    /// Free-form state string reported by the controller
    pub status: String,
    /// Whether the VPD misting pump is currently running
    pub vpd_pump_running: bool,
    /// Whether a pH correction dose is in progress
    pub ph_adjusting: bool,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self {
            status: String::from("Unknown"),
            vpd_pump_running: false,
            ph_adjusting: false,
        }
    }
}

impl SystemStatus {
    /// Normalize a non-null status snapshot.
    ///
    /// Missing or empty `status` defaults to `"Unknown"`; missing boolean
    /// flags default to `false`. A snapshot that is not a mapping yields the
    /// all-default status.
    pub fn from_snapshot(snapshot: &Value) -> Self {
        let fields = match snapshot.as_object() {
            Some(fields) => fields,
            None => return Self::default(),
        };

        Self {
            status: fields
                .get("status")
                .and_then(coerce_text)
                .unwrap_or_else(|| String::from("Unknown")),
            vpd_pump_running: fields
                .get("vpdPumpRunning")
                .and_then(coerce_bool)
                .unwrap_or(false),
            ph_adjusting: fields
                .get("phAdjusting")
                .and_then(coerce_bool)
                .unwrap_or(false),
        }
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse::<bool>().ok(),
        _ => None,
    }
}
