//! Snapshot-driven state container for one dashboard
//!
//! `HydroMonitor` owns the two state slots the feeds write into: the reading
//! window and the system status. Each slot is replaced wholesale by its own
//! delivery path and never mutated in place, so readers observe either the
//! previous snapshot or the next one, never a mix. Derived values (latest
//! reading, chart series) are computed on read from the window and cannot
//! drift from it.
//!
//! # Examples
//!
//! ```rust
//! use hydro_metrics::monitor::HydroMonitor;
//! use serde_json::json;
//!
//! let monitor = HydroMonitor::new();
//! monitor.apply_readings_value(&json!({
//!     "r1": { "timestamp": 100, "temperature": "22.5", "humidity": "60" }
//! }));
//!
//! assert_eq!(monitor.current_window().len(), 1);
//! assert_eq!(monitor.latest_reading().unwrap().id, "r1");
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::chart::ChartSeries;
use crate::error::Error;
use crate::reading::Reading;
use crate::status::SystemStatus;
use crate::window::{self, RawSnapshot};

/// Pipeline state owner: reading window plus system status.
///
/// The two slots belong to independent feeds that may update in any
/// interleaving; each slot has its own lock and only its own delivery path
/// writes it.
#[derive(Debug, Default)]
pub struct HydroMonitor {
    window: RwLock<Arc<Vec<Reading>>>,
    status: RwLock<Option<SystemStatus>>,
}

impl HydroMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the window from a full readings snapshot.
    ///
    /// Unparsable records are dropped silently; the only observable effect
    /// is a window shorter than the snapshot.
    pub fn apply_readings_snapshot(&self, records: &RawSnapshot) {
        let next = window::build_window(records);
        let dropped = records.len().saturating_sub(next.len());
        if dropped > 0 {
            trace!(dropped, "records failed validation");
        }
        debug!(len = next.len(), "window replaced");
        *self.window.write() = Arc::new(next);
    }

    /// Apply a raw readings payload as delivered by the subscription.
    ///
    /// A null payload (empty remote collection) leaves the current window in
    /// place; a payload that is not a mapping is logged and ignored.
    pub fn apply_readings_value(&self, payload: &Value) {
        match payload {
            Value::Object(records) => self.apply_readings_snapshot(records),
            Value::Null => trace!("null readings snapshot, window retained"),
            other => self.on_feed_error(&Error::invalid_data(format!(
                "readings snapshot is not a mapping: {other}"
            ))),
        }
    }

    /// Apply a status payload.
    ///
    /// `None` and JSON null retain the previous status (sparse-update
    /// semantics); anything else replaces it wholesale.
    pub fn apply_status_snapshot(&self, snapshot: Option<&Value>) {
        match snapshot {
            None | Some(Value::Null) => trace!("null status snapshot, status retained"),
            Some(value) => {
                let next = SystemStatus::from_snapshot(value);
                debug!(status = %next.status, "status replaced");
                *self.status.write() = Some(next);
            }
        }
    }

    /// Record a feed delivery failure.
    ///
    /// Held state is left unchanged, so consumers keep seeing the last known
    /// good snapshot, and the subscription loop stays alive.
    pub fn on_feed_error(&self, error: &Error) {
        warn!(%error, "feed delivery failed, state retained");
    }

    /// Current window, ascending by time. Length is bounded by the remote
    /// query limit upstream.
    pub fn current_window(&self) -> Arc<Vec<Reading>> {
        Arc::clone(&self.window.read())
    }

    /// Chronologically last reading, or `None` before the first snapshot.
    pub fn latest_reading(&self) -> Option<Reading> {
        self.window.read().last().cloned()
    }

    /// Current system status, or `None` before the first status snapshot.
    pub fn current_status(&self) -> Option<SystemStatus> {
        self.status.read().clone()
    }

    /// Chart projection of the current window.
    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries::project(&self.current_window())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_before_first_snapshot() {
        let monitor = HydroMonitor::new();
        assert!(monitor.current_window().is_empty());
        assert!(monitor.latest_reading().is_none());
        assert!(monitor.current_status().is_none());
        assert!(monitor.chart_series().labels.is_empty());
    }

    #[test]
    fn test_snapshot_replaces_window_wholesale() {
        let monitor = HydroMonitor::new();
        monitor.apply_readings_value(&json!({
            "a": { "timestamp": 100, "temperature": 21.0 },
            "b": { "timestamp": 200, "temperature": 22.0 },
        }));
        assert_eq!(monitor.current_window().len(), 2);

        // The next snapshot supersedes, it does not merge.
        monitor.apply_readings_value(&json!({
            "c": { "timestamp": 300, "temperature": 23.0 },
        }));
        let window = monitor.current_window();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].id, "c");
    }

    #[test]
    fn test_null_readings_snapshot_retains_window() {
        let monitor = HydroMonitor::new();
        monitor.apply_readings_value(&json!({
            "a": { "timestamp": 100, "temperature": 21.0 },
        }));
        monitor.apply_readings_value(&json!(null));
        assert_eq!(monitor.current_window().len(), 1);
    }

    #[test]
    fn test_non_mapping_readings_payload_retains_window() {
        let monitor = HydroMonitor::new();
        monitor.apply_readings_value(&json!({
            "a": { "timestamp": 100, "temperature": 21.0 },
        }));
        monitor.apply_readings_value(&json!([1, 2, 3]));
        assert_eq!(monitor.current_window().len(), 1);
    }

    #[test]
    fn test_status_retention_on_null() {
        let monitor = HydroMonitor::new();
        monitor.apply_status_snapshot(Some(&json!({ "status": "OK" })));
        monitor.apply_status_snapshot(Some(&json!(null)));
        monitor.apply_status_snapshot(None);
        assert_eq!(monitor.current_status().unwrap().status, "OK");
    }

    #[test]
    fn test_feed_error_leaves_state_unchanged() {
        let monitor = HydroMonitor::new();
        monitor.apply_readings_value(&json!({
            "a": { "timestamp": 100, "temperature": 21.0 },
        }));
        monitor.apply_status_snapshot(Some(&json!({ "status": "OK" })));

        monitor.on_feed_error(&Error::transport("connection reset"));

        assert_eq!(monitor.current_window().len(), 1);
        assert_eq!(monitor.current_status().unwrap().status, "OK");
    }

    #[test]
    fn test_latest_reading_tracks_window() {
        let monitor = HydroMonitor::new();
        monitor.apply_readings_value(&json!({
            "a": { "timestamp": 300, "temperature": 21.0 },
            "b": { "timestamp": 100, "temperature": 22.0 },
        }));
        assert_eq!(monitor.latest_reading().unwrap().id, "a");
    }
}
