//! Window maintenance for accepted readings
//!
//! Every snapshot from the push subscription is a full replacement payload:
//! the previous window is never merged with or diffed against the new one.
//! This module turns one snapshot mapping into the next window.

use serde_json::{Map, Value};

use crate::reading::Reading;

/// Full readings snapshot as delivered by the subscription adapter: record
/// key to raw record mapping.
pub type RawSnapshot = Map<String, Value>;

/// Build a fresh window from a full snapshot mapping.
///
/// Records that fail validation are dropped. Survivors are sorted ascending
/// by timestamp, ties broken by ascending record key, so window order never
/// depends on snapshot iteration order. The adapter pre-limits snapshots to
/// the most recent N records; no additional cap is applied here.
pub fn build_window(records: &RawSnapshot) -> Vec<Reading> {
    let mut window: Vec<Reading> = records
        .iter()
        .filter_map(|(key, record)| Reading::from_record(key.as_str(), record))
        .collect();
    window.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });
    window
}
