//! Hydro Metrics - A Rust library for hydroponic sensor telemetry
//!
//! This crate is the data core of a live hydroponics dashboard. A push
//! subscription to a remote store delivers full snapshots of loosely-typed
//! sensor records; this crate parses and validates them, maintains a
//! bounded, time-ordered window of accepted readings, and derives the
//! values the rendering layer displays: the latest reading, the system
//! status, and per-metric chart series.
//!
//! # Features
//!
//! - **Record parsing**: coerces number-or-string scalars into typed
//!   readings, dropping records without a finite temperature
//! - **Window maintenance**: full-replace, deterministically ordered window
//!   of the most recent accepted readings
//! - **Latest-value derivation**: the chronologically last reading as a
//!   computed view, never a separately mutated field
//! - **Status normalization**: sparse-update system status with defaulting
//!   for missing fields
//! - **Series projection**: chart-ready label and value arrays where a
//!   missing metric renders as a gap, never as zero
//! - **Subscription seam**: a mockable source trait plus a per-feed tokio
//!   task that applies events in delivery order
//!
//! # Examples
//!
//! ```rust
//! use hydro_metrics::prelude::*;
//! use serde_json::json;
//!
//! let monitor = HydroMonitor::new();
//! monitor.apply_readings_value(&json!({
//!     "r1": { "timestamp": 100, "temperature": "22.5", "humidity": "60" },
//!     "r2": { "timestamp": 90, "temperature": "bad" },
//! }));
//!
//! // r2 is dropped; r1 is the whole window and therefore the latest value.
//! let latest = monitor.latest_reading().unwrap();
//! assert_eq!(latest.temperature, 22.5);
//! assert_eq!(format_number(latest.humidity, 1), "60.0");
//! assert_eq!(format_number(latest.ph, 2), "N/A");
//! ```
//!
//! # Error Handling
//!
//! Nothing inside the snapshot path is fatal. A record that fails coercion
//! is dropped; a missing field becomes a gap; a transport failure is logged
//! through [`monitor::HydroMonitor::on_feed_error`] with all held state
//! retained, so the dashboard keeps showing the last known good data. The
//! [`Error`] type exists for the adapter seam and serialization surface,
//! not for the transform pipeline.
//!
//! # Thread Safety
//!
//! [`monitor::HydroMonitor`] is `Send + Sync`. Each feed writes its own
//! state slot behind its own lock, and every write is a wholesale
//! replacement, so readers see either the previous snapshot or the next
//! one, never a mix.

pub mod chart;
pub mod error;
pub mod monitor;
pub mod reading;
pub mod status;
pub mod subscription;
pub mod window;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::chart::{format_number, ChartSeries, Metric};
    pub use crate::error::{Error, Result};
    pub use crate::monitor::HydroMonitor;
    pub use crate::reading::Reading;
    pub use crate::status::SystemStatus;
    pub use crate::subscription::{attach, FeedEvent, FeedHandle, SnapshotSource};
    pub use crate::window::RawSnapshot;
}
