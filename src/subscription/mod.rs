//! Seam to the external push-subscription adapter
//!
//! The adapter owns transport: how it watches the remote store and how it
//! extracts snapshot payloads is its business. This module owns delivery
//! order: one task per feed drains events strictly in order and applies
//! them to the monitor. The readings feed and the status feed are separate
//! subscriptions with no ordering guarantee between them, so each gets its
//! own source and its own task.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use hydro_metrics::monitor::HydroMonitor;
//! use hydro_metrics::subscription::{attach, FeedEvent};
//! use serde_json::json;
//! use tokio::sync::mpsc;
//!
//! # async fn example() {
//! let monitor = Arc::new(HydroMonitor::new());
//! let (tx, rx) = mpsc::channel(16);
//! let handle = attach(Arc::clone(&monitor), rx);
//!
//! // The adapter pushes full snapshots whenever the remote collection
//! // changes.
//! tx.send(FeedEvent::Readings(json!({
//!     "r1": { "timestamp": 100, "temperature": "22.5" }
//! }))).await.unwrap();
//!
//! // Dropping the handle unsubscribes.
//! drop(handle);
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::Error;
use crate::monitor::HydroMonitor;

#[cfg(test)]
use mockall::automock;

/// One delivery from the push subscription.
#[derive(Debug)]
pub enum FeedEvent {
    /// Full readings snapshot; null means the remote collection is empty
    Readings(Value),
    /// Full status snapshot; null retains the previous status
    Status(Value),
    /// Transport failure reported by the adapter
    Error(Error),
}

/// Source of feed events, implemented by subscription adapters.
///
/// `None` means the subscription has ended and the feed task may stop.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SnapshotSource: Send {
    async fn recv(&mut self) -> Option<FeedEvent>;
}

#[async_trait]
impl SnapshotSource for mpsc::Receiver<FeedEvent> {
    async fn recv(&mut self) -> Option<FeedEvent> {
        mpsc::Receiver::recv(self).await
    }
}

/// Handle to a running feed task.
///
/// Dropping the handle unsubscribes; the monitor keeps its last state.
#[derive(Debug)]
pub struct FeedHandle {
    task: JoinHandle<()>,
}

impl FeedHandle {
    /// Stop draining the feed.
    pub fn unsubscribe(self) {
        self.task.abort();
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a task that drains `source` and applies each event to `monitor`.
///
/// Events are applied strictly in delivery order. A transport error is
/// logged with state retained; it never ends the task, so later snapshots
/// still land.
pub fn attach<S>(monitor: Arc<HydroMonitor>, mut source: S) -> FeedHandle
where
    S: SnapshotSource + 'static,
{
    let task = tokio::spawn(async move {
        while let Some(event) = source.recv().await {
            apply(&monitor, event);
        }
        debug!("feed closed");
    });
    FeedHandle { task }
}

fn apply(monitor: &HydroMonitor, event: FeedEvent) {
    match event {
        FeedEvent::Readings(payload) => monitor.apply_readings_value(&payload),
        FeedEvent::Status(payload) => monitor.apply_status_snapshot(Some(&payload)),
        FeedEvent::Error(error) => monitor.on_feed_error(&error),
    }
}
