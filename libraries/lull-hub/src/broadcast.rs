//! Best-effort fan-out of hub notifications to open tabs
//!
//! Delivery is at-most-once per tab with no retry. A tab without the content
//! script rejects the send; that is counted and otherwise ignored.

use async_trait::async_trait;
use futures::future::join_all;
use lull_core::{Message, Result};
use tracing::debug;

/// Browser tab identifier
pub type TabId = i32;

/// Hands notifications to every open page without waiting for delivery
pub trait StateNotifier {
    /// Queue `message` for every open tab and return immediately
    fn notify_all(&self, message: Message);
}

/// Tab enumeration and per-tab delivery
#[async_trait(?Send)]
pub trait TabMessenger {
    /// Ids of every open tab (`None` for tabs the browser gives no id)
    ///
    /// Ids that are not positive are skipped by [`fan_out`].
    async fn open_tabs(&self) -> Result<Vec<Option<TabId>>>;

    /// Deliver one message to one tab
    async fn send_to_tab(&self, tab: TabId, message: &Message) -> Result<()>;
}

/// Outcome counts of one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Tabs that accepted the message
    pub delivered: usize,

    /// Tabs skipped because they had no usable id (missing, zero or negative)
    pub skipped: usize,

    /// Tabs that rejected the message (usually no listener)
    pub failed: usize,
}

/// Send `message` to every open tab in parallel
pub async fn fan_out<M: TabMessenger + ?Sized>(messenger: &M, message: &Message) -> FanOutReport {
    let tabs = match messenger.open_tabs().await {
        Ok(tabs) => tabs,
        Err(e) => {
            debug!("Could not list tabs for {}: {}", message.kind(), e);
            return FanOutReport::default();
        }
    };

    let mut report = FanOutReport::default();
    let mut sends = Vec::with_capacity(tabs.len());
    for tab in tabs {
        match tab {
            Some(id) if id > 0 => sends.push(async move {
                (id, messenger.send_to_tab(id, message).await)
            }),
            _ => report.skipped += 1,
        }
    }

    for (id, result) in join_all(sends).await {
        match result {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                debug!("Tab {} did not take {}: {}", id, message.kind(), e);
                report.failed += 1;
            }
        }
    }

    debug!(
        "{} fan-out: {} delivered, {} failed, {} skipped",
        message.kind(),
        report.delivered,
        report.failed,
        report.skipped
    );
    report
}
