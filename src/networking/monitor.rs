//! Backend connectivity monitor
//!
//! Probes `/health` on a fixed interval (first probe immediately) and
//! publishes the result through a `watch` channel, which always holds the
//! latest [`ConnectionStatus`]. The monitor runs on its own task and never
//! touches the game session.

use crate::networking::client::ResilientClient;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

/// Latest known connectivity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub connected: bool,
    /// Time of the last completed probe, `None` before the first one
    pub last_checked: Option<DateTime<Utc>>,
}

impl Default for ConnectionStatus {
    /// Optimistic until the first probe says otherwise
    fn default() -> Self {
        Self {
            connected: true,
            last_checked: None,
        }
    }
}

/// Handle to a running probe task; stops the task when dropped
#[derive(Debug)]
pub struct ConnectionMonitor {
    status: watch::Receiver<ConnectionStatus>,
    task: JoinHandle<()>,
}

impl ConnectionMonitor {
    /// Start probing every `every` on the current tokio runtime
    pub fn spawn(client: Arc<ResilientClient>, every: Duration) -> Self {
        let (tx, status) = watch::channel(ConnectionStatus::default());
        let task = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                probe(&client, &tx).await;
                if tx.is_closed() {
                    break;
                }
            }
        });
        Self { status, task }
    }

    /// Start probing at the client's configured health interval
    pub fn spawn_default(client: Arc<ResilientClient>) -> Self {
        let every = client.settings().health_interval();
        Self::spawn(client, every)
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status.borrow().clone()
    }

    /// Receiver notified on every completed probe
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.clone()
    }
}

impl Drop for ConnectionMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn probe(client: &ResilientClient, tx: &watch::Sender<ConnectionStatus>) {
    let connected = client.check_health().await;
    let was_connected = tx.borrow().connected;
    if was_connected && !connected {
        warn!("[MONITOR] Backend connection lost");
    } else if !was_connected && connected {
        info!("[MONITOR] Backend connection restored");
    }
    tx.send_replace(ConnectionStatus {
        connected,
        last_checked: Some(Utc::now()),
    });
}
