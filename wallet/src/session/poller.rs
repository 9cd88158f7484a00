//! # Balance Poller
//!
//! Keeps the active account's free balance fresh. One background task per
//! handle, owned by the [`PollHandle`] it returns:
//!
//! 1. Query the balance immediately.
//! 2. Convert base units to tokens and publish on a `watch` channel.
//! 3. Sleep for the interval, then go to 1.
//!
//! ## Shutdown
//!
//! Same pattern as a long-running service loop: the task watches a
//! `tokio::sync::watch` shutdown channel and exits when it flips to `true`
//! or when its sender is dropped. [`PollHandle::cancel`] does the former,
//! dropping the handle does the latter. Either way no further queries run.
//!
//! A failed query is logged and skipped; the last good balance stays
//! published.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::{WalletConfig, BALANCE_POLL_INTERVAL};
use crate::transaction::amount::from_base_units;
use crate::transaction::chain::ChainClient;

/// Spawns balance polling tasks.
#[derive(Clone)]
pub struct BalancePoller {
    chain: Arc<dyn ChainClient>,
    interval: Duration,
}

impl BalancePoller {
    /// A zero `interval` falls back to the default 20 seconds.
    pub fn new(chain: Arc<dyn ChainClient>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            BALANCE_POLL_INTERVAL
        } else {
            interval
        };
        Self { chain, interval }
    }

    /// Poller using the configured interval.
    pub fn from_config(chain: Arc<dyn ChainClient>, config: &WalletConfig) -> Self {
        Self::new(chain, config.poll_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start polling `address`. Must be called inside a Tokio runtime.
    ///
    /// The first query runs right away; the handle's balance is `None` until
    /// it completes.
    pub fn poll(&self, address: &str) -> PollHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (balance_tx, balance_rx) = watch::channel(None);

        let task = tokio::spawn(run(
            Arc::clone(&self.chain),
            address.to_string(),
            self.interval,
            balance_tx,
            shutdown_rx,
        ));

        info!(address, interval_secs = self.interval.as_secs(), "balance polling started");

        PollHandle {
            address: address.to_string(),
            shutdown: shutdown_tx,
            balance: balance_rx,
            task: Some(task),
        }
    }
}

async fn run(
    chain: Arc<dyn ChainClient>,
    address: String,
    interval: Duration,
    balance: watch::Sender<Option<Decimal>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => {
                debug!(%address, "balance poller shutting down");
                return;
            }
        }
        if *shutdown.borrow() {
            return;
        }

        let result = tokio::select! {
            result = chain.query_balance(&address) => result,
            _ = shutdown.changed() => {
                debug!(%address, "balance poller shutting down mid-query");
                return;
            }
        };

        match result {
            Ok(base) => {
                let tokens = from_base_units(base);
                debug!(%address, balance = %tokens, "balance refreshed");
                balance.send_replace(Some(tokens));
            }
            Err(e) => {
                warn!(%address, error = %e, "balance query failed, keeping last value");
            }
        }
    }
}

/// Owner of one polling task.
///
/// Dropping the handle stops the task.
pub struct PollHandle {
    address: String,
    shutdown: watch::Sender<bool>,
    balance: watch::Receiver<Option<Decimal>>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Address being polled.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Most recent balance in tokens, `None` before the first answer.
    pub fn latest(&self) -> Option<Decimal> {
        *self.balance.borrow()
    }

    /// A receiver that wakes on every balance update.
    pub fn subscribe(&self) -> watch::Receiver<Option<Decimal>> {
        self.balance.clone()
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop polling. No query starts after this returns.
    pub fn cancel(mut self) {
        self.stop();
        info!(address = %self.address, "balance polling cancelled");
    }

    fn stop(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PollHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollHandle")
            .field("address", &self.address)
            .field("latest", &self.latest())
            .finish()
    }
}
