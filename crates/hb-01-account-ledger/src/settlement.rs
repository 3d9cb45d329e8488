//! # Hold Settlement Task
//!
//! Periodically debits every account's hold from its balance.
//!
//! The first pass runs one full interval after start, then every interval.
//! A failed pass is logged and retried at the next tick; the loop only exits
//! on the shutdown signal.

use crate::ports::inbound::AccountLedgerApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Default settlement interval (10 minutes).
pub const DEFAULT_HOLD_UPDATE_INTERVAL: Duration = Duration::from_secs(600);

/// Longest accepted settlement interval (one year).
pub const MAX_HOLD_UPDATE_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Accounts settled per store batch.
pub const SETTLEMENT_BATCH_SIZE: usize = 512;

/// Run settlement passes every `period` until `shutdown` becomes `true`
/// or its sender is dropped.
///
/// `period` is clamped to [`MAX_HOLD_UPDATE_INTERVAL`].
pub async fn run_settlement_loop<L>(
    ledger: Arc<L>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    L: AccountLedgerApi + ?Sized,
{
    if period > MAX_HOLD_UPDATE_INTERVAL {
        warn!(
            requested_secs = period.as_secs(),
            max_secs = MAX_HOLD_UPDATE_INTERVAL.as_secs(),
            "settlement interval too long, clamping"
        );
    }
    let period = period.min(MAX_HOLD_UPDATE_INTERVAL);

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_secs = period.as_secs(), "Hold settlement task started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match ledger.settle_holds().await {
                    Ok(report) => debug!(?report, "settlement pass finished"),
                    Err(e) => warn!(error = %e, "settlement pass failed, retrying next interval"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Hold settlement task stopped");
}
