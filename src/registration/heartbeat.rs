//! Recurring heartbeat task

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::models::RegistrationState;
use crate::transport::HttpTransport;

/// Spawn the heartbeat loop for a live registration.
///
/// The request is awaited inline and the interval delays missed ticks, so a
/// slow dispatcher pushes the next beat back instead of stacking concurrent
/// requests. The loop exits once the shared state leaves `Registered`.
pub(crate) fn spawn(
    transport: Arc<dyn HttpTransport>,
    base_uri: String,
    uuid: String,
    interval: Duration,
    state: Arc<RwLock<RegistrationState>>,
    last_heartbeat: Arc<RwLock<Option<DateTime<Utc>>>>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the first beat belongs one
        // full interval after registration.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            if !state.read().is_registered() {
                debug!("Registration for [{}] gone, stopping heartbeat", uuid);
                break;
            }

            let url = format!("{}/service/uuid/{}/heartbeat", base_uri, uuid);
            match transport.patch(&url).await {
                Ok(response) if response.is_success() => {
                    debug!("+ Dispatch heartbeat [{}]", uuid);
                    *last_heartbeat.write() = Some(Utc::now());
                }
                Ok(response) => {
                    warn!(
                        "Heartbeat for [{}] rejected: status {}",
                        uuid, response.status
                    );
                }
                Err(e) => {
                    warn!("Heartbeat for [{}] failed: {}", uuid, e);
                }
            }
        }
    })
}
