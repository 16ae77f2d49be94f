//! Daily maintenance.
//!
//! The store never decides when battle counters reset; this task does.
//! It sleeps until the next UTC midnight, then walks every provisioned
//! account and applies the daily-reset transition through the normal
//! store path, so the sweep obeys the same gate as live commands.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveTime, Utc};
use tracing::{error, info, warn};

use crate::account::{AccountStore, Transition};

/// Restores every account's battle counter at each UTC midnight.
pub struct DailyResetTask {
    pub store: Arc<AccountStore>,
    pub battles_per_day: u32,
}

impl DailyResetTask {
    pub fn new(store: Arc<AccountStore>, battles_per_day: u32) -> Self {
        Self {
            store,
            battles_per_day,
        }
    }

    pub async fn start(self) {
        info!(
            "Daily reset scheduler started ({} battles per day)",
            self.battles_per_day
        );

        loop {
            let wait = until_next_utc_midnight();
            info!("Next daily reset in {}s", wait.as_secs());
            tokio::time::sleep(wait).await;
            self.run_once().await;
        }
    }

    /// One sweep over every provisioned account. Per-account failures are
    /// logged and skipped; the sweep itself never aborts the loop.
    pub async fn run_once(&self) {
        let user_ids = match self.store.user_ids().await {
            Ok(ids) => ids,
            Err(err) => {
                error!("Daily reset: could not list accounts: {}", err);
                return;
            }
        };

        let transition = Transition::DailyReset {
            battles: self.battles_per_day,
        };

        let mut reset = 0usize;
        for user_id in &user_ids {
            match self.store.apply(user_id, &transition).await {
                Ok(_) => reset += 1,
                Err(err) => warn!("Daily reset failed for {}: {}", user_id, err),
            }
        }

        info!("Daily reset complete: {}/{} accounts", reset, user_ids.len());
    }
}

/// Time left until 00:00:00 UTC tomorrow.
fn until_next_utc_midnight() -> Duration {
    let now = Utc::now();
    let midnight = (now.date_naive() + Days::new(1)).and_time(NaiveTime::MIN);
    (midnight.and_utc() - now)
        .to_std()
        .unwrap_or(Duration::from_secs(1))
}
