//! Activity recorder for the reward ledger.
//!
//! Appends immutable history lines and reads back the most recent ones.
//! Appends never read-modify-write, so they need no locking. Reads are
//! best-effort: a failed read yields an empty history instead of an error.

use std::sync::Arc;
use tracing::{debug, warn};

use super::clock::Clock;
use super::models::{ActivityEntry, NewActivity};
use crate::storage::{ActivityStorage, Connection, StoreResult};

pub struct ActivityRecorder<C: Connection> {
    repository: C::ActivityRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> ActivityRecorder<C> {
    pub fn new(connection: &C, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: connection.create_activity_repository(),
            clock,
        }
    }

    /// Append one entry stamped with the current time
    pub async fn record(&self, user_id: &str, label: &str, amount: i64) -> StoreResult<ActivityEntry> {
        let entry = self
            .repository
            .insert_activity(NewActivity {
                user_id: user_id.to_string(),
                label: label.to_string(),
                amount,
                created_at: self.clock.now(),
            })
            .await?;
        debug!("Recorded activity {} for user {}: {} {}", entry.id, user_id, label, amount);
        Ok(entry)
    }

    /// Most recent `limit` entries, newest first; empty on read failure
    pub async fn recent_for(&self, user_id: &str, limit: u32) -> Vec<ActivityEntry> {
        match self.repository.list_activities(user_id, limit).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to load activity history for user {}: {}", user_id, e);
                Vec::new()
            }
        }
    }
}
