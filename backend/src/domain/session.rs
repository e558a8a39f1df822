//! Session registry.
//!
//! One [`RewardLedger`] per open user session, each behind its own async
//! mutex so that operations for the same user run one at a time while
//! different users proceed independently.
//!
//! The registry map lock is only held for map lookups and edits. Loading
//! an account happens in a per-user slot after the map lock is released,
//! so a slow load for one user never stalls another.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use super::clock::Clock;
use super::models::HostIdentity;
use super::outcome::{LedgerError, LedgerResult};
use super::reward_ledger::RewardLedger;
use crate::storage::Connection;

pub type SessionHandle<C> = Arc<Mutex<RewardLedger<C>>>;

/// Filled once the user's account has loaded
type SessionSlot<C> = Arc<OnceCell<SessionHandle<C>>>;

pub struct SessionRegistry<C: Connection> {
    connection: C,
    clock: Arc<dyn Clock>,
    sessions: Mutex<HashMap<String, SessionSlot<C>>>,
}

impl<C: Connection> SessionRegistry<C> {
    pub fn new(connection: C, clock: Arc<dyn Clock>) -> Self {
        Self {
            connection,
            clock,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Open a session for `identity`, reusing the live one if present.
    ///
    /// Concurrent opens for the same user share one slot and produce a
    /// single ledger. A failed load leaves the slot empty and removes it.
    pub async fn open(&self, identity: &HostIdentity) -> LedgerResult<SessionHandle<C>> {
        let slot = {
            let mut sessions = self.sessions.lock().await;
            sessions
                .entry(identity.user_id().to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        if let Some(handle) = slot.get() {
            debug!("Reusing open session for user {}", identity.user_id());
            return Ok(handle.clone());
        }

        let result = slot
            .get_or_try_init(|| async {
                let ledger =
                    RewardLedger::load(&self.connection, self.clock.clone(), identity).await?;
                info!("Opened session for user {}", identity.user_id());
                Ok::<_, LedgerError>(Arc::new(Mutex::new(ledger)))
            })
            .await;

        match result {
            Ok(handle) => Ok(handle.clone()),
            Err(e) => {
                let mut sessions = self.sessions.lock().await;
                if let Some(current) = sessions.get(identity.user_id()) {
                    if Arc::ptr_eq(current, &slot) && current.get().is_none() {
                        sessions.remove(identity.user_id());
                    }
                }
                Err(e)
            }
        }
    }

    /// Handle of a loaded session; `None` if absent or still loading
    pub async fn with_session(&self, user_id: &str) -> Option<SessionHandle<C>> {
        let sessions = self.sessions.lock().await;
        sessions.get(user_id).and_then(|slot| slot.get().cloned())
    }

    /// Discard the in-memory snapshot. Returns false if no session was open.
    pub async fn close(&self, user_id: &str) -> bool {
        let removed = self.sessions.lock().await.remove(user_id);
        let was_open = removed.map_or(false, |slot| slot.get().is_some());
        if was_open {
            info!("Closed session for user {}", user_id);
        }
        was_open
    }

    /// Number of loaded sessions
    pub async fn open_count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.values().filter(|slot| slot.initialized()).count()
    }
}
