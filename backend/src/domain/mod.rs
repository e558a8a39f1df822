//! # Domain Module
//!
//! Business logic for the task reward ledger:
//!
//! - [`cooldown`]: pure availability rules per task kind
//! - [`reward_ledger`]: the per-user account snapshot and its mutations
//! - [`activity_recorder`]: append-only earning/spending history
//! - [`session`]: per-user serialization of ledger operations
//!
//! The domain depends on storage only through the traits in
//! [`crate::storage::traits`], and on time only through [`clock::Clock`].

pub mod activity_recorder;
pub mod amount;
pub mod clock;
pub mod cooldown;
pub mod models;
pub mod outcome;
pub mod reward_ledger;
pub mod session;

pub use activity_recorder::ActivityRecorder;
pub use clock::{Clock, SystemClock};
pub use cooldown::{Availability, CooldownPolicy, TaskStatus};
pub use outcome::{Committed, LedgerError, LedgerResult, MissingRecord, Rejection};
pub use reward_ledger::RewardLedger;
pub use session::{SessionHandle, SessionRegistry};
