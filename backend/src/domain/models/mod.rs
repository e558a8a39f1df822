//! Domain models for the reward ledger.

pub mod account;
pub mod activity;
pub mod identity;
pub mod task;
pub mod withdrawal;

pub use account::UserAccount;
pub use activity::{ActivityEntry, NewActivity, WITHDRAWAL_LABEL};
pub use identity::HostIdentity;
pub use task::{TaskDefinition, TaskKind, UnknownTaskKind};
pub use withdrawal::{NewWithdrawal, WithdrawalRequest, WithdrawalStatus};
