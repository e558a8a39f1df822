//! Reward ledger for a single user session.
//!
//! Holds the authoritative in-memory snapshot of one user's account and is
//! the only code path that mutates it. Every mutation is computed on a copy,
//! written to storage, and only then swapped into the snapshot, so a failed
//! account write leaves the session exactly as it was.
//!
//! Once the account write has succeeded the mutation is durable and is
//! never rolled back. Failures of the auxiliary records written afterwards
//! (activity history, withdrawal request) are reported as a partial
//! failure through [`Committed::missing`].
//!
//! Operations take `&mut self`; callers sharing a ledger between tasks
//! serialize access through [`super::session::SessionRegistry`].

use std::sync::Arc;
use tracing::{error, info, warn};

use super::activity_recorder::ActivityRecorder;
use super::clock::Clock;
use super::cooldown::{Availability, CooldownPolicy, TaskStatus};
use super::models::{
    ActivityEntry, HostIdentity, NewWithdrawal, TaskKind, UserAccount, WithdrawalStatus,
    WITHDRAWAL_LABEL,
};
use super::outcome::{Committed, LedgerError, LedgerResult, MissingRecord, Rejection};
use crate::storage::{Connection, StoreError, UserStorage, WithdrawalStorage};

pub struct RewardLedger<C: Connection> {
    user_repository: C::UserRepository,
    withdrawal_repository: C::WithdrawalRepository,
    activity_recorder: ActivityRecorder<C>,
    clock: Arc<dyn Clock>,
    account: UserAccount,
}

impl<C: Connection> RewardLedger<C> {
    /// Load the user's account, creating and committing a zero-state record
    /// on first sight. Fails with `StoreUnavailable` if either the fetch or
    /// the insert fails; no ledger exists in that case.
    pub async fn load(
        connection: &C,
        clock: Arc<dyn Clock>,
        identity: &HostIdentity,
    ) -> LedgerResult<Self> {
        let user_repository = connection.create_user_repository();

        let account = match user_repository.get_user(identity.user_id()).await {
            Ok(Some(account)) => {
                info!("Loaded account for user {} (balance {})", account.id, account.balance);
                account
            }
            Ok(None) => {
                let account =
                    UserAccount::new(identity.user_id(), identity.display_name(), clock.now());
                if let Err(e) = user_repository.insert_user(&account).await {
                    error!("Failed to create account for user {}: {}", account.id, e);
                    return Err(LedgerError::StoreUnavailable(e));
                }
                info!("Created account for user {}", account.id);
                account
            }
            Err(e) => {
                error!("Failed to load account for user {}: {}", identity.user_id(), e);
                return Err(LedgerError::StoreUnavailable(e));
            }
        };

        Ok(Self {
            user_repository,
            withdrawal_repository: connection.create_withdrawal_repository(),
            activity_recorder: ActivityRecorder::new(connection, clock.clone()),
            clock,
            account,
        })
    }

    pub fn account(&self) -> &UserAccount {
        &self.account
    }

    /// Read-only availability check against the snapshot
    pub fn availability(&self, kind: TaskKind) -> Availability {
        CooldownPolicy::is_available(kind, self.account.last_completion(kind), self.clock.now())
    }

    /// Status of every task kind, evaluated at a single instant
    pub fn task_board(&self) -> Vec<TaskStatus> {
        let now = self.clock.now();
        TaskKind::ALL
            .iter()
            .map(|&kind| CooldownPolicy::status(kind, self.account.last_completion(kind), now))
            .collect()
    }

    /// Complete a task: credit its reward, bump the counter and start its
    /// cooldown. Rejected with `OnCooldown` (no writes) while locked.
    pub async fn complete_task(&mut self, kind: TaskKind) -> LedgerResult<Committed> {
        let now = self.clock.now();
        let availability =
            CooldownPolicy::is_available(kind, self.account.last_completion(kind), now);
        if !availability.available {
            info!(
                "Rejected {} task for user {}: on cooldown for {}",
                kind,
                self.account.id,
                CooldownPolicy::remaining_text(availability.remaining)
            );
            return Err(Rejection::OnCooldown {
                kind,
                remaining: availability.remaining,
            }
            .into());
        }

        let next = self
            .account
            .with_completion(kind, now)
            .ok_or_else(|| self.out_of_range("completing a task"))?;
        self.commit_account(next).await?;

        let definition = kind.definition();
        let mut missing = Vec::new();
        if let Err(e) = self
            .activity_recorder
            .record(&self.account.id, definition.label, definition.reward)
            .await
        {
            error!(
                "Account committed but activity entry for {} task of user {} failed: {}",
                kind, self.account.id, e
            );
            missing.push(MissingRecord::ActivityLog);
        }

        info!(
            "User {} completed {} task (+{}), balance {}",
            self.account.id, kind, definition.reward, self.account.balance
        );
        Ok(self.committed(missing))
    }

    /// Request a withdrawal of `amount`, debiting the balance immediately and
    /// recording a pending withdrawal request plus a negative history line.
    pub async fn request_withdrawal(&mut self, amount: i64) -> LedgerResult<Committed> {
        if amount <= 0 {
            info!("Rejected withdrawal of {} for user {}: invalid amount", amount, self.account.id);
            return Err(Rejection::InvalidAmount.into());
        }
        if amount > self.account.balance {
            info!(
                "Rejected withdrawal of {} for user {}: balance is {}",
                amount, self.account.id, self.account.balance
            );
            return Err(Rejection::InsufficientBalance {
                requested: amount,
                available: self.account.balance,
            }
            .into());
        }

        let next = self
            .account
            .with_debit(amount)
            .ok_or_else(|| self.out_of_range("withdrawing"))?;
        self.commit_account(next).await?;

        // The debit is durable from here on; each auxiliary record is
        // attempted independently.
        let mut missing = Vec::new();
        let withdrawal = NewWithdrawal {
            user_id: self.account.id.clone(),
            user_name: self.account.name.clone(),
            amount,
            status: WithdrawalStatus::Pending,
            created_at: self.clock.now(),
        };
        match self.withdrawal_repository.insert_withdrawal(withdrawal).await {
            Ok(request) => info!(
                "Withdrawal request {} for {} created for user {}",
                request.id, amount, self.account.id
            ),
            Err(e) => {
                error!(
                    "Account debited but withdrawal request of {} for user {} failed: {}",
                    amount, self.account.id, e
                );
                missing.push(MissingRecord::WithdrawalLog);
            }
        }

        if let Err(e) = self
            .activity_recorder
            .record(&self.account.id, WITHDRAWAL_LABEL, -amount)
            .await
        {
            error!(
                "Account debited but activity entry for withdrawal of user {} failed: {}",
                self.account.id, e
            );
            missing.push(MissingRecord::ActivityLog);
        }

        info!(
            "User {} withdrew {}, balance {}",
            self.account.id, amount, self.account.balance
        );
        Ok(self.committed(missing))
    }

    /// Most recent history lines, newest first; empty if the read fails
    pub async fn recent_activity(&self, limit: u32) -> Vec<ActivityEntry> {
        self.activity_recorder.recent_for(&self.account.id, limit).await
    }

    /// Write `next` to storage and adopt it as the snapshot on success only
    async fn commit_account(&mut self, next: UserAccount) -> LedgerResult<()> {
        if let Err(e) = self.user_repository.update_user(&next).await {
            warn!(
                "Account write for user {} failed, keeping previous state: {}",
                self.account.id, e
            );
            return Err(LedgerError::StoreUnavailable(e));
        }
        self.account = next;
        Ok(())
    }

    /// The stored account cannot absorb another mutation without overflow
    fn out_of_range(&self, action: &str) -> LedgerError {
        error!(
            "Account of user {} is out of range for {} (balance {}, tasks {})",
            self.account.id, action, self.account.balance, self.account.tasks_completed
        );
        LedgerError::StoreUnavailable(StoreError::Malformed(format!(
            "account {} balance out of range",
            self.account.id
        )))
    }

    fn committed(&self, missing: Vec<MissingRecord>) -> Committed {
        Committed {
            account: self.account.clone(),
            missing,
        }
    }
}
