//! backend/src/io/rest/mappers/account_mapper.rs

use chrono::SecondsFormat;
use shared::AccountDto;

use crate::domain::models::UserAccount;

/// Mapper from the domain account snapshot to its wire form.
pub struct AccountMapper;

impl AccountMapper {
    pub fn to_dto(domain: &UserAccount) -> AccountDto {
        AccountDto {
            id: domain.id.clone(),
            name: domain.name.clone(),
            balance: domain.balance,
            tasks_completed: domain.tasks_completed,
            last_task_completion_time: domain
                .last_task_completion_time
                .iter()
                .map(|(kind, at)| {
                    (
                        kind.as_str().to_string(),
                        at.to_rfc3339_opts(SecondsFormat::Millis, true),
                    )
                })
                .collect(),
        }
    }
}
