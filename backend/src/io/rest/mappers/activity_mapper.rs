//! backend/src/io/rest/mappers/activity_mapper.rs

use chrono::SecondsFormat;
use shared::{ActivityDto, ActivityListResponse};

use crate::domain::models::ActivityEntry;

pub struct ActivityMapper;

impl ActivityMapper {
    pub fn to_dto(domain: ActivityEntry) -> ActivityDto {
        ActivityDto {
            id: domain.id,
            user_id: domain.user_id,
            label: domain.label,
            amount: domain.amount,
            created_at: domain.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_list_response(entries: Vec<ActivityEntry>) -> ActivityListResponse {
        ActivityListResponse {
            activities: entries.into_iter().map(Self::to_dto).collect(),
        }
    }
}
