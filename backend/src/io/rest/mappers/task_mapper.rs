//! backend/src/io/rest/mappers/task_mapper.rs

use chrono::Duration;
use shared::{TaskAvailabilityDto, TaskBoardResponse};

use crate::domain::cooldown::TaskStatus;

pub struct TaskMapper;

impl TaskMapper {
    pub fn to_dto(status: TaskStatus) -> TaskAvailabilityDto {
        let definition = status.definition;
        TaskAvailabilityDto {
            task_kind: definition.kind.as_str().to_string(),
            label: definition.label.to_string(),
            reward: definition.reward,
            cooldown_seconds: definition.cooldown().num_seconds(),
            available: status.availability.available,
            remaining_seconds: ceil_seconds(status.availability.remaining),
            availability_text: status.availability_text,
        }
    }

    pub fn to_board_response(statuses: Vec<TaskStatus>) -> TaskBoardResponse {
        TaskBoardResponse {
            tasks: statuses.into_iter().map(Self::to_dto).collect(),
        }
    }
}

/// Round up so a locked task never reports zero seconds left
fn ceil_seconds(remaining: Duration) -> i64 {
    let millis = remaining.num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + 999) / 1000
}
