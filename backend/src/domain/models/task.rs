//! Domain model for reward-earning task kinds.
//!
//! The set of task kinds is closed: every kind has exactly one entry in the
//! definition table, so adding a kind without a reward or cooldown does not
//! compile.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Quick,
    Daily,
    Special,
    Custom,
}

/// Static configuration for one task kind. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDefinition {
    pub kind: TaskKind,
    /// Fixed reward, always positive
    pub reward: i64,
    pub cooldown_minutes: i64,
    /// Name used on the task card and in the activity history
    pub label: &'static str,
    /// Text shown while the task is available
    pub description: &'static str,
}

impl TaskDefinition {
    pub fn cooldown(&self) -> Duration {
        Duration::minutes(self.cooldown_minutes)
    }
}

const QUICK: TaskDefinition = TaskDefinition {
    kind: TaskKind::Quick,
    reward: 10,
    cooldown_minutes: 5,
    label: "Quick Task",
    description: "Complete a simple task",
};

const DAILY: TaskDefinition = TaskDefinition {
    kind: TaskKind::Daily,
    reward: 50,
    cooldown_minutes: 24 * 60,
    label: "Daily Challenge",
    description: "Complete your daily task",
};

const SPECIAL: TaskDefinition = TaskDefinition {
    kind: TaskKind::Special,
    reward: 100,
    cooldown_minutes: 48 * 60,
    label: "Special Task",
    description: "Complete a special challenge",
};

const CUSTOM: TaskDefinition = TaskDefinition {
    kind: TaskKind::Custom,
    reward: 25,
    cooldown_minutes: 12 * 60,
    label: "Your Custom Task",
    description: "Description of your task",
};

impl TaskKind {
    /// All task kinds in board order
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Quick,
        TaskKind::Daily,
        TaskKind::Special,
        TaskKind::Custom,
    ];

    pub fn definition(self) -> &'static TaskDefinition {
        match self {
            TaskKind::Quick => &QUICK,
            TaskKind::Daily => &DAILY,
            TaskKind::Special => &SPECIAL,
            TaskKind::Custom => &CUSTOM,
        }
    }

    pub fn reward(self) -> i64 {
        self.definition().reward
    }

    /// Stable lowercase identifier used as the storage key
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Quick => "quick",
            TaskKind::Daily => "daily",
            TaskKind::Special => "special",
            TaskKind::Custom => "custom",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown task kind: {0}")]
pub struct UnknownTaskKind(pub String);

impl FromStr for TaskKind {
    type Err = UnknownTaskKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(TaskKind::Quick),
            "daily" => Ok(TaskKind::Daily),
            "special" => Ok(TaskKind::Special),
            "custom" => Ok(TaskKind::Custom),
            _ => Err(UnknownTaskKind(s.to_string())),
        }
    }
}
