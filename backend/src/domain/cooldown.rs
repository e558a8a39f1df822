//! Cooldown policy for task kinds.
//!
//! Pure functions over the static task table: no state, no I/O, no failure
//! modes. The current time is always passed in by the caller.

use chrono::{DateTime, Duration, Utc};

use super::models::task::{TaskDefinition, TaskKind};

/// Whether a task can be completed right now, and if not, for how long it
/// stays locked. `remaining` is zero when `available` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub remaining: Duration,
}

impl Availability {
    fn ready() -> Self {
        Self {
            available: true,
            remaining: Duration::zero(),
        }
    }
}

/// Read-only view of one task kind for a polling presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatus {
    pub definition: &'static TaskDefinition,
    pub availability: Availability,
    pub availability_text: String,
}

pub struct CooldownPolicy;

impl CooldownPolicy {
    pub fn cooldown_for(kind: TaskKind) -> Duration {
        kind.definition().cooldown()
    }

    pub fn label_for(kind: TaskKind) -> &'static str {
        kind.definition().label
    }

    /// A task with no prior completion is always available; otherwise it is
    /// available once `now - last_completion >= cooldown`.
    ///
    /// A completion timestamp in the future (clock skew between devices)
    /// keeps the task locked, with the remaining time capped at one full
    /// cooldown.
    pub fn is_available(
        kind: TaskKind,
        last_completion: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Availability {
        let Some(last_completion) = last_completion else {
            return Availability::ready();
        };

        let cooldown = Self::cooldown_for(kind);
        let elapsed = now - last_completion;
        if elapsed >= cooldown {
            return Availability::ready();
        }

        Availability {
            available: false,
            remaining: (cooldown - elapsed).min(cooldown),
        }
    }

    /// Human-readable remaining time.
    ///
    /// Uses ceiling division throughout so a locked task never reads
    /// "0 minutes": whole minutes below 60 minutes, whole hours otherwise.
    pub fn remaining_text(remaining: Duration) -> String {
        let millis = ceil_millis(remaining);
        let minutes = ceil_div(millis, 60_000);
        if minutes < 60 {
            pluralize(minutes, "minute")
        } else {
            pluralize(ceil_div(millis, 3_600_000), "hour")
        }
    }

    /// Idle description when available, "Available in ..." otherwise
    pub fn availability_text(kind: TaskKind, availability: &Availability) -> String {
        if availability.available {
            kind.definition().description.to_string()
        } else {
            format!("Available in {}", Self::remaining_text(availability.remaining))
        }
    }

    pub fn status(
        kind: TaskKind,
        last_completion: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> TaskStatus {
        let availability = Self::is_available(kind, last_completion, now);
        TaskStatus {
            definition: kind.definition(),
            availability_text: Self::availability_text(kind, &availability),
            availability,
        }
    }
}

fn ceil_millis(duration: Duration) -> i64 {
    if duration <= Duration::zero() {
        return 0;
    }
    let millis = duration.num_milliseconds();
    if Duration::milliseconds(millis) < duration {
        millis + 1
    } else {
        millis
    }
}

fn ceil_div(value: i64, unit: i64) -> i64 {
    (value + unit - 1) / unit
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_never_completed_is_available() {
        for kind in TaskKind::ALL {
            let availability = CooldownPolicy::is_available(kind, None, base());
            assert!(availability.available);
            assert_eq!(availability.remaining, Duration::zero());
        }
    }

    #[test]
    fn test_locked_immediately_after_completion() {
        for kind in TaskKind::ALL {
            let availability = CooldownPolicy::is_available(kind, Some(base()), base());
            assert!(!availability.available);
            assert_eq!(availability.remaining, CooldownPolicy::cooldown_for(kind));
        }
    }

    #[test]
    fn test_available_exactly_at_cooldown_boundary() {
        for kind in TaskKind::ALL {
            let cooldown = CooldownPolicy::cooldown_for(kind);
            let just_before = base() + cooldown - Duration::milliseconds(1);
            let boundary = base() + cooldown;

            let before = CooldownPolicy::is_available(kind, Some(base()), just_before);
            assert!(!before.available);
            assert_eq!(before.remaining, Duration::milliseconds(1));

            assert!(CooldownPolicy::is_available(kind, Some(base()), boundary).available);
        }
    }

    #[test]
    fn test_future_completion_is_capped_at_full_cooldown() {
        let future = base() + Duration::hours(3);
        let availability = CooldownPolicy::is_available(TaskKind::Quick, Some(future), base());
        assert!(!availability.available);
        assert_eq!(availability.remaining, Duration::minutes(5));
    }

    #[test]
    fn test_remaining_text_rounds_up() {
        assert_eq!(CooldownPolicy::remaining_text(Duration::minutes(5)), "5 minutes");
        assert_eq!(CooldownPolicy::remaining_text(Duration::seconds(61)), "2 minutes");
        assert_eq!(CooldownPolicy::remaining_text(Duration::seconds(59)), "1 minute");
        assert_eq!(CooldownPolicy::remaining_text(Duration::milliseconds(1)), "1 minute");
        assert_eq!(CooldownPolicy::remaining_text(Duration::nanoseconds(1)), "1 minute");
    }

    #[test]
    fn test_remaining_text_switches_to_hours_at_sixty_minutes() {
        assert_eq!(CooldownPolicy::remaining_text(Duration::seconds(59 * 60 + 1)), "1 hour");
        assert_eq!(CooldownPolicy::remaining_text(Duration::minutes(60)), "1 hour");
        assert_eq!(CooldownPolicy::remaining_text(Duration::minutes(61)), "2 hours");
        assert_eq!(CooldownPolicy::remaining_text(Duration::hours(24)), "24 hours");
    }

    #[test]
    fn test_availability_text() {
        let idle = CooldownPolicy::status(TaskKind::Special, None, base());
        assert_eq!(idle.availability_text, "Complete a special challenge");

        let later = base() + Duration::hours(47);
        let locked = CooldownPolicy::status(TaskKind::Special, Some(base()), later);
        assert_eq!(locked.availability_text, "Available in 1 hour");
        assert_eq!(locked.definition.label, "Special Task");
        assert_eq!(CooldownPolicy::label_for(TaskKind::Custom), "Your Custom Task");
    }
}
