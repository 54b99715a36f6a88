use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle view derived from the item flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Pending,
    Active,
    Completed,
}

/// One checklist entry.
///
/// Moves forward only: pending, then active, then completed. Mutation goes
/// through [`TaskStore`](super::TaskStore); callers only ever see copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoItem {
    pub id: u32,
    pub description: String,
    pub is_active: bool,
    pub is_completed: bool,
    pub tool_used: Option<String>,
    pub completion_notes: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl TodoItem {
    pub(crate) fn new(id: u32, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            is_active: false,
            is_completed: false,
            tool_used: None,
            completion_notes: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn status(&self) -> TodoStatus {
        if self.is_completed {
            TodoStatus::Completed
        } else if self.is_active {
            TodoStatus::Active
        } else {
            TodoStatus::Pending
        }
    }

    /// Elapsed time between activation and completion.
    pub fn duration(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    pub fn status_badge(&self) -> &'static str {
        match self.status() {
            TodoStatus::Completed => "✓ Completed",
            TodoStatus::Active => "⚙️ In Progress",
            TodoStatus::Pending => "⏳ Pending",
        }
    }

    /// Human readable duration: seconds below one minute, minutes above.
    pub fn duration_display(&self) -> String {
        match self.duration() {
            Some(duration) => format_duration(duration),
            None if self.is_active => "In progress...".to_string(),
            None => "--".to_string(),
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let seconds = duration.num_milliseconds() as f64 / 1000.0;
    if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else {
        format!("{:.1}m", seconds / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(start_offset_ms: i64) -> TodoItem {
        let end = Utc::now();
        let mut item = TodoItem::new(1, "Verify result");
        item.is_completed = true;
        item.start_time = Some(end - Duration::milliseconds(start_offset_ms));
        item.end_time = Some(end);
        item
    }

    #[test]
    fn badge_follows_lifecycle() {
        let mut item = TodoItem::new(1, "Parse request");
        assert_eq!(item.status(), TodoStatus::Pending);
        assert_eq!(item.status_badge(), "⏳ Pending");

        item.is_active = true;
        assert_eq!(item.status_badge(), "⚙️ In Progress");

        item.is_active = false;
        item.is_completed = true;
        assert_eq!(item.status(), TodoStatus::Completed);
        assert_eq!(item.status_badge(), "✓ Completed");
    }

    #[test]
    fn duration_display_uses_seconds_under_a_minute() {
        assert_eq!(timed(1_500).duration_display(), "1.5s");
        assert_eq!(timed(0).duration_display(), "0.0s");
    }

    #[test]
    fn duration_display_switches_to_minutes() {
        assert_eq!(timed(90_000).duration_display(), "1.5m");
        assert_eq!(timed(60_000).duration_display(), "1.0m");
    }

    #[test]
    fn duration_display_without_timestamps() {
        let mut item = TodoItem::new(2, "Summarize");
        assert_eq!(item.duration(), None);
        assert_eq!(item.duration_display(), "--");

        item.is_active = true;
        item.start_time = Some(Utc::now());
        assert_eq!(item.duration_display(), "In progress...");
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let value = serde_json::to_value(TodoItem::new(3, "Draft")).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["is_completed"], false);
        assert!(value["completion_notes"].is_null());
    }
}
