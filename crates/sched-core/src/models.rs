use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::date::{CalendarDate, ParseDateError};

/// A scheduled task. An empty `repeat` marks a one-off task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub date: CalendarDate,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        !self.repeat.trim().is_empty()
    }
}

/// Raw `scheduler` table row; the date column holds `YYYYMMDD` text.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct TaskRow {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = ParseDateError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: row.id,
            date: row.date.parse()?,
            title: row.title,
            comment: row.comment,
            repeat: row.repeat,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    /// `YYYYMMDD`; `None` or empty means today
    pub date: Option<String>,
    pub comment: String,
    pub repeat: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub repeat: Option<String>,
}

#[derive(Debug)]
pub enum CompletionResult {
    /// A one-off task was done and has been removed.
    Removed(Task),
    /// A recurring task moved on; `previous` is the date it was due.
    Rescheduled { task: Task, previous: CalendarDate },
}

/// Free-text search over the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSearch {
    /// Tasks due on exactly this date.
    Date(CalendarDate),
    /// Tasks whose title or comment contains the text.
    Text(String),
}

impl TaskSearch {
    /// A `DD.MM.YYYY` date selects a single day; anything else is text.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(input, "%d.%m.%Y").map(CalendarDate::try_from) {
            Ok(Ok(date)) => Some(TaskSearch::Date(date)),
            _ => Some(TaskSearch::Text(input.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_parses_dotted_date() {
        assert_eq!(
            TaskSearch::parse("08.02.2024"),
            Some(TaskSearch::Date(CalendarDate::from_ymd(2024, 2, 8).unwrap()))
        );
    }

    #[test]
    fn test_search_falls_back_to_text() {
        assert_eq!(TaskSearch::parse(" gym "), Some(TaskSearch::Text("gym".to_string())));
        assert_eq!(
            TaskSearch::parse("31.02.2024"),
            Some(TaskSearch::Text("31.02.2024".to_string()))
        );
        assert_eq!(TaskSearch::parse("   "), None);
    }

    #[test]
    fn test_row_conversion_rejects_corrupt_date() {
        let row = TaskRow {
            id: 1,
            date: "2024-01-01".to_string(),
            title: "t".to_string(),
            comment: String::new(),
            repeat: String::new(),
        };
        assert!(Task::try_from(row).is_err());
    }

    #[test]
    fn test_task_serializes_date_as_wire_string() {
        let task = Task {
            id: 7,
            date: "20240301".parse().unwrap(),
            title: "Pay rent".to_string(),
            comment: String::new(),
            repeat: "m 1".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["date"], "20240301");
        assert_eq!(json["repeat"], "m 1");
        assert!(task.is_recurring());
    }
}
