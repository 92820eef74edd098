use crate::error::TaskError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    ToDo,
    Doing,
    Done,
}

impl Status {
    /// Display order of the board columns.
    pub const ALL: [Status; 3] = [Status::ToDo, Status::Doing, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::ToDo => "to_do",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Status::ToDo => "📋",
            Status::Doing => "🔄",
            Status::Done => "✅",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "to_do" => Ok(Status::ToDo),
            "doing" => Ok(Status::Doing),
            "done" => Ok(Status::Done),
            _ => Err(TaskError::InvalidStatus(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Task {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub status: Status,
    pub deadline: DateTime<Local>,
    pub created_at: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    /// Moves the task to `status`, keeping `completed_at` set exactly while it is done.
    pub fn set_status(&mut self, status: Status, now: DateTime<Local>) {
        let previous = self.status;
        self.status = status;
        if status == Status::Done && previous != Status::Done {
            self.completed_at = Some(now);
        } else if status != Status::Done {
            self.completed_at = None;
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }
}

/// A single field change applied by `TaskList::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskUpdate {
    Name(String),
    Category(String),
    Description(String),
    Status(Status),
    Deadline(DateTime<Local>),
}

impl TaskUpdate {
    pub fn apply(self, task: &mut Task, now: DateTime<Local>) {
        match self {
            TaskUpdate::Name(name) => task.name = name,
            TaskUpdate::Category(category) => task.category = category,
            TaskUpdate::Description(description) => task.description = description,
            TaskUpdate::Status(status) => task.set_status(status, now),
            TaskUpdate::Deadline(deadline) => task.deadline = deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(now: DateTime<Local>) -> Task {
        Task {
            id: 1,
            name: "Write report".to_string(),
            category: "Work".to_string(),
            description: "Quarterly numbers".to_string(),
            status: Status::ToDo,
            deadline: now + Duration::days(1),
            created_at: now,
            completed_at: None,
        }
    }

    #[test]
    fn test_status_parses_known_values() {
        assert_eq!("to_do".parse::<Status>().unwrap(), Status::ToDo);
        assert_eq!(" Doing ".parse::<Status>().unwrap(), Status::Doing);
        assert_eq!("DONE".parse::<Status>().unwrap(), Status::Done);
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        let err = "finished".parse::<Status>().unwrap_err();
        assert!(matches!(err, TaskError::InvalidStatus(ref s) if s == "finished"));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Status::ToDo).unwrap(), "\"to_do\"");
        let parsed: Status = serde_json::from_str("\"doing\"").unwrap();
        assert_eq!(parsed, Status::Doing);
    }

    #[test]
    fn test_set_status_done_keeps_first_completion() {
        let now = Local::now();
        let mut task = sample(now);
        task.set_status(Status::Done, now + Duration::hours(1));
        let first = task.completed_at;
        assert!(first.is_some());

        task.set_status(Status::Done, now + Duration::hours(5));
        assert_eq!(task.completed_at, first);
    }

    #[test]
    fn test_set_status_away_from_done_clears_completion() {
        let now = Local::now();
        let mut task = sample(now);
        task.set_status(Status::Done, now);
        task.set_status(Status::Doing, now);
        assert_eq!(task.status, Status::Doing);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_completed_at_omitted_when_absent() {
        let task = sample(Local::now());
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("completed_at"));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert!(back.completed_at.is_none());
    }
}
