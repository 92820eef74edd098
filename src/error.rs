use thiserror::Error;

/// Errors raised while managing or persisting tasks.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("invalid status: {0} (expected to_do, doing or done)")]
    InvalidStatus(String),

    #[error("invalid task id: {0}")]
    InvalidId(String),

    #[error("no task ids left after #{0}")]
    IdsExhausted(u32),

    #[error("task #{0} appears more than once")]
    DuplicateId(u32),

    #[error(
        "task #{id} has status {status} but completed_at is {state}",
        state = completion_state(completed)
    )]
    CompletionMismatch {
        id: u32,
        status: crate::task::Status,
        completed: bool,
    },
}

fn completion_state(completed: &bool) -> &'static str {
    if *completed {
        "set"
    } else {
        "missing"
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
