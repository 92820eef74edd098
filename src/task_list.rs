use crate::error::{Result, TaskError};
use crate::task::{Status, Task, TaskUpdate};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, io, path::Path};
use tracing::{debug, info};

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    /// Replaces the list with the contents of `path`. A missing file leaves the list untouched;
    /// a file with repeated ids or a completion time out of step with its status is rejected.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no task file yet");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let loaded: TaskList = serde_json::from_str(&data)?;
        loaded.validate()?;
        *self = loaded;
        info!(path = %path.display(), count = self.tasks.len(), "loaded tasks");
        Ok(())
    }

    pub fn add(
        &mut self,
        name: String,
        category: String,
        description: String,
        deadline: DateTime<Local>,
    ) -> Result<&Task> {
        self.add_at(name, category, description, deadline, Local::now())
    }

    pub fn add_at(
        &mut self,
        name: String,
        category: String,
        description: String,
        deadline: DateTime<Local>,
        now: DateTime<Local>,
    ) -> Result<&Task> {
        let id = self.next_id()?;
        debug!(id, %name, "adding task");
        self.tasks.push(Task {
            id,
            name,
            category,
            description,
            status: Status::ToDo,
            deadline,
            created_at: now,
            completed_at: None,
        });
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Applies `updates` to the task with `id`. Returns false when no such task exists.
    pub fn update(&mut self, id: u32, updates: impl IntoIterator<Item = TaskUpdate>) -> bool {
        self.update_at(id, updates, Local::now())
    }

    pub fn update_at(
        &mut self,
        id: u32,
        updates: impl IntoIterator<Item = TaskUpdate>,
        now: DateTime<Local>,
    ) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "update of unknown task");
            return false;
        };
        for update in updates {
            debug!(id, ?update, "updating task");
            update.apply(task, now);
        }
        true
    }

    pub fn find(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&Task>
    where
        P: Fn(&Task) -> bool,
    {
        self.tasks.iter().filter(|t| predicate(t)).collect()
    }

    pub fn get_tasks_by_status(&self, status: Status) -> Vec<&Task> {
        self.filter(|t| t.status == status)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn next_id(&self) -> Result<u32> {
        match self.tasks.iter().map(|t| t.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(TaskError::IdsExhausted(max)),
        }
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id) {
                return Err(TaskError::DuplicateId(task.id));
            }
            if task.is_done() != task.completed_at.is_some() {
                return Err(TaskError::CompletionMismatch {
                    id: task.id,
                    status: task.status,
                    completed: task.completed_at.is_some(),
                });
            }
        }
        Ok(())
    }
}
