pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod task;
pub mod task_list;
pub mod utils;

pub use config::Config;
pub use error::{Result, TaskError};
pub use task::{Status, Task, TaskUpdate};
pub use task_list::TaskList;
