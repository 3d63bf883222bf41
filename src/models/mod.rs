pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskInput, TaskStatus, TaskUpdate};
pub use user::{NewUser, User, DEFAULT_ROLE};
