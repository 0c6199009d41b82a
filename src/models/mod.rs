pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskPatch, TaskPriority};
pub use user::User;
