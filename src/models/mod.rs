pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, NewTask, Task, UpdateTaskRequest};
pub use user::{NewUser, UpdateUserRequest, User, UserResponse};
