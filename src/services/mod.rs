//!
//! # Service Layer
//!
//! Business rules live here, between the HTTP handlers and the
//! repositories. `UserService` owns the credential checks and session
//! issuance; `TaskService` owns the per-task ownership gate that every
//! task operation funnels through.

pub mod task;
pub mod user;

pub use task::TaskService;
pub use user::UserService;
