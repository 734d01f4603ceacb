#![doc = "The `tasklane` library crate."]
#![doc = ""]
#![doc = "Everything except process wiring lives here: domain models, password and"]
#![doc = "token handling, persistence, the service layer that enforces ownership,"]
#![doc = "routing configuration, and error handling. The binary (`main.rs`) only"]
#![doc = "reads configuration, connects the collaborators, and runs the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
