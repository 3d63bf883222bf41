//! The `taskmgr` library crate.
//!
//! Contains the domain models, authentication machinery, persistence traits
//! with their Postgres implementation, task lifecycle logic, routing
//! configuration, and error handling for the task manager API. The binary
//! (`main.rs`) wires these pieces together and runs the server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;
