//! Employee API - a CRUD service for employee records.
//!
//! Exposes create, read (search + cursor pagination), full-replace
//! update and delete over a single relational entity, built with Axum
//! and SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Employee entity and validated input value
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories, transactions)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types (cursor pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Employee, EmployeeInput};
pub use errors::{AppError, AppResult};
