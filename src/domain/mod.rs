//! Domain layer - Core business entities and logic
//!
//! Contains the employee entity and the validated input value,
//! independent of infrastructure concerns.

pub mod employee;

pub use employee::{Employee, EmployeeInput, RoleCount};

/// Input types that rewrite raw field values before validation runs
pub trait Normalize {
    fn normalize(&mut self);
}
