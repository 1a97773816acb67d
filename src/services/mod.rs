//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases, depending on abstractions (traits) for
//! dependency inversion. Writes go through the Unit of Work so the
//! uniqueness check and the write commit or roll back together.

mod employee_service;

pub use employee_service::{EmployeeDirectory, EmployeeService};
