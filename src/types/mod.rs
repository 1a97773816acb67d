//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{Cursor, EmployeePage, ListParams, ListQuery};
pub use response::MessageResponse;
