//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, Persistence};
use crate::services::{EmployeeDirectory, EmployeeService};

/// Application state containing all services (DI container)
#[derive(Clone)]
pub struct AppState {
    /// Employee service
    pub employee_service: Arc<dyn EmployeeService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database.
    ///
    /// Wires the Unit of Work and the employee service over it.
    pub fn from_database(database: Arc<Database>) -> Self {
        let uow = Arc::new(Persistence::new(database.get_connection()));
        let employee_service = Arc::new(EmployeeDirectory::new(uow));

        Self {
            employee_service,
            database,
        }
    }
}
