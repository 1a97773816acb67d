//! Employee service - orchestrates validation output, repositories and
//! transactions for the employee use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Employee, EmployeeInput, RoleCount};
use crate::errors::AppResult;
use crate::errors::OptionExt;
use crate::infra::UnitOfWork;
use crate::types::{EmployeePage, ListQuery};
use crate::with_transaction;

/// Employee service trait for dependency injection
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// One page of employees, optionally filtered by a search term
    async fn list_employees(&self, query: ListQuery) -> AppResult<EmployeePage>;

    /// Get employee by ID
    async fn get_employee(&self, id: i32) -> AppResult<Employee>;

    /// Persist a validated employee
    async fn create_employee(&self, input: EmployeeInput) -> AppResult<Employee>;

    /// Full-replace an existing employee's mutable fields
    async fn replace_employee(&self, id: i32, input: EmployeeInput) -> AppResult<Employee>;

    /// Delete employee by ID
    async fn delete_employee(&self, id: i32) -> AppResult<()>;

    /// Employees per role, for the reporting view
    async fn role_summary(&self) -> AppResult<Vec<RoleCount>>;
}

/// Concrete implementation of EmployeeService using Unit of Work
pub struct EmployeeDirectory<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EmployeeDirectory<U> {
    /// Create new employee service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> EmployeeService for EmployeeDirectory<U> {
    async fn list_employees(&self, query: ListQuery) -> AppResult<EmployeePage> {
        self.uow.employees().list(&query).await
    }

    async fn get_employee(&self, id: i32) -> AppResult<Employee> {
        self.uow.employees().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_employee(&self, input: EmployeeInput) -> AppResult<Employee> {
        with_transaction!(self.uow, |ctx| ctx.employees().create(input).await)
    }

    async fn replace_employee(&self, id: i32, input: EmployeeInput) -> AppResult<Employee> {
        with_transaction!(self.uow, |ctx| ctx.employees().replace(id, input).await)
    }

    async fn delete_employee(&self, id: i32) -> AppResult<()> {
        self.uow.employees().delete(id).await
    }

    async fn role_summary(&self) -> AppResult<Vec<RoleCount>> {
        self.uow.employees().role_counts().await
    }
}
