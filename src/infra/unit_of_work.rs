//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and transaction lifecycle (begin,
//! commit, rollback). Create and replace run through a transaction so
//! the email uniqueness check and the write are atomic with respect to
//! concurrent writers: of two racing creates with the same email,
//! exactly one commits and the other surfaces a conflict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, Set, SqlErr, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::employee::{ActiveModel, Entity as EmployeeEntity};
use super::repositories::{EmployeeRepository, EmployeeStore};
use crate::domain::{Employee, EmployeeInput};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: the transaction method is generic, so this trait is not
/// mockable directly. For testing, mock at the repository or service
/// level, or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get employee repository
    fn employees(&self) -> Arc<dyn EmployeeRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled
    /// back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get employee repository for this transaction
    pub fn employees(&self) -> TxEmployeeRepository<'_> {
        TxEmployeeRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    employee_repo: Arc<EmployeeStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let employee_repo = Arc::new(EmployeeStore::new(db.clone()));
        Self { db, employee_repo }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employee_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware employee repository.
///
/// Holds the write path: uniqueness is enforced by the storage
/// constraint, never a pre-check, so there is no race window.
pub struct TxEmployeeRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxEmployeeRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a new employee; id and created_at are assigned here.
    pub async fn create(&self, input: EmployeeInput) -> AppResult<Employee> {
        let active = ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            mobile: Set(input.mobile),
            role: Set(input.role),
            created_at: Set(creation_timestamp()),
            ..Default::default()
        };

        let model = active
            .insert(self.txn)
            .await
            .map_err(map_unique_violation)?;

        Ok(Employee::from(model))
    }

    /// Overwrite every mutable field of an existing row.
    ///
    /// created_at is never touched.
    pub async fn replace(&self, id: i32, input: EmployeeInput) -> AppResult<Employee> {
        let existing = EmployeeEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.email = Set(input.email);
        active.mobile = Set(input.mobile);
        active.role = Set(input.role);

        let model = active
            .update(self.txn)
            .await
            .map_err(map_unique_violation)?;

        Ok(Employee::from(model))
    }
}

/// Now, truncated to microseconds so cursor tokens round-trip exactly
/// through storage on every backend.
fn creation_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

/// Translate a unique-constraint rejection into a 409 conflict
fn map_unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::conflict("Employee with this email")
        }
        _ => AppError::from(err),
    }
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
