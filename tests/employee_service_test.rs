//! Employee service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::predicate::eq;

use employee_api::domain::{Employee, RoleCount};
use employee_api::errors::{AppError, AppResult};
use employee_api::infra::{EmployeeRepository, TransactionContext, UnitOfWork};
use employee_api::services::{EmployeeDirectory, EmployeeService};
use employee_api::types::{EmployeePage, ListQuery};

fn sample_employee(id: i32) -> Employee {
    Employee {
        id,
        first_name: "Alice".to_string(),
        last_name: "Nguyen".to_string(),
        email: "alice@example.com".to_string(),
        mobile: "+15550100".to_string(),
        role: "engineer".to_string(),
        created_at: Utc::now(),
    }
}

mockall::mock! {
    pub EmployeeRepo {}

    #[async_trait]
    impl EmployeeRepository for EmployeeRepo {
        async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>>;
        async fn list(&self, query: &ListQuery) -> AppResult<EmployeePage>;
        async fn delete(&self, id: i32) -> AppResult<()>;
        async fn role_counts(&self) -> AppResult<Vec<RoleCount>>;
    }
}

/// Test mock for UnitOfWork that wraps a MockEmployeeRepo
struct TestUnitOfWork {
    employee_repo: Arc<MockEmployeeRepo>,
}

impl TestUnitOfWork {
    fn new(employee_repo: MockEmployeeRepo) -> Self {
        Self {
            employee_repo: Arc::new(employee_repo),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employee_repo.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock; write paths are
        // covered by the sqlite integration tests
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

#[tokio::test]
async fn test_get_employee_success() {
    let mut repo = MockEmployeeRepo::new();
    repo.expect_find_by_id()
        .with(eq(7))
        .returning(|id| Ok(Some(sample_employee(id))));

    let service = EmployeeDirectory::new(Arc::new(TestUnitOfWork::new(repo)));
    let result = service.get_employee(7).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().id, 7);
}

#[tokio::test]
async fn test_get_employee_not_found() {
    let mut repo = MockEmployeeRepo::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = EmployeeDirectory::new(Arc::new(TestUnitOfWork::new(repo)));
    let result = service.get_employee(404).await;

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_list_employees_passes_query_through() {
    let mut repo = MockEmployeeRepo::new();
    repo.expect_list()
        .withf(|query| query.search.as_deref() == Some("alice"))
        .returning(|_| {
            Ok(EmployeePage {
                results: vec![sample_employee(1)],
                next: None,
                previous: None,
            })
        });

    let service = EmployeeDirectory::new(Arc::new(TestUnitOfWork::new(repo)));
    let query = ListQuery {
        search: Some("alice".to_string()),
        cursor: None,
    };
    let page = service.list_employees(query).await.unwrap();

    assert_eq!(page.results.len(), 1);
    assert!(page.next.is_none());
}

#[tokio::test]
async fn test_delete_employee_success() {
    let mut repo = MockEmployeeRepo::new();
    repo.expect_delete().with(eq(3)).returning(|_| Ok(()));

    let service = EmployeeDirectory::new(Arc::new(TestUnitOfWork::new(repo)));
    assert!(service.delete_employee(3).await.is_ok());
}

#[tokio::test]
async fn test_delete_employee_not_found() {
    let mut repo = MockEmployeeRepo::new();
    repo.expect_delete().returning(|_| Err(AppError::NotFound));

    let service = EmployeeDirectory::new(Arc::new(TestUnitOfWork::new(repo)));
    let result = service.delete_employee(3).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_role_summary() {
    let mut repo = MockEmployeeRepo::new();
    repo.expect_role_counts().returning(|| {
        Ok(vec![
            RoleCount {
                role: "engineer".to_string(),
                count: 2,
            },
            RoleCount {
                role: "manager".to_string(),
                count: 1,
            },
        ])
    });

    let service = EmployeeDirectory::new(Arc::new(TestUnitOfWork::new(repo)));
    let counts = service.role_summary().await.unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].role, "engineer");
    assert_eq!(counts[0].count, 2);
}
