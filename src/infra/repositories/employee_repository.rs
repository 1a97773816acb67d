//! Employee repository - read side and single-statement writes.
//!
//! Multi-step writes (create, replace) live on the transaction-aware
//! repository in the unit of work module so the uniqueness check and the
//! write stay atomic with respect to concurrent writers.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::entities::employee::{Column, Entity as EmployeeEntity};
use crate::config::PAGE_SIZE;
use crate::domain::{Employee, RoleCount};
use crate::errors::{AppError, AppResult};
use crate::types::{Cursor, EmployeePage, ListQuery};

/// Read and delete operations over the employees table
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find employee by primary key
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>>;

    /// One page of employees, newest first, with neighbour cursors
    async fn list(&self, query: &ListQuery) -> AppResult<EmployeePage>;

    /// Remove the row; not-found when nothing was deleted
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Employees per role, for the reporting view
    async fn role_counts(&self) -> AppResult<Vec<RoleCount>>;
}

/// SeaORM-backed repository implementation
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        let model = EmployeeEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Employee::from))
    }

    async fn list(&self, query: &ListQuery) -> AppResult<EmployeePage> {
        let page_size = PAGE_SIZE as usize;
        let reverse = query.cursor.map(|c| c.reverse).unwrap_or(false);

        let mut select = EmployeeEntity::find();

        if let Some(term) = &query.search {
            select = select.filter(search_condition(term));
        }
        if let Some(cursor) = query.cursor {
            select = select.filter(boundary_condition(&cursor));
        }

        // Rows come back nearest-to-boundary first; one extra row tells
        // us whether another page exists beyond this one.
        select = if reverse {
            select
                .order_by_asc(Column::CreatedAt)
                .order_by_asc(Column::Id)
        } else {
            select
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::Id)
        };

        let mut rows: Vec<Employee> = select
            .limit(PAGE_SIZE + 1)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Employee::from)
            .collect();

        let has_more = rows.len() > page_size;
        rows.truncate(page_size);
        if reverse {
            rows.reverse();
        }

        let (next, previous) = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => {
                if reverse {
                    // Paging back: the page we came from is always ahead
                    (
                        Some(Cursor::after(last).encode()),
                        has_more.then(|| Cursor::before(first).encode()),
                    )
                } else {
                    (
                        has_more.then(|| Cursor::after(last).encode()),
                        query.cursor.map(|_| Cursor::before(first).encode()),
                    )
                }
            }
            _ => (None, None),
        };

        Ok(EmployeePage {
            results: rows,
            next,
            previous,
        })
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = EmployeeEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn role_counts(&self) -> AppResult<Vec<RoleCount>> {
        let rows: Vec<(String, i64)> = EmployeeEntity::find()
            .select_only()
            .column(Column::Role)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::Role)
            .order_by_asc(Column::Role)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(role, count)| RoleCount { role, count })
            .collect())
    }
}

/// Case-insensitive substring match on first_name OR last_name OR email
fn search_condition(term: &str) -> Condition {
    let pattern = like_pattern(term);
    Condition::any()
        .add(lowered(Column::FirstName).like(LikeExpr::new(pattern.as_str()).escape('\\')))
        .add(lowered(Column::LastName).like(LikeExpr::new(pattern.as_str()).escape('\\')))
        .add(lowered(Column::Email).like(LikeExpr::new(pattern.as_str()).escape('\\')))
}

fn lowered(column: Column) -> Expr {
    Expr::expr(Func::lower(Expr::col(column)))
}

/// Escape LIKE wildcards so the search term matches literally
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped.to_lowercase())
}

/// Keyset predicate for the page boundary.
///
/// Strict comparison on (created_at, id) so rows inserted elsewhere can
/// never shift, skip, or duplicate rows across a cursor chain.
fn boundary_condition(cursor: &Cursor) -> Condition {
    if cursor.reverse {
        Condition::any()
            .add(Column::CreatedAt.gt(cursor.created_at))
            .add(
                Column::CreatedAt
                    .eq(cursor.created_at)
                    .and(Column::Id.gt(cursor.id)),
            )
    } else {
        Condition::any()
            .add(Column::CreatedAt.lt(cursor.created_at))
            .add(
                Column::CreatedAt
                    .eq(cursor.created_at)
                    .and(Column::Id.lt(cursor.id)),
            )
    }
}
