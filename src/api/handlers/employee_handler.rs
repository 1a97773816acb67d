//! Employee handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Employee, EmployeeInput, Normalize};
use crate::errors::{AppError, AppResult};
use crate::types::{EmployeePage, ListParams, MessageResponse};

/// Full-replace payload: every mutable field must be present.
///
/// Fields are optional at the serde level so a missing one can be
/// reported by name instead of failing deserialization wholesale.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceEmployeeRequest {
    #[schema(example = "Alice")]
    pub first_name: Option<String>,
    #[schema(example = "Nguyen")]
    pub last_name: Option<String>,
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "+15550100")]
    pub mobile: Option<String>,
    #[schema(example = "engineer")]
    pub role: Option<String>,
}

impl ReplaceEmployeeRequest {
    fn into_input(self) -> AppResult<EmployeeInput> {
        Ok(EmployeeInput {
            first_name: require(self.first_name, "first_name")?,
            last_name: require(self.last_name, "last_name")?,
            email: require(self.email, "email")?,
            mobile: require(self.mobile, "mobile")?,
            role: require(self.role, "role")?,
        })
    }
}

fn require(field: Option<String>, name: &str) -> AppResult<String> {
    field.ok_or_else(|| AppError::bad_request(format!("{} is required for full update", name)))
}

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee)
                .put(replace_employee)
                .delete(delete_employee),
        )
}

/// List employees with optional search and cursor
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on first name, last name or email"),
        ("cursor" = Option<String>, Query, description = "Opaque page cursor from a previous response")
    ),
    responses(
        (status = 200, description = "One page of employees, newest first", body = EmployeePage),
        (status = 400, description = "Malformed cursor")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<EmployeePage>> {
    let query = params.into_query()?;
    let page = state.employee_service.list_employees(query).await?;
    Ok(Json(page))
}

/// Create a new employee
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    request_body = EmployeeInput,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation error with field messages"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<EmployeeInput>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let employee = state.employee_service.create_employee(input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Get employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Employee>> {
    let employee = state.employee_service.get_employee(id).await?;
    Ok(Json(employee))
}

/// Replace every mutable field of an employee (full update)
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    request_body = ReplaceEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Missing field or validation error"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn replace_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ReplaceEmployeeRequest>,
) -> AppResult<Json<Employee>> {
    let mut input = payload.into_input()?;
    input.normalize();
    input.validate()?;

    let employee = state.employee_service.replace_employee(id, input).await?;
    Ok(Json(employee))
}

/// Delete employee by ID
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.employee_service.delete_employee(id).await?;
    Ok(Json(MessageResponse::new("Deleted successfully")))
}
