//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{employee_handler, report_handler};
use crate::domain::{Employee, EmployeeInput, RoleCount};
use crate::types::{EmployeePage, MessageResponse};

/// OpenAPI documentation for the Employee API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee API",
        version = "0.1.0",
        description = "Employee records CRUD with search and cursor pagination",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        employee_handler::list_employees,
        employee_handler::create_employee,
        employee_handler::get_employee,
        employee_handler::replace_employee,
        employee_handler::delete_employee,
        report_handler::role_summary,
    ),
    components(
        schemas(
            Employee,
            EmployeeInput,
            EmployeePage,
            MessageResponse,
            RoleCount,
            employee_handler::ReplaceEmployeeRequest,
        )
    ),
    tags(
        (name = "Employees", description = "Employee record management"),
        (name = "Reports", description = "Read-only reporting views")
    )
)]
pub struct ApiDoc;
