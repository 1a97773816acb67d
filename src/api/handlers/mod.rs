//! HTTP request handlers.

pub mod employee_handler;
pub mod report_handler;

pub use employee_handler::employee_routes;
pub use report_handler::report_routes;
