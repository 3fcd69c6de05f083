//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod projects;
pub mod sections;
pub mod test_cases;
pub mod test_runs;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use projects::configure_routes as configure_project_routes;
pub use sections::configure_routes as configure_section_routes;
pub use test_cases::configure_routes as configure_testcase_routes;
pub use test_runs::configure_routes as configure_testrun_routes;
