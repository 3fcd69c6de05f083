//! Integration test harness.

mod projects_tests;
mod sections_tests;
mod testcases_tests;
mod testruns_tests;
