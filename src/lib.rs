//! QA Manager server library.
//!
//! Manages projects, hierarchical test sections, test cases and test runs
//! behind an Actix-web HTTP API backed by PostgreSQL.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod hierarchy;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
