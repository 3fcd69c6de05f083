//! Service layer modules.

pub mod import;

pub use import::{ImportStats, import_csv};
