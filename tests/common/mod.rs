//! Common test infrastructure
//!
//! This module provides everything the end-to-end tests need to run the
//! schema catalog against a real database file.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{full_catalog, run_catalog, TestDb};
//!
//! #[test]
//! fn test_fresh_database() {
//!     let db = TestDb::new();
//!     let report = run_catalog(&full_catalog(), &db.conn);
//!     assert_eq!(report.failed(), 0);
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{
    avatar_assets, full_catalog, run_catalog, run_catalog_with, schema_shape, test_settings,
    TestDb,
};
