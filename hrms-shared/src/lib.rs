//! # HRMS Shared Library
//!
//! This crate contains the types and data access shared between the HRMS API
//! server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their tenant-scoped query functions
//! - `auth`: Password hashing, JWT tokens, and the request auth context
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the HRMS shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
