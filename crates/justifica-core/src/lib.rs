//! Core types and trait definitions for the Justifica attendance records.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod group;
pub mod justification;
pub mod store;
pub mod student;
pub mod teacher;
pub mod ticket;

pub use error::{Error, Result};
