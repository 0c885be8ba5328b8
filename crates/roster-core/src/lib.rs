//! Core types, rules, and trait definitions for the Roster employee service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! [`service::EmployeeService`] owns every business rule; storage backends
//! implement [`store::EmployeeStore`] and the API layer only translates.

pub mod employee;
pub mod error;
pub mod page;
pub mod service;
pub mod store;

pub use error::{Error, FieldViolation, Result};
