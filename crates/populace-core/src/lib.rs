//! Core contracts for Populace.
//!
//! This crate defines the value model shared by the generation engine and the
//! typed field-assignment tables that bind generated values onto caller-owned
//! target types.

pub mod catalog;
pub mod error;
pub mod value;

pub use catalog::FieldTable;
pub use error::{Error, Result};
pub use value::{FieldKind, Scalar, Value};
