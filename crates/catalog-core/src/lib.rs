//! Core types for the category catalog.
//!
//! This crate holds the `Category` entity, its validation rules and the
//! gateway trait persistence backends implement. It performs no I/O.

pub mod category;
pub mod clock;
pub mod error;
pub mod gateway;
pub mod validation;

pub use error::{Error, Result};
