//! Use cases for the category catalog.
//!
//! Each use case is a free function generic over a [`CategoryGateway`].
//! Commands that change state report every failure (validation or gateway)
//! as a [`Notification`]; reads return [`Error`].
//!
//! [`CategoryGateway`]: catalog_core::gateway::CategoryGateway
//! [`Notification`]: catalog_core::validation::Notification

pub mod create;
pub mod error;
pub mod memory;
pub mod retrieve;
pub mod update;

pub use error::{Error, Result};
