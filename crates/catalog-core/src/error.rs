//! Error types for `catalog-core`.

use thiserror::Error;

use crate::{category::CategoryId, validation::ValidationError};

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("invalid category id {input:?}: {source}")]
  InvalidCategoryId {
    input:  String,
    #[source]
    source: uuid::Error,
  },

  #[error("Category with ID {0} was not found")]
  CategoryNotFound(CategoryId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
