//! Error type for `catalog-app`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] catalog_core::Error),

  #[error("gateway error: {0}")]
  Gateway(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn gateway<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Gateway(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
