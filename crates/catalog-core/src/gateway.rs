//! The `CategoryGateway` trait and supporting query types.
//!
//! The trait is implemented by persistence backends. Use cases depend on this
//! abstraction, not on any concrete backend.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::category::{Category, CategoryId};

// ─── Query types ─────────────────────────────────────────────────────────────

/// The field a category listing is ordered by.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Display,
  EnumString,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum CategorySort {
  #[default]
  Name,
  Description,
  CreatedAt,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Display,
  EnumString,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

/// Parameters for [`CategoryGateway::find_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySearchQuery {
  /// Zero-based page index.
  pub page:      u32,
  pub per_page:  u32,
  /// Case-insensitive filter over name and description. Empty matches all.
  pub terms:     String,
  pub sort:      CategorySort,
  pub direction: SortDirection,
}

impl Default for CategorySearchQuery {
  fn default() -> Self {
    Self {
      page:      0,
      per_page:  10,
      terms:     String::new(),
      sort:      CategorySort::default(),
      direction: SortDirection::default(),
    }
  }
}

/// One page of results plus the size of the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination<T> {
  pub current_page: u32,
  pub per_page:     u32,
  /// Number of matches across all pages.
  pub total:        u64,
  pub items:        Vec<T>,
}

impl<T> Pagination<T> {
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Pagination<U> {
    Pagination {
      current_page: self.current_page,
      per_page:     self.per_page,
      total:        self.total,
      items:        self.items.into_iter().map(f).collect(),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a category persistence backend.
///
/// Gateways store what they are given. Validation happens in the caller
/// before anything reaches a gateway.
pub trait CategoryGateway {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new category. Fails if the id is already taken.
  fn create(&self, category: Category) -> Result<Category, Self::Error>;

  /// Replace a stored category. Fails if the id is unknown.
  fn update(&self, category: Category) -> Result<Category, Self::Error>;

  /// Retrieve a category by id. Returns `None` if not found.
  fn find_by_id(&self, id: CategoryId)
  -> Result<Option<Category>, Self::Error>;

  /// List categories matching `query`.
  fn find_all(
    &self,
    query: &CategorySearchQuery,
  ) -> Result<Pagination<Category>, Self::Error>;
}
