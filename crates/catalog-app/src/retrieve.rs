//! Read-side use cases: fetch one category, list a page of them.

use catalog_core::{
  category::{Category, CategoryId},
  gateway::{CategoryGateway, CategorySearchQuery, Pagination},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Error, Result};

/// Full snapshot of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOutput {
  pub id:          CategoryId,
  pub name:        Option<String>,
  pub description: Option<String>,
  pub is_active:   bool,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
  pub deleted_at:  Option<DateTime<Utc>>,
}

impl From<&Category> for CategoryOutput {
  fn from(category: &Category) -> Self {
    Self {
      id:          category.id(),
      name:        category.name().map(str::to_string),
      description: category.description().map(str::to_string),
      is_active:   category.is_active(),
      created_at:  category.created_at(),
      updated_at:  category.updated_at(),
      deleted_at:  category.deleted_at(),
    }
  }
}

/// One row of a category listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListOutput {
  pub id:          CategoryId,
  pub name:        Option<String>,
  pub description: Option<String>,
  pub is_active:   bool,
  pub created_at:  DateTime<Utc>,
  pub deleted_at:  Option<DateTime<Utc>>,
}

impl From<Category> for CategoryListOutput {
  fn from(category: Category) -> Self {
    Self {
      id:          category.id(),
      name:        category.name().map(str::to_string),
      description: category.description().map(str::to_string),
      is_active:   category.is_active(),
      created_at:  category.created_at(),
      deleted_at:  category.deleted_at(),
    }
  }
}

/// Fetch a category by id.
pub fn get_category<G: CategoryGateway>(
  gateway: &G,
  id: CategoryId,
) -> Result<CategoryOutput> {
  let category = gateway
    .find_by_id(id)
    .map_err(Error::gateway)?
    .ok_or(catalog_core::Error::CategoryNotFound(id))?;

  Ok(CategoryOutput::from(&category))
}

/// List the page of categories selected by `query`.
pub fn list_categories<G: CategoryGateway>(
  gateway: &G,
  query: &CategorySearchQuery,
) -> Result<Pagination<CategoryListOutput>> {
  let page = gateway.find_all(query).map_err(Error::gateway)?;
  tracing::debug!(
    total = page.total,
    returned = page.items.len(),
    terms = %query.terms,
    "listed categories"
  );
  Ok(page.map(CategoryListOutput::from))
}
