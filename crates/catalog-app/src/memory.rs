//! In-memory [`CategoryGateway`] backed by a `BTreeMap`.
//!
//! Used by the tests and by one-shot CLI runs. Nothing outlives the value.

use std::{
  cell::RefCell,
  cmp::Ordering,
  collections::{BTreeMap, btree_map::Entry},
};

use catalog_core::{
  category::{Category, CategoryId},
  gateway::{
    CategoryGateway, CategorySearchQuery, CategorySort, Pagination,
    SortDirection,
  },
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("category {0} already exists")]
  Duplicate(CategoryId),

  #[error("category {0} does not exist")]
  Missing(CategoryId),
}

#[derive(Debug, Default)]
pub struct InMemoryCategoryGateway {
  categories: RefCell<BTreeMap<CategoryId, Category>>,
}

impl InMemoryCategoryGateway {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize { self.categories.borrow().len() }

  pub fn is_empty(&self) -> bool { self.categories.borrow().is_empty() }
}

impl CategoryGateway for InMemoryCategoryGateway {
  type Error = MemoryError;

  fn create(&self, category: Category) -> Result<Category, Self::Error> {
    match self.categories.borrow_mut().entry(category.id()) {
      Entry::Occupied(slot) => Err(MemoryError::Duplicate(*slot.key())),
      Entry::Vacant(slot) => Ok(slot.insert(category).clone()),
    }
  }

  fn update(&self, category: Category) -> Result<Category, Self::Error> {
    let mut categories = self.categories.borrow_mut();
    let Some(stored) = categories.get_mut(&category.id()) else {
      return Err(MemoryError::Missing(category.id()));
    };
    *stored = category;
    Ok(stored.clone())
  }

  fn find_by_id(
    &self,
    id: CategoryId,
  ) -> Result<Option<Category>, Self::Error> {
    Ok(self.categories.borrow().get(&id).cloned())
  }

  fn find_all(
    &self,
    query: &CategorySearchQuery,
  ) -> Result<Pagination<Category>, Self::Error> {
    let terms = query.terms.trim().to_lowercase();
    let categories = self.categories.borrow();

    let mut matches: Vec<&Category> = categories
      .values()
      .filter(|c| {
        terms.is_empty()
          || contains_terms(c.name(), &terms)
          || contains_terms(c.description(), &terms)
      })
      .collect();

    matches.sort_by(|a, b| {
      let ordering = compare(query.sort, a, b);
      match query.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
      }
    });

    let total = matches.len() as u64;
    let per_page = query.per_page as usize;
    let skip = (query.page as usize).saturating_mul(per_page);
    let items = matches
      .into_iter()
      .skip(skip)
      .take(per_page)
      .cloned()
      .collect();

    Ok(Pagination {
      current_page: query.page,
      per_page: query.per_page,
      total,
      items,
    })
  }
}

fn contains_terms(field: Option<&str>, terms: &str) -> bool {
  field.is_some_and(|value| value.to_lowercase().contains(terms))
}

/// Order by the requested field, then by id so pages are stable.
fn compare(sort: CategorySort, a: &Category, b: &Category) -> Ordering {
  let by_field = match sort {
    CategorySort::Name => lowercase(a.name()).cmp(&lowercase(b.name())),
    CategorySort::Description => {
      lowercase(a.description()).cmp(&lowercase(b.description()))
    }
    CategorySort::CreatedAt => a.created_at().cmp(&b.created_at()),
  };
  by_field.then_with(|| a.id().cmp(&b.id()))
}

fn lowercase(value: Option<&str>) -> Option<String> {
  value.map(str::to_lowercase)
}
