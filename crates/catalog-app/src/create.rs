//! Create a category.

use catalog_core::{
  category::{Category, CategoryId},
  gateway::CategoryGateway,
  validation::{Notification, ValidationHandler},
};
use serde::{Deserialize, Serialize};

/// Input to [`create_category`]. Also the shape of one record in an import
/// file, where a missing `is_active` means active.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCategoryCommand {
  pub name:        Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default = "active_by_default")]
  pub is_active:   bool,
}

fn active_by_default() -> bool { true }

impl CreateCategoryCommand {
  pub fn new(
    name: impl Into<String>,
    description: impl Into<String>,
    is_active: bool,
  ) -> Self {
    Self {
      name: Some(name.into()),
      description: Some(description.into()),
      is_active,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCategoryOutput {
  pub id: CategoryId,
}

/// Validate and persist a new category.
///
/// Nothing reaches the gateway unless validation passes. Gateway failures
/// come back as a single-error notification.
pub fn create_category<G: CategoryGateway>(
  gateway: &G,
  command: CreateCategoryCommand,
) -> Result<CreateCategoryOutput, Notification> {
  let category =
    Category::new(command.name, command.description, command.is_active);

  let mut notification = Notification::create();
  category.validate(&mut notification)?;
  if notification.has_error() {
    tracing::warn!(errors = %notification, "rejected new category");
    return Err(notification);
  }

  let created = gateway
    .create(category)
    .map_err(Notification::from_failure)?;

  tracing::debug!(category_id = %created.id(), "created category");
  Ok(CreateCategoryOutput { id: created.id() })
}
