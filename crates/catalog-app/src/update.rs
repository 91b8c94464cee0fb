//! Update an existing category.

use catalog_core::{
  category::CategoryId,
  gateway::CategoryGateway,
  validation::{Notification, ValidationHandler},
};
use serde::Serialize;

/// Input to [`update_category`]. Name, description and active flag are all
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCategoryCommand {
  pub id:          CategoryId,
  pub name:        Option<String>,
  pub description: Option<String>,
  pub is_active:   bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCategoryOutput {
  pub id: CategoryId,
}

/// Load, mutate, validate and store a category.
///
/// An unknown id is reported in the notification as
/// "Category with ID <id> was not found".
pub fn update_category<G: CategoryGateway>(
  gateway: &G,
  command: UpdateCategoryCommand,
) -> Result<UpdateCategoryOutput, Notification> {
  let mut category = gateway
    .find_by_id(command.id)
    .map_err(Notification::from_failure)?
    .ok_or_else(|| {
      Notification::from_failure(catalog_core::Error::CategoryNotFound(
        command.id,
      ))
    })?;

  category.update(command.name, command.description, command.is_active);

  let mut notification = Notification::create();
  category.validate(&mut notification)?;
  if notification.has_error() {
    tracing::warn!(
      category_id = %command.id,
      errors = %notification,
      "rejected category update"
    );
    return Err(notification);
  }

  let updated = gateway
    .update(category)
    .map_err(Notification::from_failure)?;

  tracing::debug!(
    category_id = %updated.id(),
    active = updated.is_active(),
    "updated category"
  );
  Ok(UpdateCategoryOutput { id: updated.id() })
}
