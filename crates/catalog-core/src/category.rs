//! Category — the catalog entity and its validation rules.
//!
//! A category is never removed. Inactivating it records a soft-delete instant
//! in `deleted_at`; activating it clears that instant again.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error,
  clock,
  validation::{self, ValidationError, ValidationHandler, Validator},
};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque, globally unique category identifier.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
  /// A fresh random identifier.
  pub fn unique() -> Self { Self(Uuid::new_v4()) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl From<Uuid> for CategoryId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl FromStr for CategoryId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim()).map(Self).map_err(|source| {
      Error::InvalidCategoryId {
        input: s.to_string(),
        source,
      }
    })
  }
}

impl fmt::Display for CategoryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A catalog category.
///
/// `deleted_at` is `Some` exactly when the category is inactive.
/// `created_at` never changes; every mutation moves `updated_at` strictly
/// forward.
///
/// Construction performs no validation. Call [`Category::validate`] with the
/// handler of your choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
  id:          CategoryId,
  name:        Option<String>,
  description: Option<String>,
  #[serde(rename = "is_active")]
  active:      bool,
  created_at:  DateTime<Utc>,
  updated_at:  DateTime<Utc>,
  deleted_at:  Option<DateTime<Utc>>,
}

impl Category {
  /// Create a category with a fresh identity, stamped with the current time.
  pub fn new(
    name: Option<String>,
    description: Option<String>,
    is_active: bool,
  ) -> Self {
    Self::new_at(name, description, is_active, clock::now())
  }

  /// Like [`Category::new`], stamped with `now` instead of the clock.
  pub fn new_at(
    name: Option<String>,
    description: Option<String>,
    is_active: bool,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      id: CategoryId::unique(),
      name,
      description,
      active: is_active,
      created_at: now,
      updated_at: now,
      deleted_at: (!is_active).then_some(now),
    }
  }

  /// Rebuild a category from persisted parts. Nothing is assigned or
  /// re-stamped.
  pub fn with(
    id: CategoryId,
    name: Option<String>,
    description: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
  ) -> Self {
    Self {
      id,
      name,
      description,
      active,
      created_at,
      updated_at,
      deleted_at,
    }
  }

  pub fn id(&self) -> CategoryId { self.id }

  pub fn name(&self) -> Option<&str> { self.name.as_deref() }

  pub fn description(&self) -> Option<&str> { self.description.as_deref() }

  pub fn is_active(&self) -> bool { self.active }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

  pub fn deleted_at(&self) -> Option<DateTime<Utc>> { self.deleted_at }

  // ── Lifecycle ─────────────────────────────────────────────────────────

  pub fn activate(&mut self) -> &mut Self { self.activate_at(clock::now()) }

  /// Mark the category active and clear its soft-delete instant.
  pub fn activate_at(&mut self, now: DateTime<Utc>) -> &mut Self {
    self.touch(now);
    self.active = true;
    self.deleted_at = None;
    self
  }

  pub fn inactivate(&mut self) -> &mut Self {
    self.inactivate_at(clock::now())
  }

  /// Mark the category inactive, soft-deleted at the new `updated_at`.
  pub fn inactivate_at(&mut self, now: DateTime<Utc>) -> &mut Self {
    let at = self.touch(now);
    self.active = false;
    self.deleted_at = Some(at);
    self
  }

  pub fn update(
    &mut self,
    name: Option<String>,
    description: Option<String>,
    is_active: bool,
  ) -> &mut Self {
    self.update_at(name, description, is_active, clock::now())
  }

  /// Replace name and description and move to the requested active state.
  pub fn update_at(
    &mut self,
    name: Option<String>,
    description: Option<String>,
    is_active: bool,
    now: DateTime<Utc>,
  ) -> &mut Self {
    self.name = name;
    self.description = description;
    if is_active {
      self.activate_at(now)
    } else {
      self.inactivate_at(now)
    }
  }

  /// Run [`CategoryValidator`] against `handler`. Never mutates the entity.
  pub fn validate<H>(&self, handler: &mut H) -> Result<(), ValidationError>
  where
    H: ValidationHandler + ?Sized,
  {
    CategoryValidator::new(self).validate(handler)
  }

  /// Refresh `updated_at`, returning the new value.
  fn touch(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
    self.updated_at = clock::advance_past(self.updated_at, now);
    self.updated_at
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Name rules for a [`Category`]. Description and active flag are
/// unconstrained.
///
/// Only one name error is ever reported per pass: the checks stop at the
/// first failure.
#[derive(Debug, Clone, Copy)]
pub struct CategoryValidator<'a> {
  category: &'a Category,
}

impl<'a> CategoryValidator<'a> {
  pub const MAX_NAME_LENGTH: usize = 255;
  pub const MIN_NAME_LENGTH: usize = 3;

  pub fn new(category: &'a Category) -> Self { Self { category } }

  fn check_name_constraints<H>(
    &self,
    handler: &mut H,
  ) -> Result<(), ValidationError>
  where
    H: ValidationHandler + ?Sized,
  {
    let Some(name) = self.category.name() else {
      return handler
        .append(validation::Error::new("'name' should not be null"));
    };

    if name.chars().all(is_blank_char) {
      return handler
        .append(validation::Error::new("'name' should not be empty"));
    }

    let length = name.trim_matches(is_trimmed_char).chars().count();
    if !(Self::MIN_NAME_LENGTH..=Self::MAX_NAME_LENGTH).contains(&length) {
      return handler.append(validation::Error::new(format!(
        "'name' must be between {} and {} characters",
        Self::MIN_NAME_LENGTH,
        Self::MAX_NAME_LENGTH,
      )));
    }

    Ok(())
  }
}

/// Whitespace for the blank check. Non-breaking spaces (U+00A0, U+2007,
/// U+202F) and NEL (U+0085) are not blank; the ASCII separators
/// U+001C..=U+001F are.
fn is_blank_char(c: char) -> bool {
  match c {
    '\u{0085}' | '\u{00A0}' | '\u{2007}' | '\u{202F}' => false,
    '\u{001C}'..='\u{001F}' => true,
    _ => c.is_whitespace(),
  }
}

/// Characters stripped from both ends before measuring length: ASCII space
/// and every control character below it.
fn is_trimmed_char(c: char) -> bool { c <= ' ' }

impl Validator for CategoryValidator<'_> {
  fn validate<H>(&self, handler: &mut H) -> Result<(), ValidationError>
  where
    H: ValidationHandler + ?Sized,
  {
    self.check_name_constraints(handler)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeDelta;

  use super::*;
  use crate::validation::{Notification, ThrowsValidationHandler};

  fn category(name: Option<&str>, is_active: bool) -> Category {
    Category::new(
      name.map(str::to_string),
      Some("description".into()),
      is_active,
    )
  }

  /// Both handlers must see exactly one error: the throwing one stops on
  /// it, the collecting one relies on the validator stopping.
  fn assert_single_error(name: Option<&str>, expected: &str) {
    let c = category(name, true);

    let err = c.validate(&mut ThrowsValidationHandler::new()).unwrap_err();
    assert_eq!(err.errors().len(), 1);
    assert_eq!(err.errors()[0].message(), expected);

    let mut notification = Notification::create();
    c.validate(&mut notification).unwrap();
    assert_eq!(notification.errors().len(), 1, "{name:?}: {notification}");
    assert_eq!(notification.errors()[0].message(), expected);
  }

  const LENGTH_MESSAGE: &str = "'name' must be between 3 and 255 characters";

  // ─── Construction ─────────────────────────────────────────────────────────

  #[test]
  fn new_active_category() {
    let c = category(Some("name"), true);

    assert_eq!(c.name(), Some("name"));
    assert_eq!(c.description(), Some("description"));
    assert!(c.is_active());
    assert_eq!(c.created_at(), c.updated_at());
    assert!(c.deleted_at().is_none());
  }

  #[test]
  fn new_inactive_category_is_soft_deleted() {
    let c = category(Some("name"), false);

    assert!(!c.is_active());
    assert_eq!(c.deleted_at(), Some(c.created_at()));
    assert!(c.validate(&mut ThrowsValidationHandler::new()).is_ok());
  }

  #[test]
  fn new_categories_get_distinct_ids() {
    assert_ne!(category(Some("a"), true).id(), category(Some("a"), true).id());
  }

  #[test]
  fn construction_does_not_validate() {
    let c = category(None, true);
    assert!(c.name().is_none());
  }

  // ─── Validation ───────────────────────────────────────────────────────────

  #[test]
  fn null_name_is_rejected() {
    assert_single_error(None, "'name' should not be null");
  }

  #[test]
  fn blank_name_is_rejected() {
    assert_single_error(Some("  "), "'name' should not be empty");
    assert_single_error(Some(""), "'name' should not be empty");
  }

  #[test]
  fn short_name_is_rejected_after_trimming() {
    assert_single_error(Some("te "), LENGTH_MESSAGE);
  }

  #[test]
  fn long_name_is_rejected() {
    let name = "x".repeat(256);
    assert_single_error(Some(name.as_str()), LENGTH_MESSAGE);
  }

  #[test]
  fn name_length_bounds_are_inclusive() {
    let longest = "x".repeat(255);
    for name in ["abc", " abc ", longest.as_str()] {
      let c = category(Some(name), true);
      assert!(
        c.validate(&mut ThrowsValidationHandler::new()).is_ok(),
        "{name:?} should be valid"
      );
    }
  }

  #[test]
  fn non_breaking_spaces_are_not_blank() {
    let c = category(Some("\u{A0}\u{A0}\u{A0}"), true);
    assert!(c.validate(&mut ThrowsValidationHandler::new()).is_ok());

    assert_single_error(Some("\u{A0}a"), LENGTH_MESSAGE);
  }

  #[test]
  fn control_characters_are_trimmed() {
    assert_single_error(Some("\u{1F}\t\n"), "'name' should not be empty");
    assert_single_error(Some("\tab\r\n"), LENGTH_MESSAGE);
  }

  #[test]
  fn name_length_counts_characters_not_bytes() {
    let c = category(Some("été"), true);
    assert!(c.validate(&mut ThrowsValidationHandler::new()).is_ok());
  }

  #[test]
  fn description_and_active_flag_are_unconstrained() {
    for (description, active) in [(None, true), (Some("  "), false)] {
      let c = Category::new(
        Some("name".into()),
        description.map(str::to_string),
        active,
      );
      let mut notification = Notification::create();
      c.validate(&mut notification).unwrap();
      assert!(!notification.has_error());
    }
  }

  #[test]
  fn notification_collects_single_name_error() {
    let c = category(Some("  "), true);
    let mut notification = Notification::create();

    c.validate(&mut notification).unwrap();

    assert_eq!(notification.errors().len(), 1);
    assert_eq!(
      notification.first_error().unwrap().message(),
      "'name' should not be empty"
    );
  }

  #[test]
  fn validate_does_not_mutate() {
    let c = category(Some("x"), true);
    let before = c.clone();
    let _ = c.validate(&mut Notification::create());
    assert_eq!(c, before);
  }

  // ─── Lifecycle ────────────────────────────────────────────────────────────

  #[test]
  fn inactivate_active_category() {
    let mut c = category(Some("name"), true);
    let before = c.clone();

    c.inactivate();

    assert_eq!(c.id(), before.id());
    assert_eq!(c.created_at(), before.created_at());
    assert!(!c.is_active());
    assert!(c.deleted_at().is_some());
    assert!(c.updated_at() > before.updated_at());
    assert!(c.validate(&mut ThrowsValidationHandler::new()).is_ok());
  }

  #[test]
  fn activate_inactive_category() {
    let mut c = category(Some("name"), false);
    let before = c.clone();

    c.activate();

    assert_eq!(c.id(), before.id());
    assert_eq!(c.created_at(), before.created_at());
    assert!(c.is_active());
    assert!(c.deleted_at().is_none());
    assert!(c.updated_at() > before.updated_at());
  }

  #[test]
  fn activate_twice_only_advances_updated_at() {
    let mut c = category(Some("name"), true);
    c.activate();
    let first = c.updated_at();
    c.activate();

    assert!(c.is_active());
    assert!(c.deleted_at().is_none());
    assert!(c.updated_at() > first);
  }

  #[test]
  fn inactivate_again_restamps_deleted_at() {
    let start = clock::now();
    let mut c = Category::new_at(Some("name".into()), None, false, start);

    c.inactivate_at(start + TimeDelta::seconds(60));
    assert_eq!(c.deleted_at(), Some(start + TimeDelta::seconds(60)));
    assert_eq!(c.deleted_at(), Some(c.updated_at()));

    c.update_at(
      Some("name".into()),
      None,
      false,
      start + TimeDelta::seconds(120),
    );
    assert!(!c.is_active());
    assert_eq!(c.deleted_at(), Some(start + TimeDelta::seconds(120)));
    assert_eq!(c.deleted_at(), Some(c.updated_at()));
  }

  #[test]
  fn update_replaces_fields_and_activates() {
    let mut c = category(Some("name"), false);
    let before = c.clone();

    c.update(Some("new name".into()), Some("new description".into()), true);

    assert_eq!(c.id(), before.id());
    assert_eq!(c.created_at(), before.created_at());
    assert_eq!(c.name(), Some("new name"));
    assert_eq!(c.description(), Some("new description"));
    assert!(c.is_active());
    assert!(c.deleted_at().is_none());
    assert!(c.updated_at() > before.updated_at());
  }

  #[test]
  fn update_to_inactive_sets_deleted_at() {
    let mut c = category(Some("name"), true);
    c.update(Some("name".into()), None, false);

    assert!(!c.is_active());
    assert_eq!(c.deleted_at(), Some(c.updated_at()));
  }

  #[test]
  fn update_accepts_invalid_values_until_validated() {
    let mut c = category(Some("name"), true);
    c.update(None, None, true);

    let err = c.validate(&mut ThrowsValidationHandler::new()).unwrap_err();
    assert_eq!(err.errors()[0].message(), "'name' should not be null");
  }

  #[test]
  fn updated_at_advances_even_when_clock_stalls() {
    let start = clock::now();
    let mut c = Category::new_at(Some("name".into()), None, true, start);

    c.inactivate_at(start);
    assert!(c.updated_at() > start);

    let frozen = c.updated_at();
    c.activate_at(start - TimeDelta::seconds(10));
    assert!(c.updated_at() > frozen);
    assert_eq!(c.created_at(), start);
  }

  #[test]
  fn mutations_chain() {
    let mut c = category(Some("name"), true);
    let before = c.updated_at();
    c.inactivate().activate();
    assert!(c.is_active());
    assert!(c.updated_at() > before);
  }

  // ─── Identity & serialisation ─────────────────────────────────────────────

  #[test]
  fn category_id_parses_and_displays() {
    let id = CategoryId::unique();
    let parsed: CategoryId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
  }

  #[test]
  fn category_id_rejects_garbage() {
    let err = "not-a-uuid".parse::<CategoryId>().unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidCategoryId { ref input, .. } if input == "not-a-uuid"
    ));
  }

  #[test]
  fn rehydrated_category_keeps_parts() {
    let original = category(Some("name"), false);
    let copy = Category::with(
      original.id(),
      original.name().map(str::to_string),
      original.description().map(str::to_string),
      original.is_active(),
      original.created_at(),
      original.updated_at(),
      original.deleted_at(),
    );
    assert_eq!(copy, original);
  }

  #[test]
  fn serializes_with_snake_case_fields() {
    let c = category(Some("name"), true);
    let json = serde_json::to_value(&c).unwrap();

    assert_eq!(json["id"], serde_json::json!(c.id().to_string()));
    assert_eq!(json["name"], "name");
    assert_eq!(json["is_active"], true);
    assert!(json["deleted_at"].is_null());
    assert!(json["created_at"].is_string());
  }
}
