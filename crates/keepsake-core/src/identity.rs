//! Principals, roles, and display profiles.
//!
//! A principal is an opaque, externally-issued caller identifier. The
//! identity provider that authenticates callers and mints these identifiers
//! is an external collaborator; this crate only trusts and compares them.

use serde::{Deserialize, Serialize};

/// An opaque, stable, externally-authenticated caller identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for Principal {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// The role a principal holds. Any principal without an explicit
/// assignment is a [`UserRole::Guest`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  Admin,
  User,
  #[default]
  Guest,
}

impl UserRole {
  pub fn is_admin(self) -> bool { matches!(self, Self::Admin) }
}

/// A caller's display profile. Absent until the owner saves one; the
/// absence is a first-class signal clients use to trigger profile setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  pub name: String,
}
