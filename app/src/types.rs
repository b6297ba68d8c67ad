//! Domain types shared across the catalog and reservation features.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique, stable identifier of a catalog event
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EventId(u32);

impl EventId {
    /// Creates an `EventId` from its raw value
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

/// One schedulable activity in the catalog
///
/// Records are created once at startup and never mutated; the catalog order
/// is the canonical display order. The date stays an ISO-like string because
/// nothing ever computes with it, it is only displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique identifier
    pub id: EventId,
    /// Display name
    pub name: String,
    /// Calendar date, ISO-like, not parsed
    pub date: String,
    /// Remaining seats; `u32` keeps "never negative" a type invariant
    pub capacity: u32,
}

impl EventRecord {
    /// Creates a new event record
    #[must_use]
    pub fn new(id: EventId, name: impl Into<String>, date: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            date: date.into(),
            capacity,
        }
    }
}

/// Role of a user interacting with the system
///
/// One tagged record type replaces the original admin subclass; admin-only
/// behavior is guarded by a role check instead of a subclass method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Administrator with access to the event management panel
    Admin,
    /// Regular customer submitting reservations
    Customer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Customer => write!(f, "cliente"),
        }
    }
}

/// Error raised when a role check denies an operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The user does not hold the admin role
    #[error("solo un administrador puede gestionar eventos (rol actual: {role})")]
    NotAdmin {
        /// The role the user actually holds
        role: Role,
    },
}

/// A user record, created per interaction and never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Role tag
    pub role: Role,
}

impl UserRecord {
    /// Creates an admin user
    #[must_use]
    pub fn admin(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: Role::Admin,
        }
    }

    /// Creates a customer user
    #[must_use]
    pub fn customer(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: Role::Customer,
        }
    }

    /// Returns the user-facing display form
    #[must_use]
    pub fn display_info(&self) -> String {
        format!("Usuario: {} ({})", self.name, self.email)
    }

    /// Whether this user holds the admin role
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Enters the event management panel
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAdmin`] when the user is not an admin.
    pub fn open_admin_panel(&self) -> Result<(), AccessError> {
        if !self.is_admin() {
            return Err(AccessError::NotAdmin { role: self.role });
        }

        tracing::info!(
            user = %self.name,
            "[ADMIN] {} accediendo al panel de gestión de eventos.",
            self.name
        );
        Ok(())
    }
}

/// Correlation id of a single reservation attempt
///
/// A delayed confirmation carries the id of the attempt that scheduled it,
/// so confirmations from superseded attempts can be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(Uuid);

impl AttemptId {
    /// Generate a new attempt id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
