//! Closed enumerations used across the service.
//!
//! Each enum has a single canonical wire/storage spelling (`snake_case`).
//! With the `postgres` feature the store-backed enums map onto the Postgres
//! enum types created by the server migrations.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a reception.
///
/// The only transition is `InProgress -> Closed`; a closed reception is never
/// reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "reception_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStatus {
    /// Products may be added and removed.
    InProgress,
    /// Terminal state.
    Closed,
}

impl ReceptionStatus {
    /// Canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    /// Whether `self -> next` is a permitted transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::InProgress, Self::Closed))
    }
}

impl std::fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of item recorded against a reception.
///
/// The Russian spellings used by older clients are accepted on input;
/// output always uses the English form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "product_type", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[serde(alias = "электроника")]
    Electronics,
    #[serde(alias = "одежда")]
    Clothing,
    #[serde(alias = "обувь")]
    Shoes,
}

impl ProductType {
    /// Every product type, in declaration order.
    pub const ALL: [Self; 3] = [Self::Electronics, Self::Clothing, Self::Shoes];

    /// Canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Shoes => "shoes",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electronics" | "электроника" => Ok(Self::Electronics),
            "clothing" | "одежда" => Ok(Self::Clothing),
            "shoes" | "обувь" => Ok(Self::Shoes),
            _ => Err(format!("invalid product type: {s}")),
        }
    }
}

/// Caller role with a fixed set of permitted operations.
///
/// See [`crate::capability`] for the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Registers pickup points and browses the network.
    Moderator,
    /// Runs receptions and records products at a pickup point.
    Employee,
}

impl Role {
    /// Canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moderator => "moderator",
            Self::Employee => "employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
