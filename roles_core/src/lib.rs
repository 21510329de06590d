//! roles_core - Swappable role archetypes for game entities
//!
//! This library provides:
//! - RoleDefinition: Data-driven role with optional capabilities (max health, damage processing)
//! - RoleCatalog: Owned registry of role definitions, loadable from TOML/JSON files
//! - RoleAssignment: Per-entity current/previous role state machine
//! - RoleEvents: Role changed / role disabled notifications

mod assignment;
mod catalog;
mod config;
mod events;
mod role;

pub use assignment::{ActiveRole, RoleAssignment, RoleChangeReason};
pub use catalog::RoleCatalog;
pub use events::{RoleChange, RoleEvents};
pub use role::{DamageProcessing, EntityId, MaxHealthSource, RoleDefinition, RoleId};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading role definition files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("JSON error in '{path}': {error}")]
    Json {
        error: serde_json::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error registering or resolving roles
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoleError {
    #[error("Role id {0} is already registered")]
    DuplicateId(RoleId),
    #[error("Role name '{0}' is already registered")]
    DuplicateName(String),
    #[error("Unknown role id: {0}")]
    UnknownRole(RoleId),
    #[error("Unknown role name: {0}")]
    UnknownRoleName(String),
}
