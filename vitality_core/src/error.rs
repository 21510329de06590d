use roles_core::{EntityId, RoleError};
use thiserror::Error;

/// Error from an administrative simulation operation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),
    #[error(transparent)]
    Role(#[from] RoleError),
}
