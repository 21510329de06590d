//! Prelude module for convenient imports
//!
//! ```rust
//! use vitality_core::prelude::*;
//! ```

// Simulation
pub use crate::simulation::{Entity, Simulation};
pub use crate::stat_host::StatHost;

// Stats
pub use crate::stat::{ClampedStat, HealthStat, KillCode, ShieldPool};

// Damage system
pub use crate::damage::{DamageHandler, DamageKind, HandlerOutput, LETHAL_DAMAGE};
pub use crate::events::DamageEvents;

// Config
pub use crate::config::{ShieldDefaults, VitalityConfig};

// Re-exports from roles_core
pub use roles_core::{
    DamageProcessing, EntityId, RoleCatalog, RoleChange, RoleChangeReason, RoleDefinition,
    RoleEvents, RoleId,
};
