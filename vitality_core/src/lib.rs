//! vitality_core - Layered health, shield and damage resolution for game entities
//!
//! This library provides:
//! - ClampedStat: Bounded value with change notification
//! - ShieldPool: Stacked, decaying absorption processes (artificial health)
//! - HealthStat: Health whose ceiling comes from the entity's role
//! - DamageHandler: One damage event, resolved shield-first against a StatHost
//! - Simulation: Owner of the role catalog, entities and notifications
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vitality_core::prelude::*;
//!
//! let catalog = RoleCatalog::load(Path::new("config/roles/")).unwrap();
//! let config = VitalityConfig::load_from_path(Path::new("config/vitality.toml")).unwrap();
//! let mut sim = Simulation::new(config, catalog);
//!
//! let attacker = sim.spawn(RoleId(1)).unwrap();
//! let target = sim.spawn(RoleId(1)).unwrap();
//!
//! let mut handler = DamageHandler::universal(Some(attacker), 30.0);
//! let output = sim.deal_damage(target, &mut handler).unwrap();
//! println!("{:?}: {} to health", output, handler.dealt_health_damage());
//!
//! sim.tick(1.0 / 60.0);
//! ```

pub mod config;
pub mod damage;
pub mod error;
pub mod events;
pub mod prelude;
pub mod simulation;
pub mod stat;
pub mod stat_host;

// Core API - what most users need
pub use damage::{DamageHandler, DamageKind, HandlerOutput, LETHAL_DAMAGE};
pub use error::SimulationError;
pub use events::DamageEvents;
pub use simulation::{Entity, Simulation};
pub use stat::{AbsorptionProcess, ClampedStat, HealthStat, KillCode, ShieldPool};
pub use stat_host::StatHost;

// Configuration
pub use config::{ShieldDefaults, VitalityConfig};

// Re-export commonly needed roles_core types
pub use roles_core::{EntityId, RoleCatalog, RoleChangeReason, RoleDefinition, RoleId};
