//! Damage system - Handlers and their resolution against stat hosts

mod handler;
mod resolution;

pub use handler::{AttackerInfo, DamageHandler, DamageKind, HandlerOutput, LETHAL_DAMAGE};
