//! Survival stats: bounded values, health and the shield layer

mod clamped;
mod health;
mod shield;

pub use clamped::ClampedStat;
pub use health::HealthStat;
pub use shield::{AbsorptionProcess, KillCode, ShieldPool};
