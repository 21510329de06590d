//! Role definitions and their capabilities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a simulated entity (player, NPC, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier of a role definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub u32);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything able to supply a health ceiling
pub trait MaxHealthSource {
    /// Maximum health, or `None` if this source has no health capability
    fn max_health(&self) -> Option<f64>;
}

/// Damage-processing capability of a role
///
/// Incoming damage becomes `damage * multiplier - flat_reduction`, floored at 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageProcessing {
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub flat_reduction: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Default for DamageProcessing {
    fn default() -> Self {
        DamageProcessing {
            multiplier: default_multiplier(),
            flat_reduction: 0.0,
        }
    }
}

impl DamageProcessing {
    /// Rewrite an incoming damage amount
    pub fn process(&self, damage: f64) -> f64 {
        (damage * self.multiplier - self.flat_reduction).max(0.0)
    }
}

/// A playable archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub id: RoleId,
    pub name: String,
    /// Health ceiling; roles without it (spectators, ...) have no health
    #[serde(default)]
    pub max_health: Option<f64>,
    /// Optional damage interception
    #[serde(default)]
    pub damage: Option<DamageProcessing>,
}

impl RoleDefinition {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        RoleDefinition {
            id: RoleId(id),
            name: name.into(),
            max_health: None,
            damage: None,
        }
    }

    pub fn with_max_health(mut self, max_health: f64) -> Self {
        self.max_health = Some(max_health);
        self
    }

    pub fn with_damage_processing(mut self, processing: DamageProcessing) -> Self {
        self.damage = Some(processing);
        self
    }

    /// The damage-processing capability, if this role has one
    pub fn damage_processing(&self) -> Option<&DamageProcessing> {
        self.damage.as_ref()
    }
}

impl MaxHealthSource for RoleDefinition {
    fn max_health(&self) -> Option<f64> {
        self.max_health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_processing_floors_at_zero() {
        let processing = DamageProcessing {
            multiplier: 0.5,
            flat_reduction: 10.0,
        };
        assert!((processing.process(40.0) - 10.0).abs() < f64::EPSILON);
        assert_eq!(processing.process(10.0), 0.0);
    }

    #[test]
    fn test_max_health_capability() {
        let human = RoleDefinition::new(1, "human").with_max_health(100.0);
        let spectator = RoleDefinition::new(2, "spectator");
        assert_eq!(human.max_health(), Some(100.0));
        assert_eq!(spectator.max_health(), None);
    }

    #[test]
    fn test_parse_role_defaults() {
        let role: RoleDefinition = toml::from_str(
            r#"
id = 7
name = "guard"
max_health = 100.0

[damage]
flat_reduction = 5.0
"#,
        )
        .unwrap();
        assert_eq!(role.id, RoleId(7));
        let damage = role.damage_processing().unwrap();
        assert!((damage.multiplier - 1.0).abs() < f64::EPSILON);
        assert!((damage.flat_reduction - 5.0).abs() < f64::EPSILON);
    }
}
