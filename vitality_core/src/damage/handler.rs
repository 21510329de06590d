//! Damage handlers - One damage event and what it carries

use roles_core::EntityId;
use serde::{Deserialize, Serialize};

/// Damage value meaning "zero out health and shield unconditionally"
pub const LETHAL_DAMAGE: f64 = -1.0;

/// Result of applying a handler to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerOutput {
    /// Not applied, or nothing left to apply
    None,
    Damaged,
    Dead,
}

/// Who caused the damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackerInfo {
    pub attacker: Option<EntityId>,
    pub allow_self_damage: bool,
    /// Set during resolution when the attacker hurt itself
    pub is_suicide: bool,
}

/// The kind of a damage event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DamageKind {
    /// No attacker, only a description (falls, environment, admin)
    Custom { reason: String },
    /// Bound to an attacker, self-damage configurable
    Attacker(AttackerInfo),
    /// Attacker optional, self-damage always allowed
    Universal(AttackerInfo),
}

/// A single damage event, consumed once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageHandler {
    /// Mutable: role processing and resolution may reduce or zero it
    pub damage: f64,
    pub kind: DamageKind,
    absorbed_shield_damage: f64,
    dealt_health_damage: f64,
}

impl DamageHandler {
    fn with_kind(damage: f64, kind: DamageKind) -> Self {
        DamageHandler {
            damage,
            kind,
            absorbed_shield_damage: 0.0,
            dealt_health_damage: 0.0,
        }
    }

    /// Damage with a free-text reason and no attacker
    pub fn custom(damage: f64, reason: impl Into<String>) -> Self {
        Self::with_kind(damage, DamageKind::Custom { reason: reason.into() })
    }

    /// Damage bound to an attacker
    pub fn attacker(attacker: EntityId, damage: f64, allow_self_damage: bool) -> Self {
        Self::with_kind(
            damage,
            DamageKind::Attacker(AttackerInfo {
                attacker: Some(attacker),
                allow_self_damage,
                is_suicide: false,
            }),
        )
    }

    /// Default handler: optional attacker, self-damage allowed
    pub fn universal(attacker: Option<EntityId>, damage: f64) -> Self {
        Self::with_kind(
            damage,
            DamageKind::Universal(AttackerInfo {
                attacker,
                allow_self_damage: true,
                is_suicide: false,
            }),
        )
    }

    /// Unconditional kill
    pub fn lethal(reason: impl Into<String>) -> Self {
        Self::custom(LETHAL_DAMAGE, reason)
    }

    pub fn is_lethal(&self) -> bool {
        self.damage == LETHAL_DAMAGE
    }

    pub fn attacker_info(&self) -> Option<&AttackerInfo> {
        match &self.kind {
            DamageKind::Custom { .. } => None,
            DamageKind::Attacker(info) | DamageKind::Universal(info) => Some(info),
        }
    }

    pub fn attacker_id(&self) -> Option<EntityId> {
        self.attacker_info().and_then(|info| info.attacker)
    }

    /// Whether the attacker and `target` are the same entity
    pub fn is_self_damage(&self, target: EntityId) -> bool {
        self.attacker_id() == Some(target)
    }

    pub fn is_suicide(&self) -> bool {
        self.attacker_info().is_some_and(|info| info.is_suicide)
    }

    /// Shield absorbed by the last application
    pub fn absorbed_shield_damage(&self) -> f64 {
        self.absorbed_shield_damage
    }

    /// Health lost by the last application
    pub fn dealt_health_damage(&self) -> f64 {
        self.dealt_health_damage
    }

    pub(crate) fn record(&mut self, absorbed_shield: f64, dealt_health: f64) {
        self.absorbed_shield_damage = absorbed_shield;
        self.dealt_health_damage = dealt_health;
    }

    /// Short description for logs
    pub fn log_text(&self) -> String {
        let amount = if self.is_lethal() {
            "lethal".to_string()
        } else {
            format!("{:.1}", self.damage)
        };
        match &self.kind {
            DamageKind::Custom { reason } => format!("{} damage: {}", amount, reason),
            DamageKind::Attacker(info) | DamageKind::Universal(info) => match info.attacker {
                Some(attacker) => format!("{} damage from {}", amount, attacker),
                None => format!("{} damage", amount),
            },
        }
    }
}
