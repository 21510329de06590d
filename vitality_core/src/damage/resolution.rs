//! Damage resolution - Apply a DamageHandler to a StatHost
//!
//! Order of operations:
//! 1. Reject if the host's stats were bound to a different role, or the
//!    role gives the host no health to damage
//! 2. Lethal sentinel: zero shield and health, bypassing absorption
//! 3. Attacker checks (self-damage suppression, suicide flag)
//! 4. Shield absorbs, the remainder hits health

use super::handler::{DamageHandler, DamageKind, HandlerOutput};
use crate::stat_host::StatHost;
use roles_core::{EntityId, RoleDefinition};

impl DamageHandler {
    /// Let the target's role rewrite the damage (resistances and the like)
    ///
    /// The lethal sentinel is never rewritten.
    pub fn process_with_role(&mut self, role: Option<&RoleDefinition>) {
        if self.is_lethal() {
            return;
        }
        if let Some(processing) = role.and_then(|r| r.damage_processing()) {
            self.damage = processing.process(self.damage);
        }
    }

    /// Apply this handler to `host`, whose owner currently plays `role`
    pub fn apply_damage(&mut self, host: &mut StatHost, role: Option<&RoleDefinition>) -> HandlerOutput {
        if host.bound_role() != role.map(|r| r.id) {
            return HandlerOutput::None;
        }
        // Roles without a health ceiling (spectators) cannot be damaged or killed again
        if host.health().max_value(role) <= 0.0 {
            return HandlerOutput::None;
        }

        if self.is_lethal() {
            let health_before = host.health().current();
            let shield_before = host.shield().current();
            host.shield_mut().drain();
            host.health_mut().set(0.0, role);
            self.record(shield_before, health_before);
            return HandlerOutput::Dead;
        }

        self.process_damage(host.owner());

        if self.damage.is_nan() || self.damage <= 0.0 {
            return HandlerOutput::None;
        }

        let remaining = host.shield_mut().process_damage(self.damage);
        let absorbed = self.damage - remaining;

        let health_before = host.health().current();
        host.health_mut().set(health_before - remaining, role);
        let health_after = host.health().current();
        self.record(absorbed, health_before - health_after);

        if health_after <= 0.0 {
            HandlerOutput::Dead
        } else {
            HandlerOutput::Damaged
        }
    }

    /// Kind-specific adjustments, run once per application
    fn process_damage(&mut self, target: EntityId) {
        match &mut self.kind {
            DamageKind::Custom { .. } => {}
            DamageKind::Attacker(info) | DamageKind::Universal(info) => {
                if info.attacker != Some(target) {
                    return;
                }
                if !info.allow_self_damage {
                    self.damage = 0.0;
                    return;
                }
                info.is_suicide = true;
            }
        }
    }
}
