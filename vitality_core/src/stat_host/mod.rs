//! StatHost - The fixed set of survival stats owned by one entity

use crate::config::ShieldDefaults;
use crate::damage::{DamageHandler, HandlerOutput};
use crate::events::DamageEvents;
use crate::stat::{HealthStat, ShieldPool};
use roles_core::{EntityId, RoleDefinition, RoleId};
use std::fmt;
use tracing::{debug, info};

type HandlerListener = Box<dyn FnMut(&DamageHandler)>;

/// Health and shield of one entity, plus its damage notifications
pub struct StatHost {
    owner: EntityId,
    health: HealthStat,
    shield: ShieldPool,
    /// Role the stats were set up for; damage is refused under any other
    bound_role: Option<RoleId>,
    /// God mode: all damage is refused
    pub ignore_damage: bool,
    on_damaged: Vec<HandlerListener>,
    on_died: Vec<HandlerListener>,
    kill_routine: Option<HandlerListener>,
}

impl StatHost {
    pub fn new(owner: EntityId) -> Self {
        Self::with_shield_defaults(owner, ShieldDefaults::default())
    }

    pub fn with_shield_defaults(owner: EntityId, defaults: ShieldDefaults) -> Self {
        StatHost {
            owner,
            health: HealthStat::new(),
            shield: ShieldPool::new(defaults),
            bound_role: None,
            ignore_damage: false,
            on_damaged: Vec::new(),
            on_died: Vec::new(),
            kill_routine: None,
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn health(&self) -> &HealthStat {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut HealthStat {
        &mut self.health
    }

    pub fn shield(&self) -> &ShieldPool {
        &self.shield
    }

    pub fn shield_mut(&mut self) -> &mut ShieldPool {
        &mut self.shield
    }

    pub fn bound_role(&self) -> Option<RoleId> {
        self.bound_role
    }

    /// Mark the stats as belonging to `role`
    ///
    /// Does not touch health; a new ceiling applies on the next write.
    pub fn bind_role(&mut self, role: Option<&RoleDefinition>) {
        self.bound_role = role.map(|r| r.id);
    }

    /// Per-entity listener, called after the global one
    pub fn on_damaged(&mut self, listener: impl FnMut(&DamageHandler) + 'static) {
        self.on_damaged.push(Box::new(listener));
    }

    /// Per-entity listener, called after the global one
    pub fn on_died(&mut self, listener: impl FnMut(&DamageHandler) + 'static) {
        self.on_died.push(Box::new(listener));
    }

    /// Replace the routine run after death notifications (default: nothing)
    pub fn set_kill_routine(&mut self, routine: impl FnMut(&DamageHandler) + 'static) {
        self.kill_routine = Some(Box::new(routine));
    }

    /// Advance per-frame stat processes
    pub fn tick(&mut self, delta: f64) {
        self.shield.update(delta);
    }

    pub fn heal(&mut self, amount: f64, role: Option<&RoleDefinition>) {
        self.health.heal(amount, role);
    }

    /// Run a damage event against this entity and raise notifications
    pub fn deal_damage(
        &mut self,
        handler: &mut DamageHandler,
        role: Option<&RoleDefinition>,
        events: &mut DamageEvents,
    ) -> HandlerOutput {
        if self.ignore_damage {
            debug!(entity = %self.owner, damage = %handler.log_text(), "damage ignored");
            return HandlerOutput::None;
        }

        handler.process_with_role(role);

        let output = handler.apply_damage(self, role);
        if output == HandlerOutput::None {
            return output;
        }

        debug!(
            entity = %self.owner,
            damage = %handler.log_text(),
            absorbed = handler.absorbed_shield_damage(),
            dealt = handler.dealt_health_damage(),
            ?output,
            "damage applied"
        );

        events.emit_damaged(self.owner, handler);
        for listener in &mut self.on_damaged {
            listener(handler);
        }

        if output == HandlerOutput::Dead {
            info!(entity = %self.owner, cause = %handler.log_text(), "entity died");
            events.emit_died(self.owner, handler);
            for listener in &mut self.on_died {
                listener(handler);
            }
            if let Some(routine) = &mut self.kill_routine {
                routine(handler);
            }
        }

        output
    }
}

impl fmt::Debug for StatHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatHost")
            .field("owner", &self.owner)
            .field("health", &self.health)
            .field("shield", &self.shield)
            .field("bound_role", &self.bound_role)
            .field("ignore_damage", &self.ignore_damage)
            .finish_non_exhaustive()
    }
}
