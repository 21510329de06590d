//! Simulation - Entities, their roles and stats, and shared notifications
//!
//! Replaces process-wide registries: everything that needs role lookups goes
//! through a `Simulation`, so several can run side by side.

use crate::config::VitalityConfig;
use crate::damage::{DamageHandler, HandlerOutput};
use crate::error::SimulationError;
use crate::events::DamageEvents;
use crate::stat_host::StatHost;
use roles_core::{
    EntityId, RoleAssignment, RoleCatalog, RoleChange, RoleChangeReason, RoleDefinition,
    RoleEvents, RoleId,
};
use std::collections::BTreeMap;
use tracing::warn;

/// One simulated entity
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    roles: RoleAssignment,
    stats: StatHost,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn roles(&self) -> &RoleAssignment {
        &self.roles
    }

    pub fn stats(&self) -> &StatHost {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatHost {
        &mut self.stats
    }
}

/// Owner of the role catalog and every entity's survival state
#[derive(Debug)]
pub struct Simulation {
    config: VitalityConfig,
    catalog: RoleCatalog,
    entities: BTreeMap<EntityId, Entity>,
    damage_events: DamageEvents,
    role_events: RoleEvents,
    next_entity_id: u32,
}

impl Simulation {
    pub fn new(config: VitalityConfig, catalog: RoleCatalog) -> Self {
        Simulation {
            config,
            catalog,
            entities: BTreeMap::new(),
            damage_events: DamageEvents::new(),
            role_events: RoleEvents::new(),
            next_entity_id: 1,
        }
    }

    pub fn config(&self) -> &VitalityConfig {
        &self.config
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Registration is an administrative operation, not for mid-frame use
    pub fn catalog_mut(&mut self) -> &mut RoleCatalog {
        &mut self.catalog
    }

    pub fn damage_events_mut(&mut self) -> &mut DamageEvents {
        &mut self.damage_events
    }

    pub fn role_events_mut(&mut self) -> &mut RoleEvents {
        &mut self.role_events
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Definition of the role `id` currently plays
    pub fn current_role(&self, id: EntityId) -> Option<&RoleDefinition> {
        self.entities
            .get(&id)
            .and_then(|e| e.roles.current_role(&self.catalog))
    }

    /// Health ceiling of `id` under its current role
    pub fn max_health(&self, id: EntityId) -> Option<f64> {
        let entity = self.entities.get(&id)?;
        Some(entity.stats.health().max_value(entity.roles.current_role(&self.catalog)))
    }

    /// Create an entity playing `role`, at full health
    pub fn spawn(&mut self, role: RoleId) -> Result<EntityId, SimulationError> {
        self.catalog.resolve(role)?;

        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;

        let mut roles = RoleAssignment::new(id);
        roles.initialize_new_role(&self.catalog, role, RoleChangeReason::Spawned, &mut self.role_events)?;

        let definition = self.catalog.get(role);
        let mut stats = StatHost::with_shield_defaults(id, self.config.shield);
        stats.bind_role(definition);
        stats.health_mut().fill(definition);

        self.entities.insert(id, Entity { id, roles, stats });
        Ok(id)
    }

    /// Remove an entity entirely
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Swap the role of an entity
    ///
    /// Health is not re-clamped; the new ceiling applies on the next write.
    pub fn assign_role(
        &mut self,
        id: EntityId,
        role: RoleId,
        reason: RoleChangeReason,
    ) -> Result<Option<RoleChange>, SimulationError> {
        let Self {
            entities,
            catalog,
            role_events,
            ..
        } = self;
        let entity = entities
            .get_mut(&id)
            .ok_or(SimulationError::UnknownEntity(id))?;

        let change = entity
            .roles
            .initialize_new_role(catalog, role, reason, role_events)?;
        entity.stats.bind_role(catalog.get(role));
        Ok(change)
    }

    /// Advance one frame: shield decay first, then role timers
    pub fn tick(&mut self, delta: f64) {
        for entity in self.entities.values_mut() {
            entity.stats.tick(delta);
            entity.roles.tick(delta);
        }
    }

    /// Apply a damage event to `target` immediately
    ///
    /// On death the entity is moved to the configured death role, after all
    /// death notifications and the kill routine have run.
    pub fn deal_damage(
        &mut self,
        target: EntityId,
        handler: &mut DamageHandler,
    ) -> Result<HandlerOutput, SimulationError> {
        let output = {
            let Self {
                entities,
                catalog,
                damage_events,
                ..
            } = self;
            let entity = entities
                .get_mut(&target)
                .ok_or(SimulationError::UnknownEntity(target))?;
            let role = entity.roles.current_role(catalog);
            entity.stats.deal_damage(handler, role, damage_events)
        };

        if output == HandlerOutput::Dead {
            if let Some(death_role) = self.death_role() {
                let current = self.entities.get(&target).and_then(|e| e.roles.current_id());
                if current != Some(death_role) {
                    self.assign_role(target, death_role, RoleChangeReason::Died)?;
                }
            }
        }

        Ok(output)
    }

    /// Heal `target` up to its current ceiling
    pub fn heal(&mut self, target: EntityId, amount: f64) -> Result<(), SimulationError> {
        let entity = self
            .entities
            .get_mut(&target)
            .ok_or(SimulationError::UnknownEntity(target))?;
        let role = entity.roles.current_role(&self.catalog);
        entity.stats.heal(amount, role);
        Ok(())
    }

    fn death_role(&self) -> Option<RoleId> {
        let name = self.config.roles.death_role.as_deref()?;
        match self.catalog.find_by_name(name) {
            Some(role) => Some(role.id),
            None => {
                warn!(role = name, "configured death role is not registered");
                None
            }
        }
    }
}
