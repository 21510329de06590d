//! Per-entity role state machine: Unassigned -> Assigned(role) -> Assigned(role') ...

use crate::catalog::RoleCatalog;
use crate::events::{RoleChange, RoleEvents};
use crate::role::{EntityId, RoleDefinition, RoleId};
use crate::RoleError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Why an entity received its current role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleChangeReason {
    #[default]
    Spawned,
    Assigned,
    Died,
}

/// Runtime state of the role an entity currently plays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveRole {
    pub id: RoleId,
    pub owner: EntityId,
    /// Seconds since the role was initialized on its owner
    pub active_time: f64,
    pub reason: RoleChangeReason,
}

/// Current and previous role of one entity
#[derive(Debug, Clone)]
pub struct RoleAssignment {
    owner: EntityId,
    current: Option<ActiveRole>,
    previous: Option<RoleId>,
}

impl RoleAssignment {
    /// Create an unassigned state for `owner`
    pub fn new(owner: EntityId) -> Self {
        RoleAssignment {
            owner,
            current: None,
            previous: None,
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn is_assigned(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&ActiveRole> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<RoleId> {
        self.current.map(|r| r.id)
    }

    pub fn previous_id(&self) -> Option<RoleId> {
        self.previous
    }

    /// Resolve the current role's definition
    pub fn current_role<'a>(&self, catalog: &'a RoleCatalog) -> Option<&'a RoleDefinition> {
        self.current.and_then(|r| catalog.get(r.id))
    }

    /// Switch to a new role
    ///
    /// The outgoing role is disabled (with the incoming id) before the switch,
    /// the incoming role is initialized on the owner, and replacements (not the
    /// first assignment) raise a role change. An unknown id leaves the
    /// assignment untouched.
    pub fn initialize_new_role(
        &mut self,
        catalog: &RoleCatalog,
        new_id: RoleId,
        reason: RoleChangeReason,
        events: &mut RoleEvents,
    ) -> Result<Option<RoleChange>, RoleError> {
        let new_role = catalog.resolve(new_id)?;

        let outgoing = self.current.map(|r| r.id);
        if let Some(previous) = outgoing {
            events.emit_disabled(self.owner, previous, new_id);
        }

        self.previous = outgoing;
        self.current = Some(ActiveRole {
            id: new_role.id,
            owner: self.owner,
            active_time: 0.0,
            reason,
        });

        let change = outgoing.map(|previous| RoleChange {
            entity: self.owner,
            previous,
            new: new_id,
            reason,
        });

        match &change {
            Some(change) => {
                info!(
                    entity = %self.owner,
                    previous = %change.previous,
                    new = %change.new,
                    ?reason,
                    "role changed"
                );
                events.emit_changed(change);
            }
            None => info!(entity = %self.owner, role = %new_id, ?reason, "role assigned"),
        }

        Ok(change)
    }

    /// Advance the active time of the current role
    pub fn tick(&mut self, delta: f64) {
        if let Some(active) = &mut self.current {
            active.active_time += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn catalog() -> RoleCatalog {
        let mut catalog = RoleCatalog::new();
        catalog
            .register(RoleDefinition::new(1, "scientist").with_max_health(100.0))
            .unwrap();
        catalog
            .register(RoleDefinition::new(2, "guard").with_max_health(150.0))
            .unwrap();
        catalog
    }

    #[test]
    fn test_first_assignment_raises_no_change() {
        let catalog = catalog();
        let mut events = RoleEvents::new();
        let changes = Rc::new(RefCell::new(0));
        let seen = changes.clone();
        events.on_role_changed(move |_| *seen.borrow_mut() += 1);

        let mut assignment = RoleAssignment::new(EntityId(1));
        let change = assignment
            .initialize_new_role(&catalog, RoleId(1), RoleChangeReason::Spawned, &mut events)
            .unwrap();

        assert!(change.is_none());
        assert_eq!(*changes.borrow(), 0);
        assert_eq!(assignment.current_id(), Some(RoleId(1)));
        assert_eq!(assignment.previous_id(), None);
    }

    #[test]
    fn test_replacement_disables_then_changes() {
        let catalog = catalog();
        let mut events = RoleEvents::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let disabled_log = log.clone();
        events.on_role_disabled(move |entity, outgoing, incoming| {
            disabled_log
                .borrow_mut()
                .push(format!("disabled {} {}->{}", entity, outgoing, incoming));
        });
        let changed_log = log.clone();
        events.on_role_changed(move |change| {
            changed_log
                .borrow_mut()
                .push(format!("changed {}->{}", change.previous, change.new));
        });

        let mut assignment = RoleAssignment::new(EntityId(4));
        assignment
            .initialize_new_role(&catalog, RoleId(1), RoleChangeReason::Spawned, &mut events)
            .unwrap();
        let change = assignment
            .initialize_new_role(&catalog, RoleId(2), RoleChangeReason::Assigned, &mut events)
            .unwrap()
            .unwrap();

        assert_eq!(change.previous, RoleId(1));
        assert_eq!(change.new, RoleId(2));
        assert_eq!(assignment.previous_id(), Some(RoleId(1)));
        assert_eq!(
            *log.borrow(),
            vec!["disabled #4 1->2".to_string(), "changed 1->2".to_string()]
        );
    }

    #[test]
    fn test_unknown_role_leaves_state() {
        let catalog = catalog();
        let mut events = RoleEvents::new();
        let mut assignment = RoleAssignment::new(EntityId(1));
        assignment
            .initialize_new_role(&catalog, RoleId(1), RoleChangeReason::Spawned, &mut events)
            .unwrap();

        let result =
            assignment.initialize_new_role(&catalog, RoleId(99), RoleChangeReason::Assigned, &mut events);

        assert_eq!(result, Err(RoleError::UnknownRole(RoleId(99))));
        assert_eq!(assignment.current_id(), Some(RoleId(1)));
    }

    #[test]
    fn test_active_time_resets_on_init() {
        let catalog = catalog();
        let mut events = RoleEvents::new();
        let mut assignment = RoleAssignment::new(EntityId(1));
        assignment
            .initialize_new_role(&catalog, RoleId(1), RoleChangeReason::Spawned, &mut events)
            .unwrap();
        assignment.tick(2.5);
        assert!((assignment.current().unwrap().active_time - 2.5).abs() < f64::EPSILON);

        assignment
            .initialize_new_role(&catalog, RoleId(2), RoleChangeReason::Assigned, &mut events)
            .unwrap();
        let active = assignment.current().unwrap();
        assert_eq!(active.active_time, 0.0);
        assert_eq!(active.owner, EntityId(1));
        assert_eq!(
            assignment.current_role(&catalog).unwrap().max_health,
            Some(150.0)
        );
    }
}
