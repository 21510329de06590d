//! Role notifications

use crate::assignment::RoleChangeReason;
use crate::role::{EntityId, RoleId};
use std::fmt;

/// A replacement of one role by another on an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleChange {
    pub entity: EntityId,
    pub previous: RoleId,
    pub new: RoleId,
    pub reason: RoleChangeReason,
}

type RoleChangedListener = Box<dyn FnMut(&RoleChange)>;
type RoleDisabledListener = Box<dyn FnMut(EntityId, RoleId, RoleId)>;

/// Listener lists for role transitions
#[derive(Default)]
pub struct RoleEvents {
    on_role_changed: Vec<RoleChangedListener>,
    on_role_disabled: Vec<RoleDisabledListener>,
}

impl RoleEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with every replacement (not the first assignment)
    pub fn on_role_changed(&mut self, listener: impl FnMut(&RoleChange) + 'static) {
        self.on_role_changed.push(Box::new(listener));
    }

    /// Called with (entity, outgoing role, incoming role) before a switch
    pub fn on_role_disabled(&mut self, listener: impl FnMut(EntityId, RoleId, RoleId) + 'static) {
        self.on_role_disabled.push(Box::new(listener));
    }

    pub(crate) fn emit_changed(&mut self, change: &RoleChange) {
        for listener in &mut self.on_role_changed {
            listener(change);
        }
    }

    pub(crate) fn emit_disabled(&mut self, entity: EntityId, outgoing: RoleId, incoming: RoleId) {
        for listener in &mut self.on_role_disabled {
            listener(entity, outgoing, incoming);
        }
    }
}

impl fmt::Debug for RoleEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleEvents")
            .field("on_role_changed", &self.on_role_changed.len())
            .field("on_role_disabled", &self.on_role_disabled.len())
            .finish()
    }
}
