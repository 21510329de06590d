//! Damage notifications shared by every entity of a simulation

use crate::damage::DamageHandler;
use roles_core::EntityId;
use std::fmt;

type GlobalListener = Box<dyn FnMut(EntityId, &DamageHandler)>;

/// Listeners for any entity being damaged or killed
///
/// These fire before the per-entity listeners on [`StatHost`](crate::StatHost).
#[derive(Default)]
pub struct DamageEvents {
    on_any_damaged: Vec<GlobalListener>,
    on_any_died: Vec<GlobalListener>,
}

impl DamageEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_any_damaged(&mut self, listener: impl FnMut(EntityId, &DamageHandler) + 'static) {
        self.on_any_damaged.push(Box::new(listener));
    }

    pub fn on_any_died(&mut self, listener: impl FnMut(EntityId, &DamageHandler) + 'static) {
        self.on_any_died.push(Box::new(listener));
    }

    pub(crate) fn emit_damaged(&mut self, entity: EntityId, handler: &DamageHandler) {
        for listener in &mut self.on_any_damaged {
            listener(entity, handler);
        }
    }

    pub(crate) fn emit_died(&mut self, entity: EntityId, handler: &DamageHandler) {
        for listener in &mut self.on_any_died {
            listener(entity, handler);
        }
    }
}

impl fmt::Debug for DamageEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DamageEvents")
            .field("on_any_damaged", &self.on_any_damaged.len())
            .field("on_any_died", &self.on_any_died.len())
            .finish()
    }
}
