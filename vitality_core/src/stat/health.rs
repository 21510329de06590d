//! HealthStat - Primary health whose ceiling comes from the active role

use super::ClampedStat;
use roles_core::MaxHealthSource;

/// Health of one entity
///
/// The ceiling is not stored: it is the custom max if set, else the role's
/// max health, else 0. Swapping roles changes the ceiling immediately but
/// `current` is only re-clamped on the next write.
#[derive(Debug, Default)]
pub struct HealthStat {
    stat: ClampedStat,
}

impl HealthStat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> f64 {
        self.stat.current()
    }

    /// Ceiling under the given role
    pub fn max_value<R: MaxHealthSource + ?Sized>(&self, role: Option<&R>) -> f64 {
        if self.stat.custom_max() > 0.0 {
            return self.stat.custom_max();
        }
        role.and_then(|r| r.max_health()).unwrap_or(0.0)
    }

    pub fn normalized<R: MaxHealthSource + ?Sized>(&self, role: Option<&R>) -> f64 {
        let max = self.max_value(role);
        if max == 0.0 {
            return 0.0;
        }
        self.current() / max
    }

    pub fn is_dead(&self) -> bool {
        self.current() <= 0.0
    }

    pub fn set<R: MaxHealthSource + ?Sized>(&mut self, value: f64, role: Option<&R>) {
        self.sync_max(role);
        self.stat.set(value);
    }

    /// Restore health, never exceeding the ceiling
    pub fn heal<R: MaxHealthSource + ?Sized>(&mut self, amount: f64, role: Option<&R>) {
        self.sync_max(role);
        self.stat.restore(amount);
    }

    /// Set health to the ceiling
    pub fn fill<R: MaxHealthSource + ?Sized>(&mut self, role: Option<&R>) {
        let max = self.max_value(role);
        self.set(max, role);
    }

    pub fn set_custom_max(&mut self, value: f64) {
        self.stat.set_custom_max(value);
    }

    pub fn clear_custom_max(&mut self) {
        self.stat.clear_custom_max();
    }

    /// Register a callback receiving (previous, new) health
    pub fn on_changed(&mut self, listener: impl FnMut(f64, f64) + 'static) {
        self.stat.on_changed(listener);
    }

    fn sync_max<R: MaxHealthSource + ?Sized>(&mut self, role: Option<&R>) {
        self.stat
            .set_max(role.and_then(|r| r.max_health()).unwrap_or(0.0));
    }
}
