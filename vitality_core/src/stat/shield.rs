//! ShieldPool - Artificial health made of stacked absorption processes
//!
//! Each process absorbs a fraction (efficacy) of incoming damage until it runs
//! dry. Processes are kept sorted by efficacy, highest first, so the strongest
//! layer always absorbs first. After its sustain window a process decays at
//! its own rate, and non-persistent processes are dropped once empty.

use super::ClampedStat;
use crate::config::ShieldDefaults;
use tracing::debug;

/// Identifier handed out by [`ShieldPool::add_process`] for later lookup/removal
pub type KillCode = u32;

/// One stackable shield source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsorptionProcess {
    /// Current reserve, always within `[0, limit]`
    pub amount: f64,
    pub limit: f64,
    /// Amount lost per second once sustain has run out
    pub decay_rate: f64,
    /// Fraction of incoming damage this layer absorbs
    pub efficacy: f64,
    /// Seconds left before decay resumes
    pub sustain_remaining: f64,
    /// Survives reaching zero
    pub persistent: bool,
    pub kill_code: KillCode,
}

/// The artificial health layer of an entity
#[derive(Debug)]
pub struct ShieldPool {
    processes: Vec<AbsorptionProcess>,
    /// `current` is the sum of all amounts, `max` its high-water mark
    stat: ClampedStat,
    next_kill_code: KillCode,
    defaults: ShieldDefaults,
}

impl Default for ShieldPool {
    fn default() -> Self {
        ShieldPool::new(ShieldDefaults::default())
    }
}

impl ShieldPool {
    pub fn new(defaults: ShieldDefaults) -> Self {
        ShieldPool {
            processes: Vec::new(),
            stat: ClampedStat::default(),
            next_kill_code: 1,
            defaults,
        }
    }

    /// Sum of all process amounts as of the last refresh
    pub fn current(&self) -> f64 {
        self.stat.current()
    }

    /// Highest total seen so far, or the custom max if one is set
    pub fn max_value(&self) -> f64 {
        self.stat.effective_max()
    }

    pub fn normalized(&self) -> f64 {
        self.stat.normalized()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Processes in absorption order
    pub fn processes(&self) -> impl Iterator<Item = &AbsorptionProcess> {
        self.processes.iter()
    }

    /// Live sum of all process amounts
    pub fn total(&self) -> f64 {
        self.processes.iter().map(|p| p.amount).sum()
    }

    pub fn set_custom_max(&mut self, value: f64) {
        self.stat.set_custom_max(value);
    }

    pub fn clear_custom_max(&mut self) {
        self.stat.clear_custom_max();
    }

    /// Register a callback receiving (previous, new) pool totals
    pub fn on_changed(&mut self, listener: impl FnMut(f64, f64) + 'static) {
        self.stat.on_changed(listener);
    }

    /// Add a process using the configured defaults
    pub fn add_default_process(&mut self, amount: f64) -> KillCode {
        let d = self.defaults;
        self.add_process(amount, d.limit, d.decay, d.efficacy, d.sustain, d.persistent)
    }

    /// Add a shield process and return its kill code
    ///
    /// The granted amount is cut so the pool stays under a soft combined cap:
    /// `limit + sum(min(limit, other.limit))`. It never exceeds `limit`.
    pub fn add_process(
        &mut self,
        amount: f64,
        limit: f64,
        decay: f64,
        efficacy: f64,
        sustain: f64,
        persistent: bool,
    ) -> KillCode {
        let limit = limit.max(0.0);
        let efficacy = efficacy.clamp(0.0, 1.0);
        let mut amount = amount.max(0.0);

        let local_amount: f64 = self.processes.iter().map(|p| p.amount).sum();
        let local_limit: f64 = limit + self.processes.iter().map(|p| p.limit.min(limit)).sum::<f64>();
        let overflow = local_amount + amount - local_limit;
        if overflow > 0.0 {
            amount = (amount - overflow).max(0.0);
        }
        amount = amount.min(limit);

        let kill_code = self.next_kill_code;
        self.next_kill_code += 1;

        let process = AbsorptionProcess {
            amount,
            limit,
            decay_rate: decay,
            efficacy,
            sustain_remaining: sustain.max(0.0),
            persistent,
            kill_code,
        };

        // After equal-efficacy processes, so ties keep insertion order
        match self.processes.iter().position(|p| p.efficacy < efficacy) {
            Some(index) => self.processes.insert(index, process),
            None => self.processes.push(process),
        }

        debug!(kill_code, amount, limit, efficacy, "added shield process");
        self.refresh();
        kill_code
    }

    /// Absorb damage through the layers, returning what gets through
    pub fn process_damage(&mut self, damage: f64) -> f64 {
        if damage.is_nan() || damage <= 0.0 {
            return damage;
        }

        let mut damage = damage;
        for process in &mut self.processes {
            let absorbed = damage * process.efficacy;
            if absorbed < process.amount {
                process.amount -= absorbed;
                damage -= absorbed;
                break;
            }

            damage -= process.amount;
            process.amount = 0.0;
        }

        self.refresh();
        damage
    }

    /// Advance sustain and decay, dropping empty non-persistent processes
    pub fn update(&mut self, delta: f64) {
        let mut total = 0.0;
        let mut expired = Vec::new();

        for process in &mut self.processes {
            total += process.amount;

            if process.sustain_remaining > 0.0 {
                process.sustain_remaining -= delta;
                continue;
            }

            process.amount = (process.amount - process.decay_rate * delta).clamp(0.0, process.limit);
            if process.amount == 0.0 && !process.persistent {
                expired.push(process.kill_code);
            }
        }

        if !expired.is_empty() {
            debug!(?expired, "shield processes expired");
            self.processes.retain(|p| !expired.contains(&p.kill_code));
        }

        self.set_total(total.max(0.0));
    }

    /// Remove a process by kill code
    pub fn kill_process(&mut self, kill_code: KillCode) -> bool {
        let Some(index) = self.processes.iter().position(|p| p.kill_code == kill_code) else {
            return false;
        };
        self.processes.remove(index);
        debug!(kill_code, "killed shield process");
        self.refresh();
        true
    }

    pub fn try_get_process(&self, kill_code: KillCode) -> Option<&AbsorptionProcess> {
        self.processes.iter().find(|p| p.kill_code == kill_code)
    }

    pub fn try_get_process_mut(&mut self, kill_code: KillCode) -> Option<&mut AbsorptionProcess> {
        self.processes.iter_mut().find(|p| p.kill_code == kill_code)
    }

    /// Empty every process without removing any
    pub fn drain(&mut self) {
        for process in &mut self.processes {
            process.amount = 0.0;
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        let total = self.total();
        self.set_total(total);
    }

    fn set_total(&mut self, total: f64) {
        if total > self.stat.max() {
            self.stat.set_max(total);
        }
        self.stat.set(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn pool_with(amount: f64, limit: f64, efficacy: f64) -> (ShieldPool, KillCode) {
        let mut pool = ShieldPool::default();
        let code = pool.add_process(amount, limit, 0.0, efficacy, 0.0, false);
        (pool, code)
    }

    #[test]
    fn test_partial_absorption() {
        let (mut pool, code) = pool_with(50.0, 50.0, 0.7);
        let remaining = pool.process_damage(40.0);

        assert!(approx(remaining, 12.0));
        assert!(approx(pool.try_get_process(code).unwrap().amount, 22.0));
        assert!(approx(pool.current(), 22.0));
    }

    #[test]
    fn test_exhausted_layer_passes_rest() {
        let (mut pool, code) = pool_with(10.0, 50.0, 0.5);
        // 100 * 0.5 = 50 >= 10: layer breaks, 90 gets through
        let remaining = pool.process_damage(100.0);

        assert!(approx(remaining, 90.0));
        assert_eq!(pool.try_get_process(code).unwrap().amount, 0.0);
    }

    #[test]
    fn test_layers_absorb_in_efficacy_order() {
        let mut pool = ShieldPool::default();
        let weak = pool.add_process(20.0, 100.0, 0.0, 0.5, 0.0, false);
        let strong = pool.add_process(10.0, 100.0, 0.0, 1.0, 0.0, false);

        let order: Vec<KillCode> = pool.processes().map(|p| p.kill_code).collect();
        assert_eq!(order, vec![strong, weak]);

        // strong breaks (10 taken, 20 left), weak absorbs 20 * 0.5 = 10
        let remaining = pool.process_damage(30.0);
        assert!(approx(remaining, 10.0));
        assert_eq!(pool.try_get_process(strong).unwrap().amount, 0.0);
        assert!(approx(pool.try_get_process(weak).unwrap().amount, 10.0));
    }

    #[test]
    fn test_equal_efficacy_keeps_insertion_order() {
        let mut pool = ShieldPool::default();
        let first = pool.add_process(5.0, 50.0, 0.0, 0.7, 0.0, false);
        let second = pool.add_process(5.0, 50.0, 0.0, 0.7, 0.0, false);
        let order: Vec<KillCode> = pool.processes().map(|p| p.kill_code).collect();
        assert_eq!(order, vec![first, second]);
    }

    #[test]
    fn test_non_positive_damage_passes_through() {
        let (mut pool, code) = pool_with(50.0, 50.0, 0.7);
        assert_eq!(pool.process_damage(0.0), 0.0);
        assert_eq!(pool.process_damage(-5.0), -5.0);
        assert_eq!(pool.try_get_process(code).unwrap().amount, 50.0);
    }

    #[test]
    fn test_add_capped_by_own_limit_on_empty_pool() {
        let (pool, code) = pool_with(60.0, 50.0, 0.7);
        assert_eq!(pool.try_get_process(code).unwrap().amount, 50.0);
    }

    #[test]
    fn test_add_with_room_grants_full_amount() {
        let (mut pool, _) = pool_with(40.0, 50.0, 0.7);
        // local amount 40, local limit 50 + 50 = 100, overflow -30
        let code = pool.add_process(30.0, 50.0, 0.0, 0.7, 0.0, false);
        assert_eq!(pool.try_get_process(code).unwrap().amount, 30.0);
    }

    #[test]
    fn test_add_over_combined_cap_is_reduced() {
        let (mut pool, _) = pool_with(50.0, 50.0, 0.7);
        // local limit uses min(20, 50) for the existing process: 20 + 20 = 40
        // overflow = 50 + 20 - 40 = 30, so nothing is granted
        let code = pool.add_process(20.0, 20.0, 0.0, 0.7, 0.0, false);
        assert_eq!(pool.try_get_process(code).unwrap().amount, 0.0);
    }

    #[test]
    fn test_sustain_delays_decay() {
        let mut pool = ShieldPool::default();
        let code = pool.add_process(50.0, 50.0, 10.0, 0.7, 2.0, false);

        pool.update(0.5);
        let process = pool.try_get_process(code).unwrap();
        assert_eq!(process.amount, 50.0);
        assert!(approx(process.sustain_remaining, 1.5));

        pool.update(1.5);
        pool.update(1.0);
        assert!(approx(pool.try_get_process(code).unwrap().amount, 40.0));
    }

    #[test]
    fn test_extend_sustain_in_place() {
        let mut pool = ShieldPool::default();
        let code = pool.add_process(30.0, 50.0, 10.0, 0.7, 0.0, false);

        pool.try_get_process_mut(code).unwrap().sustain_remaining = 2.0;
        pool.update(1.0);

        let process = pool.try_get_process(code).unwrap();
        assert_eq!(process.amount, 30.0);
        assert!(approx(process.sustain_remaining, 1.0));
        assert!(pool.try_get_process_mut(code + 1).is_none());
    }

    #[test]
    fn test_nan_damage_passes_through_untouched() {
        let mut pool = ShieldPool::default();
        let code = pool.add_process(30.0, 50.0, 0.0, 0.7, 0.0, false);
        assert!(pool.process_damage(f64::NAN).is_nan());
        assert_eq!(pool.try_get_process(code).unwrap().amount, 30.0);
    }

    #[test]
    fn test_decay_removes_empty_non_persistent() {
        let mut pool = ShieldPool::default();
        let code = pool.add_process(5.0, 50.0, 10.0, 0.7, 0.0, false);
        pool.update(1.0);
        assert!(pool.try_get_process(code).is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_persistent_survives_empty() {
        let mut pool = ShieldPool::default();
        let code = pool.add_process(5.0, 50.0, 10.0, 0.7, 0.0, true);
        pool.update(1.0);
        assert_eq!(pool.try_get_process(code).unwrap().amount, 0.0);
    }

    #[test]
    fn test_negative_decay_regenerates_to_limit() {
        let mut pool = ShieldPool::default();
        let code = pool.add_process(10.0, 30.0, -15.0, 0.7, 0.0, true);
        pool.update(1.0);
        assert_eq!(pool.try_get_process(code).unwrap().amount, 25.0);
        pool.update(1.0);
        assert_eq!(pool.try_get_process(code).unwrap().amount, 30.0);
    }

    #[test]
    fn test_update_reports_total_before_removal() {
        let mut pool = ShieldPool::default();
        pool.add_process(5.0, 50.0, 10.0, 0.7, 0.0, false);
        pool.add_process(20.0, 50.0, 0.0, 0.5, 0.0, false);
        pool.update(1.0);
        assert_eq!(pool.processes().count(), 1);
        assert!(approx(pool.current(), 25.0));
    }

    #[test]
    fn test_max_is_high_water_mark() {
        let mut pool = ShieldPool::default();
        let code = pool.add_process(40.0, 50.0, 0.0, 1.0, 0.0, false);
        pool.process_damage(30.0);
        assert!(approx(pool.current(), 10.0));
        assert!(approx(pool.max_value(), 40.0));

        pool.kill_process(code);
        pool.add_process(20.0, 50.0, 0.0, 1.0, 0.0, false);
        assert!(approx(pool.max_value(), 40.0));
    }

    #[test]
    fn test_kill_process() {
        let (mut pool, code) = pool_with(50.0, 50.0, 0.7);
        assert!(pool.kill_process(code));
        assert!(!pool.kill_process(code));
        assert_eq!(pool.current(), 0.0);
    }

    #[test]
    fn test_kill_codes_are_unique() {
        let mut pool = ShieldPool::default();
        let a = pool.add_default_process(10.0);
        pool.kill_process(a);
        let b = pool.add_default_process(10.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_default_process_uses_config() {
        let mut pool = ShieldPool::default();
        let code = pool.add_default_process(100.0);
        let process = pool.try_get_process(code).unwrap();
        assert_eq!(process.amount, 75.0);
        assert!(approx(process.efficacy, 0.7));
        assert!(approx(process.decay_rate, 1.2));
    }

    #[test]
    fn test_drain_keeps_processes() {
        let (mut pool, code) = pool_with(50.0, 50.0, 0.7);
        pool.drain();
        assert_eq!(pool.current(), 0.0);
        assert_eq!(pool.try_get_process(code).unwrap().amount, 0.0);
    }

    proptest! {
        #[test]
        fn prop_processes_sorted_by_efficacy(
            adds in prop::collection::vec((0.0..100.0f64, 0.0..100.0f64, 0.01..1.0f64), 1..20),
        ) {
            let mut pool = ShieldPool::default();
            for (amount, limit, efficacy) in adds {
                pool.add_process(amount, limit, 1.0, efficacy, 0.0, false);
            }
            let efficacies: Vec<f64> = pool.processes().map(|p| p.efficacy).collect();
            prop_assert!(efficacies.windows(2).all(|w| w[0] >= w[1]));
        }

        #[test]
        fn prop_amount_within_limit(
            adds in prop::collection::vec((0.0..200.0f64, 0.0..100.0f64, 0.01..1.0f64), 1..10),
            hits in prop::collection::vec(0.0..80.0f64, 0..10),
            dt in 0.0..2.0f64,
        ) {
            let mut pool = ShieldPool::default();
            for (amount, limit, efficacy) in adds {
                pool.add_process(amount, limit, 5.0, efficacy, 0.0, true);
            }
            for damage in hits {
                let remaining = pool.process_damage(damage);
                prop_assert!(remaining >= 0.0 && remaining <= damage + 1e-9);
                pool.update(dt);
            }
            for process in pool.processes() {
                prop_assert!(process.amount >= 0.0);
                prop_assert!(process.amount <= process.limit);
            }
        }
    }

    #[test]
    fn test_single_layer_conservation() {
        for (amount, efficacy, damage) in [(50.0, 0.7, 40.0), (50.0, 0.7, 100.0), (10.0, 1.0, 10.0)] {
            let (mut pool, code) = pool_with(amount, amount, efficacy);
            let remaining = pool.process_damage(damage);
            let left = pool.try_get_process(code).unwrap().amount;
            if damage * efficacy < amount {
                assert!(approx(remaining, damage * (1.0 - efficacy)));
                assert!(approx(left, amount - damage * efficacy));
            } else {
                assert!(approx(remaining, damage - amount));
                assert_eq!(left, 0.0);
            }
        }
    }
}
