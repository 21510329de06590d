//! ClampedStat - A bounded value with change notification
//!
//! Out-of-range writes are clamped, never rejected: this runs inside the
//! per-frame update path.

use std::fmt;

type ChangeListener = Box<dyn FnMut(f64, f64)>;

/// A numeric value kept within `[min, effective_max]`
///
/// `effective_max` is the custom max when one is set (positive), otherwise
/// the regular max.
pub struct ClampedStat {
    current: f64,
    min: f64,
    max: f64,
    /// Override for `max`; 0 means unset
    custom_max: f64,
    listeners: Vec<ChangeListener>,
}

impl ClampedStat {
    /// Create a stat with the given bounds, clamping `initial` into them
    pub fn new(min: f64, max: f64, initial: f64) -> Self {
        let mut stat = ClampedStat {
            current: min,
            min,
            max,
            custom_max: 0.0,
            listeners: Vec::new(),
        };
        stat.current = stat.clamp(initial);
        stat
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// The regular max, ignoring any custom override
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn custom_max(&self) -> f64 {
        self.custom_max
    }

    /// The ceiling actually used for clamping
    pub fn effective_max(&self) -> f64 {
        if self.custom_max > 0.0 {
            self.custom_max
        } else {
            self.max
        }
    }

    /// Position of `current` within the bounds, 0 when the bounds coincide
    pub fn normalized(&self) -> f64 {
        let range = self.effective_max() - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (self.current - self.min) / range
    }

    /// Register a callback receiving (previous, new) on every actual change
    pub fn on_changed(&mut self, listener: impl FnMut(f64, f64) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Write a new value, clamped into bounds
    ///
    /// NaN is ignored.
    pub fn set(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        let previous = self.current;
        let clamped = self.clamp(value);
        if clamped == previous {
            return;
        }
        self.current = clamped;
        for listener in &mut self.listeners {
            listener(previous, clamped);
        }
    }

    /// Add `|amount|`; restores never subtract
    pub fn restore(&mut self, amount: f64) {
        self.set(self.current + amount.abs());
    }

    /// Replace the regular max
    ///
    /// `current` is not re-clamped until the next write.
    pub fn set_max(&mut self, max: f64) {
        self.max = max;
    }

    /// Raise the custom max override
    ///
    /// While a positive custom max is set it only grows: smaller values are
    /// ignored. Use [`ClampedStat::clear_custom_max`] to lower it.
    pub fn set_custom_max(&mut self, value: f64) {
        if value <= 0.0 || value < self.custom_max {
            return;
        }
        self.custom_max = value;
    }

    /// Drop the custom max override, falling back to the regular max
    pub fn clear_custom_max(&mut self) {
        self.custom_max = 0.0;
    }

    fn clamp(&self, value: f64) -> f64 {
        // min wins if the ceiling dropped below it
        value.min(self.effective_max()).max(self.min)
    }
}

impl Default for ClampedStat {
    fn default() -> Self {
        ClampedStat::new(0.0, 0.0, 0.0)
    }
}

impl fmt::Debug for ClampedStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClampedStat")
            .field("current", &self.current)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("custom_max", &self.custom_max)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
