//! HP meter with clamped drain and restore.

/// Current and maximum HP.
///
/// Invariant: `current <= maximum`. `current == 0` means defeated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpMeter {
    current: u32,
    maximum: u32,
}

impl HpMeter {
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Builds a meter, clamping `current` into `[0, maximum]`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Current HP as a fraction of max, `0.0` for an empty maximum.
    pub fn ratio(&self) -> f64 {
        if self.maximum == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.maximum)
    }

    /// Removes up to `amount` HP and returns how much was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.current);
        self.current -= applied;
        applied
    }

    /// Adds up to `amount` HP without exceeding max; returns the amount applied.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.maximum - self.current);
        self.current += applied;
        applied
    }
}
