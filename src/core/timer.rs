//! Core domain: countdown primitive shared by cooldowns, phases and lifetimes.

/// A monotonic countdown in seconds.
///
/// The countdown is "ready" once the remaining time reaches zero. The raw value
/// may dip below zero on the tick that expires it; [`Countdown::remaining`]
/// never reports that, while [`Countdown::overshoot`] exposes it so callers can
/// carry leftover time into the next phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// A countdown that is already ready.
    pub const fn ready() -> Self {
        Self { remaining: 0.0 }
    }

    pub fn armed(duration: f32) -> Self {
        let mut countdown = Self::ready();
        countdown.arm(duration);
        countdown
    }

    /// Restart the countdown with `duration` seconds, discarding what was left.
    pub fn arm(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Keep whichever is longer: the time left or `duration`.
    pub fn extend_to(&mut self, duration: f32) {
        self.remaining = self.remaining.max(duration.max(0.0));
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Advance by `dt` seconds. Returns true only on the tick that expires it.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.is_ready() {
            return false;
        }
        self.remaining -= dt.max(0.0);
        self.is_ready()
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    /// How far past zero the last tick went.
    pub fn overshoot(&self) -> f32 {
        (-self.remaining).max(0.0)
    }
}
