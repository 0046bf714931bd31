//! Combat domain: melee attack sequencing (wind-up, strike, recovery).

use bevy::prelude::*;

use crate::combat::resources::{MeleeTuning, TuningError, non_negative, positive};
use crate::core::Countdown;

/// Validated melee attack parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeProfile {
    damage: u32,
    wind_up: f32,
    duration: f32,
    cooldown: f32,
    radius: f32,
    reach: f32,
    knockback_force: f32,
}

impl MeleeProfile {
    pub fn new(tuning: &MeleeTuning) -> Result<Self, TuningError> {
        let wind_up = non_negative("wind_up", tuning.wind_up)?;
        let duration = non_negative("duration", tuning.duration)?;
        if duration < wind_up {
            return Err(TuningError::WindUpTooLong { wind_up, duration });
        }

        Ok(Self {
            damage: tuning.damage,
            wind_up,
            duration,
            cooldown: non_negative("cooldown", tuning.cooldown)?,
            radius: positive("radius", tuning.radius)?,
            reach: non_negative("reach", tuning.reach)?,
            knockback_force: non_negative("knockback_force", tuning.knockback_force)?,
        })
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn wind_up(&self) -> f32 {
        self.wind_up
    }

    pub fn recovery(&self) -> f32 {
        self.duration - self.wind_up
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn reach(&self) -> f32 {
        self.reach
    }

    pub fn knockback_force(&self) -> f32 {
        self.knockback_force
    }
}

impl TryFrom<&MeleeTuning> for MeleeProfile {
    type Error = TuningError;

    fn try_from(tuning: &MeleeTuning) -> Result<Self, Self::Error> {
        Self::new(tuning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackPhase {
    #[default]
    Ready,
    WindingUp,
    Recovering,
}

/// What happened to an attack request. Rejections are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Accepted,
    /// An attack is already winding up or recovering
    Busy,
    OnCooldown,
}

/// Phase boundaries crossed during one [`AttackSequencer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequencerStep {
    /// Wind-up finished: resolve the hit now
    pub struck: bool,
    /// Recovery finished: the owner may act again
    pub finished: bool,
}

/// Drives one melee attack at a time through wind-up and recovery.
#[derive(Component, Debug, Clone)]
pub struct AttackSequencer {
    profile: MeleeProfile,
    phase: AttackPhase,
    wind_up: Countdown,
    recovery: Countdown,
    cooldown: Countdown,
    aim: Vec2,
}

impl AttackSequencer {
    pub fn new(profile: MeleeProfile) -> Self {
        Self {
            profile,
            phase: AttackPhase::Ready,
            wind_up: Countdown::ready(),
            recovery: Countdown::ready(),
            cooldown: Countdown::ready(),
            aim: Vec2::X,
        }
    }

    pub fn profile(&self) -> &MeleeProfile {
        &self.profile
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != AttackPhase::Ready
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown.remaining()
    }

    /// Direction the current (or last) attack was aimed in, frozen at acceptance.
    pub fn aim(&self) -> Vec2 {
        self.aim
    }

    pub fn attack_point(&self, origin: Vec2) -> Vec2 {
        origin + self.aim * self.profile.reach
    }

    pub fn request(&mut self, origin: Vec2, target: Vec2) -> RequestOutcome {
        if self.is_busy() {
            return RequestOutcome::Busy;
        }
        if !self.cooldown.is_ready() {
            return RequestOutcome::OnCooldown;
        }

        let aim = (target - origin).normalize_or_zero();
        if aim != Vec2::ZERO {
            self.aim = aim;
        }
        self.phase = AttackPhase::WindingUp;
        self.wind_up.arm(self.profile.wind_up);
        self.cooldown.arm(self.profile.cooldown);
        RequestOutcome::Accepted
    }

    pub fn tick(&mut self, dt: f32) -> SequencerStep {
        let mut step = SequencerStep::default();
        self.cooldown.tick(dt);

        match self.phase {
            AttackPhase::Ready => {}
            AttackPhase::WindingUp => {
                let leftover = if self.wind_up.is_ready() {
                    dt
                } else if self.wind_up.tick(dt) {
                    self.wind_up.overshoot()
                } else {
                    return step;
                };
                step.struck = true;
                self.begin_recovery(leftover, &mut step);
            }
            AttackPhase::Recovering => {
                if self.recovery.tick(dt) {
                    self.phase = AttackPhase::Ready;
                    step.finished = true;
                }
            }
        }

        step
    }

    /// Abandon the attack in flight without striking. The cooldown stays armed.
    pub fn cancel(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }
        self.phase = AttackPhase::Ready;
        self.wind_up.clear();
        self.recovery.clear();
        true
    }

    fn begin_recovery(&mut self, leftover: f32, step: &mut SequencerStep) {
        self.phase = AttackPhase::Recovering;
        self.recovery.arm(self.profile.recovery());
        if self.recovery.is_ready() || self.recovery.tick(leftover) {
            self.phase = AttackPhase::Ready;
            step.finished = true;
        }
    }
}
