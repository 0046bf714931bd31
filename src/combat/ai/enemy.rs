//! Combat domain: enemy behavior state machine and its systems.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::attacks::{AttackSequencer, RequestOutcome};
use crate::combat::events::AttackStartedEvent;
use crate::combat::resources::{EnemyTuning, TuningError, non_negative, positive};
use crate::combat::systems::label;
use crate::core::Countdown;
use crate::movement::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BehaviorState {
    #[default]
    Idle,
    Chasing,
    Attacking,
    /// Knocked back; behavior resumes when the suspension runs out
    Suspended,
}

/// Validated ranges and speed for an enemy brain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorConfig {
    chase_range: f32,
    attack_range: f32,
    move_speed: f32,
}

impl BehaviorConfig {
    pub fn new(chase_range: f32, attack_range: f32, move_speed: f32) -> Result<Self, TuningError> {
        let attack_range = positive("attack_range", attack_range)?;
        if chase_range.is_nan() || chase_range <= attack_range {
            return Err(TuningError::RangesOutOfOrder {
                chase_range,
                attack_range,
            });
        }
        Ok(Self {
            chase_range,
            attack_range,
            move_speed: non_negative("move_speed", move_speed)?,
        })
    }

    pub fn chase_range(&self) -> f32 {
        self.chase_range
    }

    pub fn attack_range(&self) -> f32 {
        self.attack_range
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }
}

impl TryFrom<&EnemyTuning> for BehaviorConfig {
    type Error = TuningError;

    fn try_from(tuning: &EnemyTuning) -> Result<Self, Self::Error> {
        Self::new(tuning.chase_range, tuning.attack_range, tuning.move_speed)
    }
}

/// State derived from distance alone, ignoring where the brain came from.
pub fn fresh_state(distance: f32, config: &BehaviorConfig) -> BehaviorState {
    if distance <= config.attack_range {
        BehaviorState::Attacking
    } else if distance < config.chase_range {
        BehaviorState::Chasing
    } else {
        BehaviorState::Idle
    }
}

/// One transition step. At most one edge is taken per call.
pub fn next_state(state: BehaviorState, distance: f32, config: &BehaviorConfig) -> BehaviorState {
    match state {
        BehaviorState::Idle if distance < config.chase_range => BehaviorState::Chasing,
        BehaviorState::Chasing if distance <= config.attack_range => BehaviorState::Attacking,
        BehaviorState::Chasing if distance > config.chase_range => BehaviorState::Idle,
        BehaviorState::Attacking if distance > config.chase_range => BehaviorState::Idle,
        BehaviorState::Attacking if distance > config.attack_range => BehaviorState::Chasing,
        other => other,
    }
}

/// Commands produced by one [`EnemyBrain::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrainOutput {
    /// Velocity to drive the body with; `None` leaves physics alone
    pub velocity: Option<Vec2>,
    pub aim: Option<Vec2>,
    /// Advisory: the sequencer decides whether an attack actually starts
    pub request_attack: bool,
}

impl BrainOutput {
    fn stop() -> Self {
        Self {
            velocity: Some(Vec2::ZERO),
            ..default()
        }
    }
}

/// Chase/attack decision making for one enemy.
#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    config: BehaviorConfig,
    state: BehaviorState,
    suspension: Countdown,
    target: Option<Entity>,
    facing: Vec2,
    look: Vec2,
    disabled: bool,
}

impl EnemyBrain {
    pub fn new(config: BehaviorConfig) -> Self {
        Self {
            config,
            state: BehaviorState::Idle,
            suspension: Countdown::ready(),
            target: None,
            facing: Vec2::X,
            look: Vec2::X,
            disabled: false,
        }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    /// Last direction the brain aimed in. Only chasing and attacking aim.
    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    /// Last known direction to the target, in any state. Sprites face it.
    pub fn look(&self) -> Vec2 {
        self.look
    }

    pub fn is_suspended(&self) -> bool {
        self.state == BehaviorState::Suspended
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn link_target(&mut self, target: Entity) {
        self.target = Some(target);
    }

    /// Give up for good: Idle, no target. Returns true only the first time.
    pub fn disable(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.disabled = true;
        self.target = None;
        self.state = BehaviorState::Idle;
        self.suspension.clear();
        true
    }

    /// Suspend behavior for `duration` seconds, keeping any longer suspension.
    pub fn suspend(&mut self, duration: f32) {
        if self.disabled {
            return;
        }
        self.suspension.extend_to(duration);
        self.state = BehaviorState::Suspended;
    }

    fn face(&mut self, aim: Option<Vec2>) {
        if let Some(aim) = aim {
            self.facing = aim;
        }
    }

    pub fn suspension_remaining(&self) -> f32 {
        self.suspension.remaining()
    }

    /// Advance by `dt` seconds given both positions.
    ///
    /// `attack_in_progress` holds the brain in `Attacking` until the
    /// sequencer reports it is ready again.
    pub fn tick(&mut self, dt: f32, own: Vec2, target: Vec2, attack_in_progress: bool) -> BrainOutput {
        if self.disabled {
            return BrainOutput::stop();
        }

        let to_target = target - own;
        let distance = to_target.length();

        if self.state == BehaviorState::Suspended {
            self.suspension.tick(dt);
            if !self.suspension.is_ready() {
                return BrainOutput::default();
            }
            if attack_in_progress {
                self.state = BehaviorState::Attacking;
                return BrainOutput::stop();
            }
            self.state = fresh_state(distance, &self.config);
        } else if attack_in_progress {
            self.state = BehaviorState::Attacking;
            return BrainOutput::stop();
        } else {
            self.state = next_state(self.state, distance, &self.config);
        }

        let dir = to_target.normalize_or_zero();
        let aim = (dir != Vec2::ZERO).then_some(dir);
        if let Some(aim) = aim {
            self.look = aim;
        }

        match self.state {
            BehaviorState::Idle | BehaviorState::Suspended => BrainOutput::stop(),
            BehaviorState::Chasing => {
                self.face(aim);
                BrainOutput {
                    velocity: Some(dir * self.config.move_speed),
                    aim,
                    request_attack: false,
                }
            }
            BehaviorState::Attacking => {
                self.face(aim);
                BrainOutput {
                    velocity: Some(Vec2::ZERO),
                    aim,
                    request_attack: true,
                }
            }
        }
    }
}

/// Velocity the brain wants, applied on the physics step.
#[derive(Component, Debug, Default)]
pub struct MoveIntent(pub Option<Vec2>);

/// Child entity rotated toward the brain's aim direction.
#[derive(Component, Debug)]
pub struct AimPivot;

pub(crate) fn link_enemy_targets(
    players: Query<Entity, With<Player>>,
    mut brains: Query<(Entity, &mut EnemyBrain, Option<&Name>), Added<EnemyBrain>>,
) {
    let player = players.iter().next();

    for (entity, mut brain, name) in &mut brains {
        match player {
            Some(player) => brain.link_target(player),
            None => {
                if brain.disable() {
                    warn!("{} found no player to target; behavior disabled", label(name, entity));
                }
            }
        }
    }
}

pub(crate) fn update_enemy_ai(
    time: Res<Time>,
    mut started_events: MessageWriter<AttackStartedEvent>,
    targets: Query<&Transform, Without<EnemyBrain>>,
    mut enemies: Query<(
        Entity,
        &Transform,
        &mut EnemyBrain,
        &mut AttackSequencer,
        &mut MoveIntent,
        Option<&Name>,
    )>,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut brain, mut sequencer, mut intent, name) in &mut enemies {
        if brain.is_disabled() {
            intent.0 = Some(Vec2::ZERO);
            continue;
        }

        let target_pos = brain
            .target()
            .and_then(|target| targets.get(target).ok())
            .map(|t| t.translation.truncate());

        let Some(target_pos) = target_pos else {
            if brain.disable() {
                warn!("{} lost its target; behavior disabled", label(name, entity));
            }
            intent.0 = Some(Vec2::ZERO);
            continue;
        };

        let own_pos = transform.translation.truncate();
        let output = brain.tick(dt, own_pos, target_pos, sequencer.is_busy());
        intent.0 = output.velocity;

        if !output.request_attack {
            continue;
        }

        match sequencer.request(own_pos, target_pos) {
            RequestOutcome::Accepted => {
                debug!("{} begins an attack", label(name, entity));
                started_events.write(AttackStartedEvent {
                    attacker: entity,
                    attack_point: sequencer.attack_point(own_pos),
                    direction: sequencer.aim(),
                });
            }
            RequestOutcome::Busy | RequestOutcome::OnCooldown => {}
        }
    }
}

pub(crate) fn orient_aim_pivots(
    brains: Query<&EnemyBrain>,
    mut pivots: Query<(&ChildOf, &mut Transform), With<AimPivot>>,
) {
    for (child_of, mut transform) in &mut pivots {
        if let Ok(brain) = brains.get(child_of.parent()) {
            transform.rotation = Quat::from_rotation_z(brain.facing().to_angle());
        }
    }
}

/// Drive enemy bodies from their move intent. Suspended bodies coast.
pub(crate) fn apply_enemy_movement(
    mut enemies: Query<(&EnemyBrain, &MoveIntent, &mut LinearVelocity)>,
) {
    for (brain, intent, mut velocity) in &mut enemies {
        if brain.is_suspended() {
            continue;
        }
        if let Some(v) = intent.0 {
            velocity.0 = v;
        }
    }
}
