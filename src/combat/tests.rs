//! Combat domain: tests for health, knockback, attack sequencing, hit resolution and projectiles.

use std::time::Duration;

use avian2d::prelude::{CollisionStart, LinearVelocity};
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use super::ai::{BehaviorConfig, BehaviorState, EnemyBrain};
use super::projectile::{orientation, resolve_projectile_contacts};
use super::systems::{
    apply_damage, apply_knockback, detect_hit_volume_contacts, process_deaths,
    tick_attack_sequencers,
};
use super::{
    AttackFinishedEvent, AttackPhase, AttackSequencer, Combatant, ContactOutcome, DamageEvent,
    DamageOutcome, DeathEvent, Health, HitVolume, KnockbackEvent, KnockbackPolicy,
    KnockbackReceiver, KnockbackTuning, MeleeProfile, MeleeStrikeEvent, MeleeTuning, Projectile,
    ProjectileContact, ProjectilePhase, RequestOutcome, Team, TuningError, knockback_direction,
};

fn profile() -> MeleeProfile {
    MeleeProfile::new(&MeleeTuning::default()).unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn entities<const N: usize>() -> [Entity; N] {
    let mut world = World::new();
    std::array::from_fn(|_| world.spawn_empty().id())
}

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_health_single_lethal_hit() {
    let mut health = Health::new(3);
    assert_eq!(health.take_damage(3), DamageOutcome::Killed { applied: 3 });
    assert!(health.is_dead());
    assert_eq!(health.current(), 0);
}

#[test]
fn test_health_dies_exactly_once_after_third_hit() {
    let mut health = Health::new(3);
    assert_eq!(health.take_damage(1), DamageOutcome::Wounded { applied: 1 });
    assert_eq!(health.take_damage(1), DamageOutcome::Wounded { applied: 1 });
    assert_eq!(health.take_damage(1), DamageOutcome::Killed { applied: 1 });
    assert_eq!(health.take_damage(1), DamageOutcome::Ignored);
    assert_eq!(health.take_damage(10), DamageOutcome::Ignored);
    assert_eq!(health.current(), 0);
}

#[test]
fn test_health_clamps_overkill_and_zero_max() {
    let mut health = Health::new(2);
    assert_eq!(health.take_damage(5), DamageOutcome::Killed { applied: 2 });

    let health = Health::new(0);
    assert_eq!(health.max(), 1);
    assert_eq!(health.current(), 1);
    assert!(!health.is_dead());
}

#[test]
fn test_health_zero_damage_wounds_nothing() {
    let mut health = Health::new(3);
    assert_eq!(health.take_damage(0), DamageOutcome::Wounded { applied: 0 });
    assert_eq!(health.current(), 3);
    assert!(!health.is_dead());
}

// -----------------------------------------------------------------------------
// Knockback tests
// -----------------------------------------------------------------------------

#[test]
fn test_knockback_replaces_velocity() {
    let receiver = KnockbackReceiver::new(0.25);
    let mut velocity = Vec2::new(3.0, 4.0);

    let duration = receiver.apply(&mut velocity, Vec2::new(0.0, -2.0), 10.0);

    assert_eq!(velocity, Vec2::new(0.0, -10.0));
    assert!(approx(duration, 0.25));
}

#[test]
fn test_knockback_suspension_ignores_force() {
    let receiver = KnockbackReceiver::new(0.4);
    let mut velocity = Vec2::ZERO;
    assert!(approx(receiver.apply(&mut velocity, Vec2::X, 1.0), 0.4));
    assert!(approx(receiver.apply(&mut velocity, Vec2::X, 50.0), 0.4));
    assert!(approx(velocity.length(), 50.0));
}

// -----------------------------------------------------------------------------
// MeleeProfile tests
// -----------------------------------------------------------------------------

#[test]
fn test_profile_rejects_wind_up_past_duration() {
    let tuning = MeleeTuning {
        wind_up: 0.8,
        duration: 0.6,
        ..default()
    };
    assert_eq!(
        MeleeProfile::new(&tuning),
        Err(TuningError::WindUpTooLong {
            wind_up: 0.8,
            duration: 0.6,
        })
    );
}

#[test]
fn test_profile_rejects_negative_cooldown_and_flat_radius() {
    let negative = MeleeTuning {
        cooldown: -1.0,
        ..default()
    };
    assert!(matches!(
        MeleeProfile::new(&negative),
        Err(TuningError::Negative { field: "cooldown", .. })
    ));

    let flat = MeleeTuning {
        radius: 0.0,
        ..default()
    };
    assert!(matches!(
        MeleeProfile::try_from(&flat),
        Err(TuningError::NotPositive { field: "radius", .. })
    ));
}

// -----------------------------------------------------------------------------
// AttackSequencer tests
// -----------------------------------------------------------------------------

#[test]
fn test_sequencer_full_cycle() {
    let mut sequencer = AttackSequencer::new(profile());

    assert_eq!(
        sequencer.request(Vec2::ZERO, Vec2::new(0.0, 2.0)),
        RequestOutcome::Accepted
    );
    assert_eq!(sequencer.phase(), AttackPhase::WindingUp);
    assert_eq!(sequencer.aim(), Vec2::Y);
    assert_eq!(
        sequencer.request(Vec2::ZERO, Vec2::X),
        RequestOutcome::Busy
    );

    let step = sequencer.tick(0.2);
    assert!(!step.struck && !step.finished);

    let step = sequencer.tick(0.15);
    assert!(step.struck);
    assert!(!step.finished);
    assert_eq!(sequencer.phase(), AttackPhase::Recovering);

    let step = sequencer.tick(0.3);
    assert!(!step.struck);
    assert!(step.finished);
    assert_eq!(sequencer.phase(), AttackPhase::Ready);

    // 0.65 s into a 2 s cooldown
    assert_eq!(
        sequencer.request(Vec2::ZERO, Vec2::X),
        RequestOutcome::OnCooldown
    );
    sequencer.tick(1.4);
    assert_eq!(
        sequencer.request(Vec2::ZERO, Vec2::X),
        RequestOutcome::Accepted
    );
}

#[test]
fn test_sequencer_strikes_once_per_attack() {
    let mut sequencer = AttackSequencer::new(profile());
    sequencer.request(Vec2::ZERO, Vec2::X);

    let strikes = (0..100)
        .map(|_| sequencer.tick(0.05))
        .filter(|step| step.struck)
        .count();
    assert_eq!(strikes, 1);
}

#[test]
fn test_sequencer_carries_leftover_into_recovery() {
    let mut sequencer = AttackSequencer::new(profile());
    sequencer.request(Vec2::ZERO, Vec2::X);

    let step = sequencer.tick(0.5);
    assert!(step.struck);
    assert!(!step.finished);

    let step = sequencer.tick(0.11);
    assert!(step.finished);
}

#[test]
fn test_sequencer_long_frame_strikes_and_finishes() {
    let mut sequencer = AttackSequencer::new(profile());
    sequencer.request(Vec2::ZERO, Vec2::X);

    let step = sequencer.tick(1.0);
    assert!(step.struck);
    assert!(step.finished);
    assert!(!sequencer.is_busy());
}

#[test]
fn test_sequencer_zero_wind_up_strikes_next_tick() {
    let tuning = MeleeTuning {
        wind_up: 0.0,
        duration: 0.2,
        ..default()
    };
    let mut sequencer = AttackSequencer::new(MeleeProfile::new(&tuning).unwrap());
    sequencer.request(Vec2::ZERO, Vec2::X);

    let step = sequencer.tick(0.0);
    assert!(step.struck);
    assert!(!step.finished);
    assert!(sequencer.tick(0.2).finished);
}

#[test]
fn test_sequencer_cancel_keeps_cooldown() {
    let mut sequencer = AttackSequencer::new(profile());
    sequencer.request(Vec2::ZERO, Vec2::X);
    sequencer.tick(0.1);

    assert!(sequencer.cancel());
    assert!(!sequencer.cancel());
    assert!(!sequencer.is_busy());

    let step = sequencer.tick(0.5);
    assert!(!step.struck);
    assert_eq!(
        sequencer.request(Vec2::ZERO, Vec2::X),
        RequestOutcome::OnCooldown
    );
}

#[test]
fn test_sequencer_keeps_aim_when_target_overlaps() {
    let mut sequencer = AttackSequencer::new(profile());
    sequencer.request(Vec2::ZERO, Vec2::ZERO);
    assert_eq!(sequencer.aim(), Vec2::X);
    assert_eq!(
        sequencer.attack_point(Vec2::new(1.0, 1.0)),
        Vec2::new(1.0 + profile().reach(), 1.0)
    );
}

// -----------------------------------------------------------------------------
// Resolver tests
// -----------------------------------------------------------------------------

#[test]
fn test_knockback_direction_policies() {
    let target = Vec2::new(2.0, 0.0);

    assert_eq!(
        knockback_direction(KnockbackPolicy::FromAttacker, Vec2::new(2.0, -3.0), None, Vec2::ZERO, target),
        Some(Vec2::Y)
    );
    assert_eq!(
        knockback_direction(
            KnockbackPolicy::FromAnchor,
            Vec2::new(5.0, 5.0),
            Some(Vec2::new(4.0, 0.0)),
            Vec2::ZERO,
            target
        ),
        Some(Vec2::NEG_X)
    );
    assert_eq!(
        knockback_direction(KnockbackPolicy::FromAnchor, Vec2::ZERO, None, Vec2::ZERO, target),
        None
    );
    assert_eq!(
        knockback_direction(KnockbackPolicy::AlongTravel, Vec2::ZERO, None, Vec2::new(0.0, -12.0), target),
        Some(Vec2::NEG_Y)
    );
}

#[test]
fn test_knockback_direction_falls_back_to_positive_x() {
    let p = Vec2::new(1.0, 1.0);
    assert_eq!(
        knockback_direction(KnockbackPolicy::FromAttacker, p, None, Vec2::ZERO, p),
        Some(Vec2::X)
    );
    assert_eq!(
        knockback_direction(KnockbackPolicy::AlongTravel, p, None, Vec2::ZERO, p),
        Some(Vec2::X)
    );
}

#[test]
fn test_hit_volume_hits_each_target_once() {
    let [owner, enemy, other] = entities();
    let mut volume = HitVolume::new(owner, Team::Player, 1, 15.0, KnockbackPolicy::FromAnchor);

    assert!(!volume.register_contact(owner, Team::Enemy));
    assert!(!volume.register_contact(other, Team::Player));
    assert!(volume.register_contact(enemy, Team::Enemy));
    assert!(!volume.register_contact(enemy, Team::Enemy));
    assert!(volume.register_contact(other, Team::Enemy));
    assert!(!volume.is_spent());
}

#[test]
fn test_single_use_hit_volume_spends_on_first_hit() {
    let [owner, first, second] = entities();
    let mut volume =
        HitVolume::new(owner, Team::Enemy, 1, 6.0, KnockbackPolicy::FromAttacker).single_use();

    assert!(volume.register_contact(first, Team::Player));
    assert!(volume.is_spent());
    assert!(!volume.register_contact(second, Team::Player));
}

// -----------------------------------------------------------------------------
// Projectile tests
// -----------------------------------------------------------------------------

fn knife(owner: Entity) -> Projectile {
    Projectile::new(owner, Team::Player, 1, 10.0, 3.0)
}

#[test]
fn test_projectile_spent_after_lifetime() {
    let [owner] = entities();
    let mut projectile = knife(owner);
    assert!(!projectile.tick(2.9, true));
    assert_eq!(projectile.phase(), ProjectilePhase::Flying);
    assert!(projectile.tick(0.2, true));
    assert!(projectile.is_spent());
    assert!(!projectile.tick(1.0, true));
}

#[test]
fn test_projectile_spent_when_out_of_view() {
    let [owner] = entities();
    let mut projectile = knife(owner);
    assert!(projectile.tick(0.01, false));
    assert!(projectile.is_spent());
}

#[test]
fn test_projectile_first_hostile_contact_only() {
    let [owner, a, b] = entities();
    let mut projectile = knife(owner);
    let first = ProjectileContact::Combatant {
        entity: a,
        team: Team::Enemy,
    };
    let second = ProjectileContact::Combatant {
        entity: b,
        team: Team::Enemy,
    };

    assert_eq!(projectile.register_contact(first), ContactOutcome::Hit);
    assert!(projectile.is_spent());
    assert_eq!(projectile.register_contact(second), ContactOutcome::Ignored);
    assert_eq!(
        projectile.register_contact(ProjectileContact::Wall),
        ContactOutcome::Ignored
    );
}

#[test]
fn test_projectile_ignores_owner_and_friends_but_stops_at_walls() {
    let [owner, ally] = entities();
    let mut projectile = knife(owner);
    let owner = ProjectileContact::Combatant {
        entity: projectile.owner(),
        team: Team::Player,
    };
    let friend = ProjectileContact::Combatant {
        entity: ally,
        team: Team::Player,
    };

    assert_eq!(projectile.register_contact(owner), ContactOutcome::Ignored);
    assert_eq!(projectile.register_contact(friend), ContactOutcome::Ignored);
    assert_eq!(
        projectile.register_contact(ProjectileContact::Other),
        ContactOutcome::Ignored
    );
    assert!(!projectile.is_spent());

    assert_eq!(
        projectile.register_contact(ProjectileContact::Wall),
        ContactOutcome::Blocked
    );
    assert!(projectile.is_spent());
}

#[test]
fn test_projectile_orientation_follows_velocity() {
    let rotation = orientation(Vec2::new(0.0, 5.0)).unwrap();
    let forward = rotation * Vec3::X;
    assert!(approx(forward.x, 0.0));
    assert!(approx(forward.y, 1.0));
    assert!(orientation(Vec2::ZERO).is_none());
}

// -----------------------------------------------------------------------------
// System tests
// -----------------------------------------------------------------------------

#[derive(Resource, Default)]
struct Counts {
    deaths: usize,
    strikes: usize,
    finished: usize,
    damage: Vec<Entity>,
    knockback: Vec<Entity>,
}

fn count_deaths(mut reader: MessageReader<DeathEvent>, mut counts: ResMut<Counts>) {
    counts.deaths += reader.read().count();
}

fn count_attack_steps(
    mut strikes: MessageReader<MeleeStrikeEvent>,
    mut finished: MessageReader<AttackFinishedEvent>,
    mut counts: ResMut<Counts>,
) {
    counts.strikes += strikes.read().count();
    counts.finished += finished.read().count();
}

fn record_hits(
    mut damage: MessageReader<DamageEvent>,
    mut knockback: MessageReader<KnockbackEvent>,
    mut counts: ResMut<Counts>,
) {
    counts.damage.extend(damage.read().map(|e| e.target));
    counts.knockback.extend(knockback.read().map(|e| e.target));
}

fn contact(collider1: Entity, collider2: Entity) -> CollisionStart {
    CollisionStart {
        collider1,
        collider2,
        body1: Some(collider1),
        body2: Some(collider2),
    }
}

fn base_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
        .init_resource::<Counts>()
        .add_message::<DamageEvent>()
        .add_message::<KnockbackEvent>()
        .add_message::<DeathEvent>()
        .add_message::<MeleeStrikeEvent>()
        .add_message::<AttackFinishedEvent>()
        .add_message::<CollisionStart>();
    app
}

#[test]
fn test_damage_messages_kill_and_despawn_once() {
    let mut app = base_app();
    app.add_systems(Update, (apply_damage, count_deaths, process_deaths).chain());

    let source = app.world_mut().spawn_empty().id();
    let target = app
        .world_mut()
        .spawn((Name::new("Grunt"), Health::new(3)))
        .id();

    for _ in 0..4 {
        app.world_mut().write_message(DamageEvent {
            source,
            target,
            amount: 1,
        });
    }
    app.update();

    assert_eq!(app.world().resource::<Counts>().deaths, 1);
    assert!(app.world().get_entity(target).is_err());
}

#[test]
fn test_attack_sequencer_system_strikes_once() {
    let mut app = base_app();
    app.add_systems(Update, (tick_attack_sequencers, count_attack_steps).chain());

    let mut sequencer = AttackSequencer::new(profile());
    sequencer.request(Vec2::ZERO, Vec2::X);
    app.world_mut()
        .spawn((Transform::default(), Team::Enemy, sequencer));

    // First update has no elapsed time; the rest cover 1 s
    for _ in 0..21 {
        app.update();
    }

    let counts = app.world().resource::<Counts>();
    assert_eq!(counts.strikes, 1);
    assert_eq!(counts.finished, 1);
}

#[test]
fn test_knockback_suspends_enemy_and_interrupts_attack() {
    let mut app = base_app();
    app.insert_resource(KnockbackTuning::default())
        .add_systems(Update, apply_knockback);

    let mut brain = EnemyBrain::new(BehaviorConfig::new(8.0, 1.5, 3.0).unwrap());
    brain.tick(0.016, Vec2::ZERO, Vec2::new(5.0, 0.0), false);
    let mut sequencer = AttackSequencer::new(profile());
    sequencer.request(Vec2::ZERO, Vec2::X);

    let source = app.world_mut().spawn_empty().id();
    let enemy = app
        .world_mut()
        .spawn((
            KnockbackReceiver::new(0.25),
            LinearVelocity(Vec2::new(3.0, 0.0)),
            brain,
            sequencer,
        ))
        .id();

    app.world_mut().write_message(KnockbackEvent {
        source,
        target: enemy,
        direction: Vec2::NEG_X,
        force: 10.0,
    });
    app.update();

    let world = app.world();
    assert_eq!(world.get::<LinearVelocity>(enemy).unwrap().0, Vec2::new(-10.0, 0.0));
    assert_eq!(
        world.get::<EnemyBrain>(enemy).unwrap().state(),
        BehaviorState::Suspended
    );
    assert!(!world.get::<AttackSequencer>(enemy).unwrap().is_busy());
}

#[test]
fn test_knife_hits_only_first_of_two_same_tick_contacts() {
    let mut app = base_app();
    app.add_systems(Update, (resolve_projectile_contacts, record_hits).chain());

    let owner = app.world_mut().spawn_empty().id();
    let knife = app
        .world_mut()
        .spawn((knife(owner), LinearVelocity(Vec2::new(12.0, 0.0))))
        .id();
    let first = app.world_mut().spawn((Combatant, Team::Enemy)).id();
    let second = app.world_mut().spawn((Combatant, Team::Enemy)).id();

    app.world_mut().write_message(contact(knife, first));
    app.world_mut().write_message(contact(second, knife));
    app.update();

    let counts = app.world().resource::<Counts>();
    assert_eq!(counts.damage, vec![first]);
    assert_eq!(counts.knockback, vec![first]);
    assert!(app.world().get::<Projectile>(knife).unwrap().is_spent());
}

#[test]
fn test_swing_without_owner_damages_once_and_skips_knockback() {
    let mut app = base_app();
    app.add_systems(Update, (detect_hit_volume_contacts, record_hits).chain());

    let owner = app.world_mut().spawn(Transform::default()).id();
    let swing = app
        .world_mut()
        .spawn((
            HitVolume::new(owner, Team::Player, 1, 15.0, KnockbackPolicy::FromAnchor),
            Transform::from_xyz(1.0, 0.0, 0.0),
        ))
        .id();
    let first = app
        .world_mut()
        .spawn((Combatant, Team::Enemy, Transform::from_xyz(1.5, 0.0, 0.0)))
        .id();
    let second = app
        .world_mut()
        .spawn((Combatant, Team::Enemy, Transform::from_xyz(1.0, 0.5, 0.0)))
        .id();
    app.world_mut().despawn(owner);

    app.world_mut().write_message(contact(swing, first));
    app.world_mut().write_message(contact(first, swing));
    app.world_mut().write_message(contact(second, swing));
    app.update();

    let counts = app.world().resource::<Counts>();
    assert_eq!(counts.damage, vec![first, second]);
    assert!(counts.knockback.is_empty());
}
