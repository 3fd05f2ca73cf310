//! Animation runner integration tests: sequences advanced by the ECS system,
//! sprites following them and completion events.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use tickslice::components::action::{Action, ActionTarget, Easing};
use tickslice::components::actionsequence::{
    ActionSequence, RepeatPolicy, SequenceError, SequenceState,
};
use tickslice::components::animation::{Animatable, AnimationRegistry};
use tickslice::components::sprite::Sprite;
use tickslice::events::sequence::SequenceFinishedEvent;
use tickslice::systems::animation::animation_sequence_system;

#[derive(Resource, Default)]
struct FinishedLog(Vec<(Entity, String)>);

fn make_world() -> World {
    let mut world = World::new();
    world.init_resource::<FinishedLog>();
    world.add_observer(
        |trigger: On<SequenceFinishedEvent>, mut log: ResMut<FinishedLog>| {
            let event = trigger.event();
            log.0.push((event.entity, event.sequence.clone()));
        },
    );
    world.flush();
    world
}

fn tick(world: &mut World, schedule: &mut Schedule) {
    schedule.run(world);
    world.clear_trackers();
}

fn runner() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(animation_sequence_system);
    schedule
}

fn hit_registry() -> AnimationRegistry {
    let mut registry = AnimationRegistry::new();
    registry
        .new_basic_animation("hit", &[("hit_1", 2), ("hit_2", 1)], RepeatPolicy::Count(2))
        .unwrap();
    registry
        .new_basic_animation("fly", &[("dragon_1", 4), ("dragon_2", 4)], RepeatPolicy::Forever)
        .unwrap();
    registry
}

#[test]
fn counted_sequence_finishes_once_after_all_repeats() {
    let mut world = make_world();
    let mut registry = hit_registry();
    registry.run_animation_sequence("hit").unwrap();
    let entity = world.spawn((registry, Sprite::default())).id();
    let mut schedule = runner();

    for _ in 0..5 {
        tick(&mut world, &mut schedule);
    }
    assert!(world.resource::<FinishedLog>().0.is_empty());

    tick(&mut world, &mut schedule);
    assert_eq!(
        world.resource::<FinishedLog>().0,
        vec![(entity, "hit".to_string())]
    );

    for _ in 0..20 {
        tick(&mut world, &mut schedule);
    }
    assert_eq!(world.resource::<FinishedLog>().0.len(), 1);

    let registry = world.get::<AnimationRegistry>(entity).unwrap();
    assert_eq!(registry.get("hit").unwrap().state(), SequenceState::Exhausted);
}

#[test]
fn sprite_follows_the_displayed_sequence() {
    let mut world = make_world();
    let mut registry = hit_registry();
    registry.run_animation_sequence("fly").unwrap();
    let entity = world.spawn((registry, Sprite::default())).id();
    let mut schedule = runner();

    let mut shown = Vec::new();
    for _ in 0..9 {
        tick(&mut world, &mut schedule);
        let sprite = world.get::<Sprite>(entity).unwrap();
        shown.push(sprite.path().unwrap().to_string());
    }

    let one = "sprites/dragon_1.png".to_string();
    let two = "sprites/dragon_2.png".to_string();
    assert_eq!(
        shown,
        vec![
            one.clone(),
            one.clone(),
            one.clone(),
            two.clone(),
            two.clone(),
            two.clone(),
            two,
            one.clone(),
            one
        ]
    );
    assert!(world.resource::<FinishedLog>().0.is_empty());
}

#[test]
fn starting_another_sequence_switches_the_sprite() {
    let mut world = make_world();
    let mut registry = hit_registry();
    registry.run_animation_sequence("fly").unwrap();
    let entity = world.spawn((registry, Sprite::default())).id();
    let mut schedule = runner();

    tick(&mut world, &mut schedule);
    world
        .get_mut::<AnimationRegistry>(entity)
        .unwrap()
        .run_animation_sequence("hit")
        .unwrap();
    tick(&mut world, &mut schedule);

    let sprite = world.get::<Sprite>(entity).unwrap();
    assert_eq!(sprite.path(), Some("sprites/hit_1.png"));
}

#[test]
fn idle_registry_leaves_sprite_alone() {
    let mut world = make_world();
    let resting = Sprite::new(ActionTarget::path("sprites/rest.png"));
    let entity = world.spawn((hit_registry(), resting.clone())).id();
    let mut schedule = runner();

    for _ in 0..4 {
        tick(&mut world, &mut schedule);
    }
    assert_eq!(world.get::<Sprite>(entity), Some(&resting));
}

#[test]
fn unknown_sequence_is_rejected_without_side_effects() {
    let mut registry = hit_registry();
    registry.run_animation_sequence("fly").unwrap();

    let err = registry.run_animation_sequence("swim").unwrap_err();
    assert_eq!(err, SequenceError::UnknownSequence("swim".to_string()));
    assert_eq!(registry.displayed(), Some("fly"));
    assert!(registry.get("fly").unwrap().is_active());
    assert!(!registry.get("hit").unwrap().is_active());
}

#[test]
fn completion_callback_and_event_fire_together() {
    let mut world = make_world();
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = Arc::clone(&calls);

    let sequence = ActionSequence::new(
        vec![
            Action::new(ActionTarget::Scalar(0.0), 2).unwrap(),
            Action::new(ActionTarget::Scalar(10.0), 2)
                .unwrap()
                .with_easing(Easing::Linear),
        ],
        RepeatPolicy::Once,
    )
    .unwrap()
    .on_complete(move || {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    let mut registry = AnimationRegistry::new();
    registry.register_animation_sequence("fade", sequence);
    registry.run_animation_sequence("fade").unwrap();
    let entity = world.spawn((registry, Sprite::default())).id();
    let mut schedule = runner();

    for _ in 0..3 {
        tick(&mut world, &mut schedule);
    }
    // Halfway through the eased action.
    assert_eq!(
        world.get::<Sprite>(entity).unwrap().current,
        Some(ActionTarget::Scalar(5.0))
    );

    for _ in 0..5 {
        tick(&mut world, &mut schedule);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        world.resource::<FinishedLog>().0,
        vec![(entity, "fade".to_string())]
    );
}
