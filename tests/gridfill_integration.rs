//! Grid fill integration tests: slicing under budget pressure and the
//! load-phase system.

use std::collections::HashSet;
use std::sync::Arc;

use bevy_ecs::prelude::*;

use tickslice::resources::gameconfig::GameConfig;
use tickslice::resources::gamestate::{GameStates, NextGameState, NextGameStates};
use tickslice::resources::gridfill::{CellProducer, GridFillEngine};
use tickslice::resources::workbudget::{FillClock, ManualClock};
use tickslice::systems::gridfill::grid_fill_system;

const WIDTH: u32 = 5;
const HEIGHT: u32 = 4;

fn engine() -> GridFillEngine<(String, u32, u32)> {
    GridFillEngine::new(WIDTH, HEIGHT)
        .with_category("floor")
        .with_category("stuff")
}

/// Fill to completion with `budget_ms` per call, each produced cell costing
/// one millisecond of clock time. Returns the visit order and per-call counts.
fn fill_sliced(
    engine: &mut GridFillEngine<(String, u32, u32)>,
    budget_ms: f64,
) -> (Vec<(String, u32, u32)>, Vec<u64>) {
    let clock = ManualClock::new();
    let mut visits = Vec::new();
    let mut slices = Vec::new();
    let mut last_fraction = 0.0_f32;
    let mut last_per_category = [0.0_f32; 2];

    while !engine.is_ready() {
        let mut producer = |category: &str, x: u32, y: u32| {
            clock.advance_ms(1);
            visits.push((category.to_string(), x, y));
            Some((category.to_string(), x, y))
        };
        let outcome = engine.fill(budget_ms, &clock, &mut producer);
        slices.push(outcome.cells_visited);

        let fraction = engine.overall_fraction();
        assert!(fraction >= last_fraction, "fraction went backwards");
        last_fraction = fraction;

        for (last, category) in last_per_category.iter_mut().zip(["floor", "stuff"]) {
            let Some(fraction) = engine.completion_fraction(category) else {
                panic!("unknown category {category}");
            };
            assert!(fraction >= *last, "{category} fraction went backwards");
            assert!(
                fraction < 1.0 || engine.state(category).is_some_and(|s| s.is_complete()),
                "{category} reported 1.0 before its last cell"
            );
            *last = fraction;
        }
        assert!(slices.len() <= 1_000, "fill never finished");
    }
    (visits, slices)
}

#[test]
fn every_budget_visits_each_cell_exactly_once_in_the_same_order() {
    let (reference, _) = fill_sliced(&mut engine(), 1_000_000.0);
    assert_eq!(reference.len(), (2 * WIDTH * HEIGHT) as usize);
    let distinct: HashSet<&(String, u32, u32)> = reference.iter().collect();
    assert_eq!(distinct.len(), reference.len());
    for category in ["floor", "stuff"] {
        for x in 0..WIDTH {
            for y in 0..HEIGHT {
                assert!(distinct.contains(&(category.to_string(), x, y)));
            }
        }
    }

    for budget in [0.0, 1.0, 2.5, 7.0, 19.0] {
        let mut sliced = engine();
        let (visits, _) = fill_sliced(&mut sliced, budget);
        let distinct: HashSet<&(String, u32, u32)> = visits.iter().collect();
        assert_eq!(distinct.len(), 40, "cells repeated with budget {budget}");
        assert_eq!(visits, reference, "order differs with budget {budget}");
    }
}

#[test]
fn visit_order_is_row_major_from_the_top_row() {
    let (visits, _) = fill_sliced(&mut engine(), 1_000_000.0);
    let floor: Vec<(u32, u32)> = visits
        .iter()
        .filter(|(c, _, _)| c == "floor")
        .map(|(_, x, y)| (*x, *y))
        .collect();
    assert_eq!(&floor[..6], &[(0, 3), (1, 3), (2, 3), (3, 3), (4, 3), (0, 2)]);
    assert_eq!(floor.last(), Some(&(4, 0)));
    // Categories are filled one after the other.
    assert!(visits[..20].iter().all(|(c, _, _)| c == "floor"));
    assert!(visits[20..].iter().all(|(c, _, _)| c == "stuff"));
}

#[test]
fn slices_respect_the_budget() {
    let mut sliced = engine();
    let (_, slices) = fill_sliced(&mut sliced, 2.5);
    // 1ms per cell: the third cell pushes elapsed time past 2.5ms.
    assert!(slices.iter().all(|&n| n <= 3));
    assert_eq!(slices.iter().sum::<u64>(), 40);
    assert_eq!(slices.len(), 14);
}

#[test]
fn zero_budget_still_makes_progress() {
    let mut sliced = engine();
    let (_, slices) = fill_sliced(&mut sliced, 0.0);
    assert_eq!(slices.len(), 40);
    assert!(slices.iter().all(|&n| n == 1));
}

#[test]
fn finished_grid_is_identical_however_it_was_sliced() {
    let mut whole = engine();
    fill_sliced(&mut whole, 1_000_000.0);
    let mut sliced = engine();
    fill_sliced(&mut sliced, 1.0);

    for category in ["floor", "stuff"] {
        assert_eq!(whole.grid().layer(category), sliced.grid().layer(category));
        assert_eq!(sliced.grid().occupied(category).count(), 20);
    }
    assert_eq!(
        sliced.grid().get("stuff", 2, 1),
        Some(&("stuff".to_string(), 2, 1))
    );
}

#[test]
fn filling_a_ready_grid_does_nothing() {
    let mut engine = engine();
    fill_sliced(&mut engine, 3.0);
    assert!(engine.is_ready());

    let clock = ManualClock::new();
    let mut calls = 0;
    let mut producer = |_: &str, _: u32, _: u32| -> Option<(String, u32, u32)> {
        calls += 1;
        None
    };
    for _ in 0..3 {
        let outcome = engine.fill(5.0, &clock, &mut producer);
        assert_eq!(outcome.cells_visited, 0);
        assert!(outcome.ready);
    }
    assert_eq!(calls, 0);
    assert_eq!(engine.completion_fraction("floor"), Some(1.0));
    assert_eq!(engine.completion_fraction("water"), None);
}

// =============================================================================
// Load-phase system
// =============================================================================

#[derive(Resource, Default)]
struct CountingProducer {
    calls: u64,
}

impl CellProducer<u64> for CountingProducer {
    fn produce(&mut self, _category: &str, _x: u32, _y: u32) -> Option<u64> {
        self.calls += 1;
        Some(self.calls)
    }
}

fn load_world(budget_ms: f64, clock: Arc<ManualClock>) -> World {
    let mut world = World::new();
    let mut config = GameConfig::new();
    config.load_budget_ms = budget_ms;
    world.insert_resource(config);
    world.insert_resource(NextGameState::new());
    world.insert_resource(FillClock(Box::new(clock)));
    world.insert_resource(CountingProducer::default());
    world.insert_resource(GridFillEngine::<u64>::new(3, 2).with_category("floor"));
    world
}

fn fill_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(grid_fill_system::<u64, CountingProducer>);
    schedule
}

#[test]
fn system_fills_one_slice_per_tick_then_requests_play() {
    let mut world = load_world(0.0, Arc::new(ManualClock::new()));
    let mut schedule = fill_schedule();

    for tick in 1..=5 {
        schedule.run(&mut world);
        assert_eq!(world.resource::<CountingProducer>().calls, tick);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            &NextGameStates::Unchanged
        );
    }

    schedule.run(&mut world);
    assert!(world.resource::<GridFillEngine<u64>>().is_ready());
    assert_eq!(
        world.resource::<NextGameState>().get(),
        &NextGameStates::Pending(GameStates::Playing)
    );

    schedule.run(&mut world);
    assert_eq!(world.resource::<CountingProducer>().calls, 6);
}

#[test]
fn system_with_a_generous_budget_loads_in_one_tick() {
    let clock = Arc::new(ManualClock::new());
    let mut world = load_world(8.0, Arc::clone(&clock));
    let mut schedule = fill_schedule();

    schedule.run(&mut world);
    let engine = world.resource::<GridFillEngine<u64>>();
    assert!(engine.is_ready());
    assert_eq!(engine.grid().get("floor", 0, 1), Some(&1));
    assert_eq!(engine.grid().get("floor", 2, 0), Some(&6));
}
