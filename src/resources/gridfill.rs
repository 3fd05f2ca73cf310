//! Incremental, budgeted grid population.
//!
//! Filling a large grid in one tick freezes the loop until it finishes. The
//! [`GridFillEngine`] instead visits cells a slice at a time: every call to
//! [`GridFillEngine::fill`] resumes from the cursor stored in each
//! category's [`GridFillState`], asks a [`CellProducer`] for the value of
//! each visited cell, and returns as soon as its [`WorkBudget`] expires.
//! Call it once per tick until [`GridFillEngine::is_ready`] turns true and
//! show [`GridFillEngine::completion_fraction`] in a loading bar meanwhile.
//!
//! # Visitation order
//!
//! Categories are filled one at a time, in the order they were added. Within
//! a category cells are visited row-major; the row index is inverted before
//! it reaches the producer so that cells produced later sit *higher* on the
//! grid (lower rows overlap upper ones when drawn):
//!
//! ```text
//! progress:  0      1      2      3          (2x2 grid)
//! cell:     (0,1)  (1,1)  (0,0)  (1,0)
//! ```
//!
//! The order never changes under budget pressure, so the finished grid is
//! identical however the work happened to be sliced.

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use serde::Serialize;

use crate::resources::workbudget::{BudgetClock, WorkBudget};

/// Source of cell values for a [`GridFillEngine`].
///
/// Returning `None` leaves the cell empty; the cell still counts as visited.
pub trait CellProducer<T> {
    fn produce(&mut self, category: &str, x: u32, y: u32) -> Option<T>;
}

impl<T, F> CellProducer<T> for F
where
    F: FnMut(&str, u32, u32) -> Option<T>,
{
    fn produce(&mut self, category: &str, x: u32, y: u32) -> Option<T> {
        self(category, x, y)
    }
}

/// Progress of one category through the grid.
///
/// Serializable for reporting; there is no restore path, so `progress` can
/// only be moved by the engine and never exceeds `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridFillState {
    pub category: String,
    pub logical_width: u32,
    pub logical_height: u32,
    progress: u64,
    target: u64,
}

impl GridFillState {
    fn new(category: String, logical_width: u32, logical_height: u32, produces: bool) -> Self {
        let target = if produces {
            logical_width as u64 * logical_height as u64
        } else {
            0
        };
        GridFillState {
            category,
            logical_width,
            logical_height,
            progress: 0,
            target,
        }
    }

    /// Number of cells visited so far.
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Number of cells this category has to visit.
    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }

    /// `progress / target`, with an empty category counting as done.
    pub fn fraction(&self) -> f32 {
        if self.target == 0 {
            1.0
        } else {
            (self.progress as f64 / self.target as f64) as f32
        }
    }

    /// Coordinates handed to the producer for the next unvisited cell.
    ///
    /// Returns `(x, y)` with `y` already inverted, or `None` when complete.
    pub fn next_cell(&self) -> Option<(u32, u32)> {
        if self.is_complete() {
            return None;
        }
        let width = self.logical_width as u64;
        let row = (self.progress / width) as u32;
        let col = (self.progress % width) as u32;
        Some((col, self.logical_height - 1 - row))
    }
}

/// Summary of a single [`GridFillEngine::fill`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillOutcome {
    /// Cells visited during this call.
    pub cells_visited: u64,
    /// Whether every category is complete after this call.
    pub ready: bool,
}

/// Backing storage: one layer of optional cells per category.
#[derive(Debug, Clone)]
pub struct LayeredGrid<T> {
    width: u32,
    height: u32,
    layers: Vec<(String, Vec<Option<T>>)>,
}

impl<T> LayeredGrid<T> {
    fn new(width: u32, height: u32) -> Self {
        LayeredGrid {
            width,
            height,
            layers: Vec::new(),
        }
    }

    fn add_layer(&mut self, name: String) {
        let cells = (self.width as usize) * (self.height as usize);
        let mut layer = Vec::with_capacity(cells);
        layer.resize_with(cells, || None);
        self.layers.push((name, layer));
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    fn install(&mut self, layer: usize, x: u32, y: u32, value: T) {
        if let Some(i) = self.index(x, y) {
            self.layers[layer].1[i] = Some(value);
        }
    }

    fn clear(&mut self) {
        for (_, cells) in self.layers.iter_mut() {
            cells.iter_mut().for_each(|c| *c = None);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Value stored at `(x, y)` in the named layer.
    pub fn get(&self, category: &str, x: u32, y: u32) -> Option<&T> {
        let i = self.index(x, y)?;
        self.layer(category)?.get(i)?.as_ref()
    }

    /// Raw row-major cells of a layer, `y * width + x`.
    pub fn layer(&self, category: &str) -> Option<&[Option<T>]> {
        self.layers
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, cells)| cells.as_slice())
    }

    /// Iterate the occupied cells of a layer as `(x, y, value)`.
    pub fn occupied<'a>(
        &'a self,
        category: &str,
    ) -> impl Iterator<Item = (u32, u32, &'a T)> + use<'a, T> {
        let width = self.width.max(1);
        self.layer(category)
            .into_iter()
            .flat_map(|cells| cells.iter().enumerate())
            .filter_map(move |(i, cell)| {
                cell.as_ref()
                    .map(|v| ((i as u32) % width, (i as u32) / width, v))
            })
    }
}

/// Resumable, budgeted filler for a [`LayeredGrid`].
#[derive(Resource, Debug)]
pub struct GridFillEngine<T: Send + Sync + 'static> {
    states: Vec<GridFillState>,
    grid: LayeredGrid<T>,
    ready: bool,
}

impl<T: Send + Sync + 'static> GridFillEngine<T> {
    /// Create an engine for a `width` x `height` grid with no categories.
    pub fn new(width: u32, height: u32) -> Self {
        GridFillEngine {
            states: Vec::new(),
            grid: LayeredGrid::new(width, height),
            ready: false,
        }
    }

    /// Add a category to be filled after the ones already added.
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.push_category(name.into(), true);
        self
    }

    /// Add a category that produces nothing and is complete from the start.
    pub fn with_empty_category(mut self, name: impl Into<String>) -> Self {
        self.push_category(name.into(), false);
        self
    }

    fn push_category(&mut self, name: String, produces: bool) {
        self.grid.add_layer(name.clone());
        self.states.push(GridFillState::new(
            name,
            self.grid.width,
            self.grid.height,
            produces,
        ));
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn states(&self) -> &[GridFillState] {
        &self.states
    }

    pub fn state(&self, category: &str) -> Option<&GridFillState> {
        self.states.iter().find(|s| s.category == category)
    }

    pub fn grid(&self) -> &LayeredGrid<T> {
        &self.grid
    }

    /// Fraction of `category` filled so far, 1.0 once the whole grid is ready.
    ///
    /// Returns `None` for a category the engine does not know.
    pub fn completion_fraction(&self, category: &str) -> Option<f32> {
        let state = self.state(category)?;
        Some(if self.ready { 1.0 } else { state.fraction() })
    }

    /// Fraction of all cells across all categories visited so far.
    pub fn overall_fraction(&self) -> f32 {
        if self.ready {
            return 1.0;
        }
        let target: u64 = self.states.iter().map(|s| s.target).sum();
        if target == 0 {
            return 1.0;
        }
        let progress: u64 = self.states.iter().map(|s| s.progress).sum();
        (progress as f64 / target as f64) as f32
    }

    /// Drop all progress and produced cells so the grid is filled again.
    pub fn reset(&mut self) {
        for state in self.states.iter_mut() {
            state.progress = 0;
        }
        self.grid.clear();
        self.ready = false;
    }

    /// Visit cells until `budget_ms` milliseconds of `clock` time have passed
    /// or every category is complete.
    ///
    /// Progress is counted before the budget is checked, so a cell is either
    /// fully produced and installed or not visited at all. Calling this after
    /// the grid is ready does nothing.
    pub fn fill<P>(&mut self, budget_ms: f64, clock: &dyn BudgetClock, producer: &mut P) -> FillOutcome
    where
        P: CellProducer<T> + ?Sized,
    {
        if self.ready {
            return FillOutcome {
                cells_visited: 0,
                ready: true,
            };
        }

        let budget = WorkBudget::start(clock);
        let mut visited = 0;

        for index in 0..self.states.len() {
            while let Some((x, y)) = self.states[index].next_cell() {
                if let Some(value) = producer.produce(&self.states[index].category, x, y) {
                    self.grid.install(index, x, y, value);
                }
                self.states[index].progress += 1;
                visited += 1;

                if budget.expired(budget_ms) {
                    let state = &self.states[index];
                    debug!(
                        "Grid fill slice over budget after {} cells: '{}' at {}/{} ({:.2}ms)",
                        visited,
                        state.category,
                        state.progress,
                        state.target,
                        budget.elapsed_ms()
                    );
                    if self.states.iter().all(GridFillState::is_complete) {
                        self.mark_ready();
                    }
                    return FillOutcome {
                        cells_visited: visited,
                        ready: self.ready,
                    };
                }
            }
        }

        self.mark_ready();
        FillOutcome {
            cells_visited: visited,
            ready: true,
        }
    }

    fn mark_ready(&mut self) {
        self.ready = true;
        info!(
            "Grid fill finished: {}x{} in {} categories",
            self.grid.width,
            self.grid.height,
            self.states.len()
        );
    }
}
