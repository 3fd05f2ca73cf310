//! Wall-clock time boxes for cooperative work.
//!
//! A [`WorkBudget`] answers a single question: "has at most `limit_ms`
//! elapsed since this slice of work started?". Long-running jobs such as the
//! [`GridFillEngine`](crate::resources::gridfill::GridFillEngine) check it
//! after every unit of work and return early once it expires, so the tick
//! loop never stalls.
//!
//! The time source is abstracted behind [`BudgetClock`] so that tests and
//! deterministic replays can drive the budget by hand with a [`ManualClock`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use bevy_ecs::prelude::Resource;

/// Monotonic time source used to measure a budget.
pub trait BudgetClock: Send + Sync {
    /// Time elapsed since an arbitrary, fixed origin. Must never go backwards.
    fn now(&self) -> Duration;
}

/// Real monotonic clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
///
/// Time is stored in microseconds behind an atomic so the clock can be shared
/// by reference while a fill is running (for example from inside a producer
/// that simulates expensive cells).
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.micros.fetch_add(ms * 1_000, Ordering::Relaxed);
    }

    /// Move the clock forward by an arbitrary duration.
    pub fn advance(&self, by: Duration) {
        self.micros
            .fetch_add(by.as_micros() as u64, Ordering::Relaxed);
    }
}

impl BudgetClock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Relaxed))
    }
}

impl<C: BudgetClock + ?Sized> BudgetClock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Clock resource consumed by the load-phase systems.
#[derive(Resource)]
pub struct FillClock(pub Box<dyn BudgetClock>);

impl FillClock {
    pub fn system() -> Self {
        FillClock(Box::new(SystemClock::new()))
    }
}

/// A single time box, started at a captured instant.
///
/// The budget covers one invocation of a job, never the job as a whole.
pub struct WorkBudget<'a> {
    clock: &'a dyn BudgetClock,
    started: Duration,
}

impl<'a> WorkBudget<'a> {
    /// Capture the current instant of `clock` as the start of the slice.
    pub fn start(clock: &'a dyn BudgetClock) -> Self {
        WorkBudget {
            clock,
            started: clock.now(),
        }
    }

    /// Milliseconds elapsed since [`WorkBudget::start`].
    pub fn elapsed_ms(&self) -> f64 {
        self.clock.now().saturating_sub(self.started).as_secs_f64() * 1_000.0
    }

    /// True once at least `limit_ms` milliseconds have elapsed.
    ///
    /// A zero limit is always expired.
    pub fn expired(&self, limit_ms: f64) -> bool {
        self.elapsed_ms() >= limit_ms
    }
}
