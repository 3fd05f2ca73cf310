use bevy_ecs::prelude::Resource;

/// Tick counter and wall-clock timing of the loop.
///
/// Sequences count ticks, not seconds; `delta`/`elapsed` are kept for
/// reporting only.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    /// Ticks run so far.
    pub tick: u64,
    /// Seconds since the loop started.
    pub elapsed: f32,
    /// Seconds the previous tick took.
    pub delta: f32,
    /// Ticks that overran their time slot.
    pub missed_ticks: u64,
}
