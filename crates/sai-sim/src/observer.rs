//! Zone observer trait for progress reporting and data collection.

use sai_core::CreatureId;
use sai_motion::MotionInform;

/// Callbacks invoked by [`Zone::tick`][crate::Zone::tick].
///
/// All methods default to no-ops.
///
/// # Example: arrival printer
///
/// ```rust,ignore
/// struct Arrivals;
///
/// impl ZoneObserver for Arrivals {
///     fn on_arrival(&mut self, creature: CreatureId, inform: MotionInform) {
///         println!("{creature} reached {:?}", inform.point);
///     }
/// }
/// ```
pub trait ZoneObserver {
    /// Before any creature is processed.  `now_ms` is the zone clock at the
    /// start of the tick.
    fn on_tick_start(&mut self, _now_ms: u64) {}

    /// A creature's motion reported an arrival, before the controller saw it.
    fn on_arrival(&mut self, _creature: CreatureId, _inform: MotionInform) {}

    /// A creature finished fading out and left the zone.
    fn on_despawn(&mut self, _creature: CreatureId) {}

    /// After every creature was processed.  `creatures` is the number still
    /// in the zone.
    fn on_tick_end(&mut self, _now_ms: u64, _creatures: usize) {}
}

/// A [`ZoneObserver`] that does nothing.
pub struct NoopObserver;

impl ZoneObserver for NoopObserver {}
