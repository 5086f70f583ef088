//! The `SmartScript` trait: the rule engine as seen from the controller.

use crate::{EventArgs, SmartEvent};

/// Sink for controller events.
///
/// Only [`process_event`][Self::process_event] is required.  The update and
/// reset hooks default to no-ops for scripts without timed rules.
pub trait SmartScript {
    /// Handle one event.  Called synchronously, in the order events occur.
    fn process_event(&mut self, event: SmartEvent, args: EventArgs);

    /// Run timed rules; called once per controller update before any
    /// escort or follow processing.
    fn on_update(&mut self, _diff: u32) {}

    /// Forget per-encounter state (respawn, evade).
    fn on_reset(&mut self) {}
}

impl<S: SmartScript + ?Sized> SmartScript for Box<S> {
    fn process_event(&mut self, event: SmartEvent, args: EventArgs) {
        (**self).process_event(event, args);
    }

    fn on_update(&mut self, diff: u32) {
        (**self).on_update(diff);
    }

    fn on_reset(&mut self) {
        (**self).on_reset();
    }
}
