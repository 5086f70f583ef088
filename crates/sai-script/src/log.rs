//! A recording script.

use tracing::trace;

use crate::{EventArgs, SmartEvent, SmartScript};

/// [`SmartScript`] that keeps every event it receives, in order.
///
/// Used by tests to assert on dispatch order and by the demo to print an
/// escort's history.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events:  Vec<(SmartEvent, EventArgs)>,
    updates: u64,
    resets:  u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn events(&self) -> &[(SmartEvent, EventArgs)] {
        &self.events
    }

    /// Just the event kinds, in order.
    pub fn kinds(&self) -> Vec<SmartEvent> {
        self.events.iter().map(|(e, _)| *e).collect()
    }

    pub fn count(&self, event: SmartEvent) -> usize {
        self.events.iter().filter(|(e, _)| *e == event).count()
    }

    /// Payload of the most recent `event`, if any.
    pub fn last(&self, event: SmartEvent) -> Option<EventArgs> {
        self.events.iter().rev().find(|(e, _)| *e == event).map(|(_, a)| *a)
    }

    /// Payloads of every `event`, in order.
    pub fn args_of(&self, event: SmartEvent) -> Vec<EventArgs> {
        self.events.iter().filter(|(e, _)| *e == event).map(|(_, a)| *a).collect()
    }

    #[inline]
    pub fn updates(&self) -> u64 {
        self.updates
    }

    #[inline]
    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl SmartScript for EventLog {
    fn process_event(&mut self, event: SmartEvent, args: EventArgs) {
        trace!(%event, a = args.a, b = args.b, "script_event");
        self.events.push((event, args));
    }

    fn on_update(&mut self, _diff: u32) {
        self.updates += 1;
    }

    fn on_reset(&mut self) {
        self.resets += 1;
    }
}
