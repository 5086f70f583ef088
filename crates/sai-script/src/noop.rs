//! A script that ignores everything.

use crate::{EventArgs, SmartEvent, SmartScript};

/// A [`SmartScript`] with no rules.
///
/// Creatures without an attached script still run the controller; their
/// events simply go nowhere.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopScript;

impl SmartScript for NoopScript {
    fn process_event(&mut self, _event: SmartEvent, _args: EventArgs) {}
}
