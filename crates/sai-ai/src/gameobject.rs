//! Scripted game objects: chests, doors, levers and other static objects
//! that drive a script but never move.
//!
//! Hooks that involve a player (gossip, quests, destruction) are tagged with
//! the object's id so a script shared by several objects can tell them apart.

use tracing::{debug, trace};

use sai_core::{ActorId, GameObjectId, QuestId};
use sai_script::{EventArgs, SmartEvent, SmartScript};

/// Controller for one scripted game object.
///
/// Stateless apart from the object's identity; every hook forwards straight
/// to the script.
#[derive(Copy, Clone, Debug)]
pub struct SmartGameObjectAi {
    object: GameObjectId,
}

impl SmartGameObjectAi {
    pub fn new(object: GameObjectId) -> Self {
        Self { object }
    }

    #[inline]
    pub fn object(&self) -> GameObjectId {
        self.object
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// First activation after spawn.  Does not reset the script.
    pub fn initialize(&mut self, script: &mut dyn SmartScript) {
        debug!(object = %self.object, "gameobject_initialized");
        script.process_event(SmartEvent::Respawn, EventArgs::default());
    }

    pub fn update(&mut self, script: &mut dyn SmartScript, diff: u32) {
        script.on_update(diff);
    }

    pub fn reset(&mut self, script: &mut dyn SmartScript) {
        trace!(object = %self.object, "gameobject_reset");
        script.on_reset();
    }

    // ── Player interaction ────────────────────────────────────────────────

    pub fn gossip_hello(&mut self, script: &mut dyn SmartScript, player: ActorId) {
        debug!(object = %self.object, %player, "gameobject_gossip_hello");
        self.tagged(script, SmartEvent::GossipHello, player, 0, 0);
    }

    pub fn gossip_select(&mut self, script: &mut dyn SmartScript, player: ActorId, sender: u32, action: u32) {
        self.tagged(script, SmartEvent::GossipSelect, player, sender, action);
    }

    pub fn quest_accept(&mut self, script: &mut dyn SmartScript, player: ActorId, quest: QuestId) {
        self.tagged(script, SmartEvent::AcceptedQuest, player, quest.raw(), 0);
    }

    /// `option` is the reward the player picked.
    pub fn quest_reward(&mut self, script: &mut dyn SmartScript, player: ActorId, quest: QuestId, option: u32) {
        self.tagged(script, SmartEvent::RewardQuest, player, quest.raw(), option);
    }

    /// A destructible object was brought down.  Reported as a death.
    pub fn destroyed(&mut self, script: &mut dyn SmartScript, player: Option<ActorId>, event_id: u32) {
        debug!(object = %self.object, event_id, "gameobject_destroyed");
        let args = EventArgs::values(event_id, 0).with_actor(player).with_object(self.object);
        script.process_event(SmartEvent::Death, args);
    }

    // ── World notifications ───────────────────────────────────────────────

    pub fn set_data(&mut self, script: &mut dyn SmartScript, id: u32, value: u32) {
        script.process_event(SmartEvent::DataSet, EventArgs::values(id, value));
    }

    /// A world event started (`start`) or ended.
    pub fn game_event(&mut self, script: &mut dyn SmartScript, start: bool, event_id: u32) {
        let event = if start { SmartEvent::GameEventStart } else { SmartEvent::GameEventEnd };
        script.process_event(event, EventArgs::values(event_id, 0));
    }

    pub fn state_changed(&mut self, script: &mut dyn SmartScript, state: u32, by: Option<ActorId>) {
        trace!(object = %self.object, state, "gameobject_state_changed");
        script.process_event(SmartEvent::GoStateChanged, EventArgs::values(state, 0).with_actor(by));
    }

    pub fn loot_state_changed(&mut self, script: &mut dyn SmartScript, state: u32, by: Option<ActorId>) {
        trace!(object = %self.object, state, "gameobject_loot_state_changed");
        script.process_event(SmartEvent::GoLootStateChanged, EventArgs::values(state, 0).with_actor(by));
    }

    pub fn event_inform(&mut self, script: &mut dyn SmartScript, event_id: u32) {
        script.process_event(SmartEvent::GoEventInform, EventArgs::values(event_id, 0));
    }

    fn tagged(&self, script: &mut dyn SmartScript, event: SmartEvent, player: ActorId, a: u32, b: u32) {
        let args = EventArgs::values(a, b).with_actor(Some(player)).with_object(self.object);
        script.process_event(event, args);
    }
}
