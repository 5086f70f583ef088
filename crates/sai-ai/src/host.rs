//! Host capability traits.
//!
//! The controller never touches a game object directly.  Everything it needs
//! from its own creature goes through [`Unit`]; everything it needs from the
//! surrounding world (players, groups, quests, other creatures) goes through
//! [`World`].  [`AiContext`] bundles both with the motion and script handles
//! for the duration of one call.

use sai_core::{ActorId, CreatureEntry, CreatureId, PathId, Position, QuestId};
use sai_motion::MotionMaster;
use sai_script::SmartScript;

/// Progress of a quest in a player's log.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestStatus {
    /// Not in the quest log.
    #[default]
    None,
    Incomplete,
    Complete,
    Failed,
    Rewarded,
}

/// The creature a controller drives.
pub trait Unit {
    /// Identity used in log fields and as the credit source for rewards.
    fn id(&self) -> CreatureId;

    fn position(&self) -> Position;
    fn set_position(&mut self, pos: Position);

    /// Where evade returns the creature when it is not escorting.
    fn set_home_position(&mut self, pos: Position);

    fn is_alive(&self) -> bool;
    fn is_in_combat(&self) -> bool;

    /// Passive creatures keep walking their path while in combat.
    fn is_passive(&self) -> bool;

    /// Flying creatures receive unsharded spline paths.
    fn can_fly(&self) -> bool;

    /// The path the creature walks when left alone, if any.
    fn waypoint_path_id(&self) -> Option<PathId>;

    /// Charmed or possessed: the controller must not act on its own.
    fn is_player_controlled(&self) -> bool;

    fn is_evading(&self) -> bool;
    fn set_evading(&mut self, evading: bool);

    fn set_visible(&mut self, visible: bool);

    /// Remove the creature from the world for good.
    fn despawn(&mut self);

    fn health(&self) -> u32;
    fn set_health(&mut self, health: u32);

    /// Current combat target, if any.
    fn victim(&self) -> Option<ActorId>;

    /// Start attacking `target`, entering combat with it.  Returns `false`
    /// if the attack was refused.
    fn attack(&mut self, target: ActorId) -> bool;

    /// Drop threat and leave combat.
    fn combat_stop(&mut self);

    /// Refresh the combat target.  Returns `false` when there is nothing left
    /// to fight.
    fn update_victim(&mut self) -> bool;

    fn melee_attack_if_ready(&mut self);
}

/// Players, groups, quests, and creature lookup.
pub trait World {
    fn is_player(&self, actor: ActorId) -> bool;

    /// `None` once the actor has left the world.
    fn actor_position(&self, actor: ActorId) -> Option<Position>;

    /// Every member of `player`'s group, including `player`.  Empty when the
    /// player is not grouped.
    fn group_members(&self, player: ActorId) -> Vec<ActorId>;

    /// Whether `player` is close enough to `from` to share group credit.
    fn is_at_group_reward_distance(&self, player: ActorId, from: Position) -> bool;

    /// `true` while the player is a ghost with a corpse in the world.
    fn has_corpse(&self, player: ActorId) -> bool;

    fn quest_status(&self, player: ActorId, quest: QuestId) -> QuestStatus;

    fn fail_quest(&mut self, player: ActorId, quest: QuestId);

    /// Event-style quest credit for `player` and every eligible group member.
    fn group_event_happens(&mut self, player: ActorId, quest: QuestId, source: CreatureId);

    /// Event-style quest credit for `player` alone.
    fn area_explored_or_event_happens(&mut self, player: ActorId, quest: QuestId);

    /// Kill credit for `entry` to `player` and eligible group members.
    fn reward_player_and_group_at_event(&mut self, player: ActorId, entry: CreatureEntry, source: CreatureId);

    /// Nearest living creature of `entry` within `range` of `from`, never
    /// `exclude` itself.
    fn find_nearest_creature(
        &self,
        entry:   CreatureEntry,
        from:    Position,
        range:   f32,
        exclude: CreatureId,
    ) -> Option<CreatureId>;
}

/// Everything a controller call may touch.
///
/// Built by the host for each call; the controller keeps no references past
/// the call.
pub struct AiContext<'a> {
    pub unit:   &'a mut dyn Unit,
    pub motion: &'a mut dyn MotionMaster,
    pub script: &'a mut dyn SmartScript,
    pub world:  &'a mut dyn World,
}

impl<'a> AiContext<'a> {
    pub fn new(
        unit:   &'a mut dyn Unit,
        motion: &'a mut dyn MotionMaster,
        script: &'a mut dyn SmartScript,
        world:  &'a mut dyn World,
    ) -> Self {
        Self { unit, motion, script, world }
    }

    /// Creature id for log fields.
    #[inline]
    pub fn creature(&self) -> CreatureId {
        self.unit.id()
    }
}
