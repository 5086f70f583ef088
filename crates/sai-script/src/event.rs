//! Event kinds and their payload.

use std::str::FromStr;

use sai_core::{ActorId, GameObjectId};

use crate::ScriptError;

macro_rules! smart_events {
    ($( $(#[$meta:meta])* $variant:ident => $name:literal ),* $(,)?) => {
        /// Everything the controller can report to a script.
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum SmartEvent {
            $( $(#[$meta])* $variant, )*
        }

        impl SmartEvent {
            /// Every event, in declaration order.
            pub const ALL: &'static [SmartEvent] = &[ $( SmartEvent::$variant, )* ];

            /// Stable snake_case name used in logs and rule files.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( SmartEvent::$variant => $name, )*
                }
            }
        }

        impl FromStr for SmartEvent {
            type Err = ScriptError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(SmartEvent::$variant), )*
                    other => Err(ScriptError::UnknownEvent(other.to_owned())),
                }
            }
        }
    };
}

smart_events! {
    /// Escort started.  `a` = first waypoint id, `b` = path id.
    WaypointStart    => "waypoint_start",
    /// A waypoint was reached.  `a` = waypoint id, `b` = path id.
    WaypointReached  => "waypoint_reached",
    /// Escort paused.  `a` = last waypoint id, `b` = path id.
    WaypointPaused   => "waypoint_paused",
    WaypointResumed  => "waypoint_resumed",
    WaypointStopped  => "waypoint_stopped",
    WaypointEnded    => "waypoint_ended",
    /// Any motion arrival.  `a` = motion kind code, `b` = raw point id.
    MovementInform   => "movement_inform",
    FollowCompleted  => "follow_completed",
    Aggro            => "aggro",
    Evade            => "evade",
    Death            => "death",
    Respawn          => "respawn",
    /// `a` = damage as dealt, before any invincibility clamp.
    Damaged          => "damaged",
    Kill             => "kill",
    ReachedHome      => "reached_home",
    GossipHello      => "gossip_hello",
    GossipSelect     => "gossip_select",
    AcceptedQuest    => "accepted_quest",
    RewardQuest      => "reward_quest",
    SpellHit         => "spell_hit",
    ReceiveEmote     => "receive_emote",
    DataSet          => "data_set",
    /// `a` = world event id.
    GameEventStart   => "game_event_start",
    GameEventEnd     => "game_event_end",
    /// Game object only.  `a` = new state.
    GoStateChanged   => "go_state_changed",
    GoLootStateChanged => "go_loot_state_changed",
    /// Game object only.  `a` = event id.
    GoEventInform    => "go_event_inform",
}

impl std::fmt::Display for SmartEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event payload: an optional actor, two numeric arguments, a flag, an
/// optional spell reference and the game object the event concerns, if any.
/// Unused fields stay at their defaults.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventArgs {
    pub actor:  Option<ActorId>,
    pub a:      u32,
    pub b:      u32,
    pub flag:   bool,
    pub spell:  Option<u32>,
    pub object: Option<GameObjectId>,
}

impl EventArgs {
    /// Numeric arguments only.
    #[inline]
    pub fn values(a: u32, b: u32) -> Self {
        Self { a, b, ..Self::default() }
    }

    #[inline]
    pub fn with_actor(mut self, actor: Option<ActorId>) -> Self {
        self.actor = actor;
        self
    }

    #[inline]
    pub fn with_flag(mut self, flag: bool) -> Self {
        self.flag = flag;
        self
    }

    #[inline]
    pub fn with_spell(mut self, spell: u32) -> Self {
        self.spell = Some(spell);
        self
    }

    #[inline]
    pub fn with_object(mut self, object: GameObjectId) -> Self {
        self.object = Some(object);
        self
    }
}
