//! Quest settlement at the end of an escort.

use tracing::info;

use sai_core::{ActorId, CreatureId, Position, QuestId};

use crate::{QuestStatus, World};

/// Settle `quest` for the escorted actors.
///
/// A single escorted player is settled directly (group credit on success)
/// and the outcome is then repeated for every other member of its group.
/// Several escorted actors are settled one by one, players only.
pub fn settle_escort_quest(
    world:   &mut dyn World,
    targets: &[ActorId],
    quest:   QuestId,
    source:  CreatureId,
    from:    Position,
    fail:    bool,
) {
    if let [only] = targets {
        if world.is_player(*only) {
            let player = *only;
            if !fail && eligible_for_reward(world, player, from) {
                world.group_event_happens(player, quest, source);
                info!(creature = %source, player = %player, quest = %quest, "escort_quest_rewarded");
            }
            if fail {
                fail_if_incomplete(world, player, quest, source);
            }

            for member in world.group_members(player) {
                if member == player {
                    continue;
                }
                settle_individually(world, member, quest, source, from, fail);
            }
            return;
        }
    }

    for &actor in targets {
        if world.is_player(actor) {
            settle_individually(world, actor, quest, source, from, fail);
        }
    }
}

fn settle_individually(
    world:  &mut dyn World,
    player: ActorId,
    quest:  QuestId,
    source: CreatureId,
    from:   Position,
    fail:   bool,
) {
    if fail {
        fail_if_incomplete(world, player, quest, source);
    } else if eligible_for_reward(world, player, from) {
        world.area_explored_or_event_happens(player, quest);
        info!(creature = %source, player = %player, quest = %quest, "escort_quest_rewarded");
    }
}

fn eligible_for_reward(world: &dyn World, player: ActorId, from: Position) -> bool {
    world.is_at_group_reward_distance(player, from) && !world.has_corpse(player)
}

fn fail_if_incomplete(world: &mut dyn World, player: ActorId, quest: QuestId, source: CreatureId) {
    if world.quest_status(player, quest) == QuestStatus::Incomplete {
        world.fail_quest(player, quest);
        info!(creature = %source, player = %player, quest = %quest, "escort_quest_failed");
    }
}
