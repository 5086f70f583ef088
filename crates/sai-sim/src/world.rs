//! Players, groups, quests, and creature sightings for the reference zone.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use sai_ai::{QuestStatus, World};
use sai_core::{ActorId, CreatureEntry, CreatureId, Position, QuestId, SaiError};

use crate::{ZoneError, ZoneResult};

/// One player in the zone.
#[derive(Clone, Debug, Default)]
pub struct PlayerState {
    pub position: Position,
    /// Dead with a corpse in the world.
    pub dead:     bool,
    pub quests:   FxHashMap<QuestId, QuestStatus>,
    group:        Option<usize>,
}

/// Where a creature was last seen; refreshed by the zone every tick.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Sighting {
    entry:    CreatureEntry,
    position: Position,
    alive:    bool,
}

/// The zone's [`World`]: players, their groups and quest logs, and the last
/// known position of every creature.
#[derive(Debug)]
pub struct ZoneWorld {
    players:         FxHashMap<ActorId, PlayerState>,
    groups:          Vec<Vec<ActorId>>,
    creatures:       FxHashMap<CreatureId, Sighting>,
    reward_distance: f32,
    kill_credits:    Vec<(ActorId, CreatureEntry)>,
}

impl ZoneWorld {
    pub fn new(reward_distance: f32) -> Self {
        Self {
            players: FxHashMap::default(),
            groups: Vec::new(),
            creatures: FxHashMap::default(),
            reward_distance,
            kill_credits: Vec::new(),
        }
    }

    // ── Players ───────────────────────────────────────────────────────────

    pub fn add_player(&mut self, id: ActorId, position: Position) -> ZoneResult<()> {
        if self.players.contains_key(&id) {
            return Err(ZoneError::DuplicatePlayer(id));
        }
        self.players.insert(id, PlayerState { position, ..PlayerState::default() });
        Ok(())
    }

    pub fn player(&self, id: ActorId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    fn player_mut(&mut self, id: ActorId) -> ZoneResult<&mut PlayerState> {
        self.players.get_mut(&id).ok_or(ZoneError::Core(SaiError::ActorNotFound(id)))
    }

    pub fn move_player(&mut self, id: ActorId, position: Position) -> ZoneResult<()> {
        self.player_mut(id)?.position = position;
        Ok(())
    }

    pub fn set_player_dead(&mut self, id: ActorId, dead: bool) -> ZoneResult<()> {
        self.player_mut(id)?.dead = dead;
        Ok(())
    }

    /// Put `quest` into the player's log as incomplete.
    pub fn give_quest(&mut self, id: ActorId, quest: QuestId) -> ZoneResult<()> {
        self.player_mut(id)?.quests.insert(quest, QuestStatus::Incomplete);
        Ok(())
    }

    /// Group `members` together.  Every member must exist and be ungrouped.
    pub fn form_group(&mut self, members: &[ActorId]) -> ZoneResult<()> {
        for &member in members {
            match self.players.get(&member) {
                None => return Err(ZoneError::Core(SaiError::ActorNotFound(member))),
                Some(p) if p.group.is_some() => return Err(ZoneError::AlreadyGrouped(member)),
                Some(_) => {}
            }
        }
        let index = self.groups.len();
        for member in members {
            if let Some(p) = self.players.get_mut(member) {
                p.group = Some(index);
            }
        }
        self.groups.push(members.to_vec());
        debug!(group = index, members = members.len(), "group_formed");
        Ok(())
    }

    /// Kill credit granted through [`World::reward_player_and_group_at_event`],
    /// in grant order.
    pub fn kill_credits(&self) -> &[(ActorId, CreatureEntry)] {
        &self.kill_credits
    }

    // ── Creatures ─────────────────────────────────────────────────────────

    pub(crate) fn sight_creature(&mut self, id: CreatureId, entry: CreatureEntry, position: Position, alive: bool) {
        self.creatures.insert(id, Sighting { entry, position, alive });
    }

    pub(crate) fn forget_creature(&mut self, id: CreatureId) {
        self.creatures.remove(&id);
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Members credited for an event at `source`: the whole group within
    /// reward distance, or the player alone.
    fn credited_members(&self, player: ActorId, source: CreatureId) -> Vec<ActorId> {
        let members = self.group_members(player);
        if members.is_empty() {
            return vec![player];
        }
        let from = self
            .creatures
            .get(&source)
            .map(|s| s.position)
            .or_else(|| self.actor_position(player));
        match from {
            Some(from) => members
                .into_iter()
                .filter(|&m| self.is_at_group_reward_distance(m, from) && !self.has_corpse(m))
                .collect(),
            None => vec![player],
        }
    }
}

impl World for ZoneWorld {
    fn is_player(&self, actor: ActorId) -> bool {
        self.players.contains_key(&actor)
    }

    fn actor_position(&self, actor: ActorId) -> Option<Position> {
        if let Some(player) = self.players.get(&actor) {
            return Some(player.position);
        }
        self.creatures
            .get(&CreatureId(actor.0))
            .filter(|s| s.alive)
            .map(|s| s.position)
    }

    fn group_members(&self, player: ActorId) -> Vec<ActorId> {
        self.players
            .get(&player)
            .and_then(|p| p.group)
            .and_then(|g| self.groups.get(g))
            .cloned()
            .unwrap_or_default()
    }

    fn is_at_group_reward_distance(&self, player: ActorId, from: Position) -> bool {
        self.players
            .get(&player)
            .is_some_and(|p| p.position.within(from, self.reward_distance))
    }

    fn has_corpse(&self, player: ActorId) -> bool {
        self.players.get(&player).is_some_and(|p| p.dead)
    }

    fn quest_status(&self, player: ActorId, quest: QuestId) -> QuestStatus {
        self.players
            .get(&player)
            .and_then(|p| p.quests.get(&quest))
            .copied()
            .unwrap_or_default()
    }

    fn fail_quest(&mut self, player: ActorId, quest: QuestId) {
        let Some(status) = self.players.get_mut(&player).and_then(|p| p.quests.get_mut(&quest)) else {
            return;
        };
        *status = QuestStatus::Failed;
        info!(player = %player, quest = %quest, "quest_failed");
    }

    fn group_event_happens(&mut self, player: ActorId, quest: QuestId, source: CreatureId) {
        for member in self.credited_members(player, source) {
            self.area_explored_or_event_happens(member, quest);
        }
    }

    fn area_explored_or_event_happens(&mut self, player: ActorId, quest: QuestId) {
        let Some(status) = self.players.get_mut(&player).and_then(|p| p.quests.get_mut(&quest)) else {
            return;
        };
        if *status == QuestStatus::Incomplete {
            *status = QuestStatus::Complete;
            info!(player = %player, quest = %quest, "quest_completed");
        }
    }

    fn reward_player_and_group_at_event(&mut self, player: ActorId, entry: CreatureEntry, source: CreatureId) {
        for member in self.credited_members(player, source) {
            self.kill_credits.push((member, entry));
            debug!(player = %member, entry = %entry, "kill_credit");
        }
    }

    fn find_nearest_creature(
        &self,
        entry:   CreatureEntry,
        from:    Position,
        range:   f32,
        exclude: CreatureId,
    ) -> Option<CreatureId> {
        self.creatures
            .iter()
            .filter(|&(&id, s)| id != exclude && s.alive && s.entry == entry && s.position.within(from, range))
            .min_by(|(a_id, a), (b_id, b)| {
                a.position
                    .distance_sq(from)
                    .total_cmp(&b.position.distance_sq(from))
                    .then(a_id.cmp(b_id))
            })
            .map(|(&id, _)| id)
    }
}
