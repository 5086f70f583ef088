//! Concrete creature state for the reference zone.

use tracing::trace;

use sai_ai::Unit;
use sai_core::{ActorId, CreatureEntry, CreatureId, PathId, Position};

/// Spawn parameters for one creature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureSpec {
    pub id:         CreatureId,
    pub entry:      CreatureEntry,
    pub position:   Position,
    pub max_health: u32,
    pub passive:    bool,
    pub can_fly:    bool,
    /// Walked in a loop whenever the creature is idle at home.
    pub patrol:     Option<PathId>,
}

impl CreatureSpec {
    pub fn new(id: CreatureId, entry: CreatureEntry, position: Position) -> Self {
        Self { id, entry, position, max_health: 100, passive: false, can_fly: false, patrol: None }
    }

    pub fn passive(mut self) -> Self {
        self.passive = true;
        self
    }

    pub fn flying(mut self) -> Self {
        self.can_fly = true;
        self
    }

    pub fn patrol(mut self, path: PathId) -> Self {
        self.patrol = Some(path);
        self
    }
}

/// Everything the zone tracks about a creature's body.
///
/// Fields are public so hosts and tests can stage situations (combat, damage,
/// a victim) without going through the controller.
#[derive(Clone, Debug)]
pub struct CreatureBody {
    pub id:                CreatureId,
    pub entry:             CreatureEntry,
    pub position:          Position,
    pub home:              Position,
    pub alive:             bool,
    pub in_combat:         bool,
    pub passive:           bool,
    pub can_fly:           bool,
    pub patrol:            Option<PathId>,
    pub player_controlled: bool,
    pub evading:           bool,
    pub visible:           bool,
    pub despawned:         bool,
    pub health:            u32,
    pub max_health:        u32,
    pub victim:            Option<ActorId>,
    /// Melee swings taken so far.
    pub swings:            u32,
}

impl CreatureBody {
    pub fn spawn(spec: &CreatureSpec) -> Self {
        Self {
            id:                spec.id,
            entry:             spec.entry,
            position:          spec.position,
            home:              spec.position,
            alive:             true,
            in_combat:         false,
            passive:           spec.passive,
            can_fly:           spec.can_fly,
            patrol:            spec.patrol,
            player_controlled: false,
            evading:           false,
            visible:           true,
            despawned:         false,
            health:            spec.max_health,
            max_health:        spec.max_health,
            victim:            None,
            swings:            0,
        }
    }
}

impl Unit for CreatureBody {
    fn id(&self) -> CreatureId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, pos: Position) {
        self.position = pos;
    }

    fn set_home_position(&mut self, pos: Position) {
        self.home = pos;
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_in_combat(&self) -> bool {
        self.in_combat
    }

    fn is_passive(&self) -> bool {
        self.passive
    }

    fn can_fly(&self) -> bool {
        self.can_fly
    }

    fn waypoint_path_id(&self) -> Option<PathId> {
        self.patrol
    }

    fn is_player_controlled(&self) -> bool {
        self.player_controlled
    }

    fn is_evading(&self) -> bool {
        self.evading
    }

    fn set_evading(&mut self, evading: bool) {
        self.evading = evading;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn despawn(&mut self) {
        self.despawned = true;
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    fn victim(&self) -> Option<ActorId> {
        self.victim
    }

    fn attack(&mut self, target: ActorId) -> bool {
        if !self.alive || self.victim == Some(target) {
            return false;
        }
        self.victim = Some(target);
        self.in_combat = true;
        trace!(creature = %self.id, target = %target, "attack_started");
        true
    }

    fn combat_stop(&mut self) {
        self.victim = None;
        self.in_combat = false;
    }

    fn update_victim(&mut self) -> bool {
        if !self.in_combat {
            self.victim = None;
        }
        self.victim.is_some()
    }

    fn melee_attack_if_ready(&mut self) {
        self.swings += 1;
    }
}
