//! Fluent builder for constructing a [`Zone`].

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::info;

use sai_ai::SmartAi;
use sai_core::{ActorId, AiConfig, Position, QuestId, SaiError};
use sai_motion::{MotionConfig, MotionEngine};
use sai_script::SmartScript;
use sai_waypoint::WaypointStore;

use crate::{Creature, CreatureBody, CreatureSpec, Zone, ZoneError, ZoneResult, ZoneWorld};

/// Zone-wide configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneConfig {
    /// Controller tuning shared by every creature.
    pub ai:                    AiConfig,
    pub motion:                MotionConfig,
    /// Group members farther than this from an event get no share of it.
    pub group_reward_distance: f32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            ai:                    AiConfig::default(),
            motion:                MotionConfig::default(),
            group_reward_distance: 74.0,
        }
    }
}

impl ZoneConfig {
    pub fn validate(&self) -> ZoneResult<()> {
        self.motion.validate()?;
        let d = self.group_reward_distance;
        if !(d.is_finite() && d >= 0.0) {
            return Err(SaiError::Config(format!("group_reward_distance must be a non-negative distance, got {d}")).into());
        }
        Ok(())
    }
}

/// Fluent builder for [`Zone<S>`].
///
/// # Required inputs
///
/// - [`WaypointStore`]: shared by every creature's escort controller
/// - [`ZoneConfig`]
///
/// # Optional inputs
///
/// | Method              | Effect                                          |
/// |---------------------|-------------------------------------------------|
/// | `.spawn(spec, s)`   | A creature driven by script `s`                 |
/// | `.player(id, pos)`  | A player standing at `pos`                      |
/// | `.quest(id, q)`     | Quest `q` in the player's log, incomplete       |
/// | `.group(members)`   | Group existing players together                 |
///
/// # Example
///
/// ```rust,ignore
/// let mut zone = ZoneBuilder::new(store, ZoneConfig::default())
///     .spawn(CreatureSpec::new(CreatureId(1), CreatureEntry(100), start), EventLog::new())
///     .player(PLAYER, start)
///     .quest(PLAYER, QuestId(42))
///     .build()?;
/// zone.start_escort(CreatureId(1), PathId(1), false, PLAYER, Some(QuestId(42)))?;
/// zone.run_for(60_000, 100, &mut NoopObserver);
/// ```
pub struct ZoneBuilder<S> {
    store:   Arc<WaypointStore>,
    config:  ZoneConfig,
    spawns:  Vec<(CreatureSpec, S)>,
    players: Vec<(ActorId, Position)>,
    quests:  Vec<(ActorId, QuestId)>,
    groups:  Vec<Vec<ActorId>>,
}

impl<S: SmartScript> ZoneBuilder<S> {
    pub fn new(store: Arc<WaypointStore>, config: ZoneConfig) -> Self {
        Self {
            store,
            config,
            spawns:  Vec::new(),
            players: Vec::new(),
            quests:  Vec::new(),
            groups:  Vec::new(),
        }
    }

    pub fn spawn(mut self, spec: CreatureSpec, script: S) -> Self {
        self.spawns.push((spec, script));
        self
    }

    pub fn player(mut self, id: ActorId, position: Position) -> Self {
        self.players.push((id, position));
        self
    }

    pub fn quest(mut self, player: ActorId, quest: QuestId) -> Self {
        self.quests.push((player, quest));
        self
    }

    pub fn group(mut self, members: impl IntoIterator<Item = ActorId>) -> Self {
        self.groups.push(members.into_iter().collect());
        self
    }

    /// Validate inputs, spawn every creature, and run each controller's
    /// `initialize` hook.
    pub fn build(self) -> ZoneResult<Zone<S>> {
        self.config.validate()?;

        let mut world = ZoneWorld::new(self.config.group_reward_distance);
        for (id, position) in self.players {
            world.add_player(id, position)?;
        }
        for (player, quest) in self.quests {
            world.give_quest(player, quest)?;
        }
        for members in &self.groups {
            world.form_group(members)?;
        }

        let mut seen = FxHashSet::default();
        let mut creatures = Vec::with_capacity(self.spawns.len());
        for (spec, script) in self.spawns {
            if !seen.insert(spec.id) {
                return Err(ZoneError::DuplicateCreature(spec.id));
            }
            creatures.push(Creature {
                body:   CreatureBody::spawn(&spec),
                motion: MotionEngine::try_new(self.config.motion.clone())?,
                ai:     SmartAi::new(Arc::clone(&self.store), self.config.ai.clone()),
                script,
            });
        }

        let ids: Vec<_> = creatures.iter().map(|c| c.body.id).collect();
        let mut zone = Zone::new(self.config, world, creatures);
        for id in ids {
            zone.command(id, |ai, ctx| ai.initialize(ctx))?;
        }

        info!(
            creatures = zone.creature_count(),
            paths = self.store.len(),
            "zone_built"
        );
        Ok(zone)
    }
}
