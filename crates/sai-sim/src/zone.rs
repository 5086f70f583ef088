//! The `Zone` struct and its tick loop.

use tracing::{debug, trace};

use sai_ai::{AiContext, SmartAi, World};
use sai_core::{ActorId, CreatureId, PathId, QuestId, SaiError};
use sai_motion::MotionEngine;
use sai_script::SmartScript;

use crate::{CreatureBody, ZoneConfig, ZoneObserver, ZoneResult, ZoneWorld};

/// One spawned creature: body, motion, controller, and script.
#[derive(Debug)]
pub struct Creature<S> {
    pub body:   CreatureBody,
    pub motion: MotionEngine,
    pub ai:     SmartAi,
    pub script: S,
}

impl<S: SmartScript> Creature<S> {
    /// Run `f` against this creature's controller with a context built from
    /// its own parts and `world`.
    fn drive<R>(&mut self, world: &mut ZoneWorld, f: impl FnOnce(&mut SmartAi, &mut AiContext<'_>) -> R) -> R {
        let Creature { body, motion, ai, script } = self;
        let mut ctx = AiContext::new(body, motion, script, world);
        f(ai, &mut ctx)
    }
}

/// A set of scripted creatures sharing one world.
///
/// Every tick, in ascending creature id order:
///
/// 1. the motion engine advances the body and may report one arrival;
/// 2. the arrival goes to [`SmartAi::movement_inform`];
/// 3. [`SmartAi::update`] runs with the tick delta;
/// 4. the creature's sighting in the world is refreshed.
///
/// Creatures that despawned during the tick are removed at its end.
///
/// Create via [`ZoneBuilder`][crate::ZoneBuilder].
#[derive(Debug)]
pub struct Zone<S> {
    pub config:    ZoneConfig,
    pub world:     ZoneWorld,
    /// Sorted by creature id.
    creatures:     Vec<Creature<S>>,
    now_ms:        u64,
}

impl<S: SmartScript> Zone<S> {
    pub(crate) fn new(config: ZoneConfig, world: ZoneWorld, mut creatures: Vec<Creature<S>>) -> Self {
        creatures.sort_by_key(|c| c.body.id);
        let mut zone = Self { config, world, creatures, now_ms: 0 };
        zone.sight_all();
        zone
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Milliseconds simulated so far.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature<S>> {
        self.index_of(id).ok().map(|i| &self.creatures[i])
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature<S>> {
        match self.index_of(id) {
            Ok(i) => Some(&mut self.creatures[i]),
            Err(_) => None,
        }
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature<S>> {
        self.creatures.iter()
    }

    fn index_of(&self, id: CreatureId) -> Result<usize, usize> {
        self.creatures.binary_search_by_key(&id, |c| c.body.id)
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Run `f` against creature `id`'s controller.
    ///
    /// This is how hosts and scripts issue escort, follow, and combat
    /// requests between ticks.
    pub fn command<R>(
        &mut self,
        id: CreatureId,
        f:  impl FnOnce(&mut SmartAi, &mut AiContext<'_>) -> R,
    ) -> ZoneResult<R> {
        let i = self.index_of(id).map_err(|_| SaiError::CreatureNotFound(id))?;
        let creature = &mut self.creatures[i];
        let out = creature.drive(&mut self.world, f);
        sight(&mut self.world, &creature.body);
        Ok(out)
    }

    /// Start an escort quest: `player` is the invoker and `quest` is settled
    /// when the escort ends.
    pub fn start_escort(
        &mut self,
        id:     CreatureId,
        path:   PathId,
        run:    bool,
        player: ActorId,
        quest:  Option<QuestId>,
    ) -> ZoneResult<()> {
        self.command(id, |ai, ctx| {
            let started = ai.start_path(ctx, run, Some(path), false, Some(player));
            if started.is_ok() {
                ai.set_escort_quest(quest);
            }
            started
        })??;
        Ok(())
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance every creature by `diff` milliseconds.
    pub fn tick<O: ZoneObserver>(&mut self, diff: u32, observer: &mut O) {
        observer.on_tick_start(self.now_ms);

        for creature in &mut self.creatures {
            if creature.body.despawned {
                continue;
            }

            let home = creature.body.home;
            let world = &self.world;
            let inform = creature.motion.advance(diff, &mut creature.body.position, home, &|actor: ActorId| {
                world.actor_position(actor)
            });
            sight(&mut self.world, &creature.body);

            if let Some(inform) = inform {
                observer.on_arrival(creature.body.id, inform);
                creature.drive(&mut self.world, |ai, ctx| ai.movement_inform(ctx, inform.kind, inform.point));
            }
            creature.drive(&mut self.world, |ai, ctx| ai.update(ctx, diff));
            sight(&mut self.world, &creature.body);
        }

        let world = &mut self.world;
        self.creatures.retain(|c| {
            if c.body.despawned {
                world.forget_creature(c.body.id);
                debug!(creature = %c.body.id, "creature_removed");
                observer.on_despawn(c.body.id);
                false
            } else {
                true
            }
        });

        self.now_ms += u64::from(diff);
        trace!(now_ms = self.now_ms, creatures = self.creatures.len(), "zone_tick");
        observer.on_tick_end(self.now_ms, self.creatures.len());
    }

    /// Tick in steps of `step_ms` until `duration_ms` more milliseconds have
    /// been simulated.  The last step is shortened to land exactly.
    pub fn run_for<O: ZoneObserver>(&mut self, duration_ms: u64, step_ms: u32, observer: &mut O) {
        let step = step_ms.max(1);
        let mut left = duration_ms;
        while left > 0 {
            let diff = u32::try_from(left).map_or(step, |l| l.min(step));
            self.tick(diff, observer);
            left -= u64::from(diff);
        }
    }

    fn sight_all(&mut self) {
        for creature in &self.creatures {
            sight(&mut self.world, &creature.body);
        }
    }
}

fn sight(world: &mut ZoneWorld, body: &CreatureBody) {
    world.sight_creature(body.id, body.entry, body.position, body.alive);
}
