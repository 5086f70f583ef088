//! Escort quest demo.
//!
//! A captive walks a short road out of a camp while the player who freed her
//! stays close.  Two runs share the same road:
//!
//! 1. the player keeps pace and the quest completes at the last waypoint;
//! 2. the player wanders off halfway and the quest fails once the captive
//!    notices.
//!
//! Run with `RUST_LOG=debug` to see every controller decision.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sai_ai::{QuestStatus, World};
use sai_core::{ActorId, CreatureEntry, CreatureId, PathId, Position, QuestId};
use sai_motion::MotionInform;
use sai_script::{EventArgs, SmartEvent, SmartScript};
use sai_sim::{CreatureSpec, ZoneBuilder, ZoneConfig, ZoneObserver};
use sai_waypoint::{WaypointStore, load_waypoints_reader};

// ── Constants ─────────────────────────────────────────────────────────────────

const CAPTIVE: CreatureId = CreatureId(1);
const CAPTIVE_ENTRY: CreatureEntry = CreatureEntry(3465);
const PLAYER: ActorId = ActorId(9001);
const QUEST: QuestId = QuestId(898);
const ROAD: PathId = PathId(3465);

/// Zone tick length in milliseconds.
const STEP_MS: u32 = 100;

/// Long enough for the captive to walk the whole road and fade out.
const RUN_MS: u64 = 90_000;

/// The road out of camp.  Same format as `waypoints.csv` files on disk.
const WAYPOINTS_CSV: &str = "\
path_id,point_id,x,y,z
3465,1,10.0,0.0,0.0
3465,2,20.0,5.0,0.0
3465,3,30.0,5.0,0.0
3465,4,40.0,0.0,0.0
3465,5,50.0,0.0,0.0
";

// ── Script ────────────────────────────────────────────────────────────────────

/// Logs every event the controller raises.
struct TracingScript {
    creature: CreatureId,
}

impl SmartScript for TracingScript {
    fn process_event(&mut self, event: SmartEvent, args: EventArgs) {
        info!(creature = %self.creature, event = event.as_str(), a = args.a, b = args.b, "smart_event");
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Progress {
    arrivals: usize,
    gone_at:  Option<u64>,
    now_ms:   u64,
}

impl ZoneObserver for Progress {
    fn on_tick_start(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    fn on_arrival(&mut self, creature: CreatureId, inform: MotionInform) {
        self.arrivals += 1;
        let point = inform.point.map(|p| p.to_string()).unwrap_or_else(|| "-".into());
        println!("  {:>6} ms  {creature} {} arrival at {point}", self.now_ms, inform.kind);
    }

    fn on_despawn(&mut self, creature: CreatureId) {
        self.gone_at = Some(self.now_ms);
        println!("  {:>6} ms  {creature} left the zone", self.now_ms);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    println!("=== smart_ai escort demo ===");

    // ── 1. Load the road ──────────────────────────────────────────────────
    let store = Arc::new(load_waypoints_reader(Cursor::new(WAYPOINTS_CSV))?);
    println!("Loaded {} path(s), {} waypoint(s) on the road", store.len(), store.path(ROAD).map_or(0, |p| p.len()));

    // ── 2. Player keeps pace ──────────────────────────────────────────────
    println!();
    println!("Run 1: the player stays with the captive");
    let status = run_escort(&store, false)?;
    println!("Quest {QUEST}: {status:?}");

    // ── 3. Player wanders off ─────────────────────────────────────────────
    println!();
    println!("Run 2: the player wanders off at 3 s");
    let status = run_escort(&store, true)?;
    println!("Quest {QUEST}: {status:?}");

    Ok(())
}

/// Build a fresh zone, start the escort, and report the quest outcome.
fn run_escort(store: &Arc<WaypointStore>, wander: bool) -> Result<QuestStatus> {
    let start = Position::new(0.0, 0.0, 0.0);
    let mut zone = ZoneBuilder::new(Arc::clone(store), ZoneConfig::default())
        .spawn(
            CreatureSpec::new(CAPTIVE, CAPTIVE_ENTRY, start).passive(),
            TracingScript { creature: CAPTIVE },
        )
        .player(PLAYER, start)
        .quest(PLAYER, QUEST)
        .build()?;

    zone.start_escort(CAPTIVE, ROAD, false, PLAYER, Some(QUEST))?;

    let mut progress = Progress::default();
    let mut elapsed = 0u64;
    while elapsed < RUN_MS && zone.creature(CAPTIVE).is_some() {
        zone.tick(STEP_MS, &mut progress);
        elapsed += u64::from(STEP_MS);

        // The player shadows the captive, or heads back to camp.
        let follow_to = match zone.creature(CAPTIVE) {
            Some(c) if !wander || elapsed < 3_000 => c.body.position,
            _ => Position::new(-200.0, 0.0, 0.0),
        };
        zone.world.move_player(PLAYER, follow_to)?;
    }

    info!(
        arrivals = progress.arrivals,
        despawned_at_ms = progress.gone_at,
        elapsed_ms = elapsed,
        "escort_run_finished"
    );
    Ok(zone.world.quest_status(PLAYER, QUEST))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}
