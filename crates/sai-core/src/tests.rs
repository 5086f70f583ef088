//! Unit tests for sai-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActorId, CreatureId, PathId, QuestId};

    #[test]
    fn default_is_invalid() {
        assert_eq!(PathId::default(), PathId::INVALID);
        assert!(!QuestId::default().is_valid());
        assert!(QuestId(3).is_valid());
    }

    #[test]
    fn ordering() {
        assert!(PathId(0) < PathId(1));
        assert!(ActorId(100) > ActorId(99));
    }

    #[test]
    fn creature_is_actor() {
        assert_eq!(ActorId::from(CreatureId(9)), ActorId(9));
    }

    #[test]
    fn display() {
        assert_eq!(PathId(7).to_string(), "PathId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn zero_distance() {
        let p = Position::new(10.0, -4.0, 2.0);
        assert!(p.distance(p) < 1e-6);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert!(a.within(b, 5.0));
        assert!(!a.within(b, 4.99));
    }

    #[test]
    fn midpoint_and_offset() {
        let a = Position::new(0.0, 10.0, 2.0);
        let b = Position::new(4.0, 0.0, 6.0);
        assert_eq!(a.midpoint(b), Position::new(2.0, 5.0, 4.0));
        assert_eq!(b.offset_from(a), Position::new(4.0, -10.0, 4.0));
    }

    #[test]
    fn step_toward_stops_at_target() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(10.0, 0.0, 0.0);
        assert_eq!(a.step_toward(b, 4.0), Position::new(4.0, 0.0, 0.0));
        assert_eq!(a.step_toward(b, 25.0), b);
    }
}

#[cfg(test)]
mod time {
    use crate::Countdown;

    #[test]
    fn equal_delta_drains_without_firing() {
        let mut c = Countdown::new(1_000);
        assert!(!c.tick(1_000));
        assert_eq!(c.remaining(), 0);
        assert!(c.tick(1));
    }

    #[test]
    fn larger_delta_fires_and_keeps_remaining() {
        let mut c = Countdown::new(500);
        assert!(!c.tick(200));
        assert!(c.tick(400));
        assert_eq!(c.remaining(), 300);
    }

    #[test]
    fn periodic_rearms() {
        let mut c = Countdown::new(100);
        assert!(c.tick_periodic(150, 1_000));
        assert_eq!(c.remaining(), 1_000);
        assert!(!c.tick_periodic(999, 1_000));
        assert_eq!(c.remaining(), 1);
    }

    #[test]
    fn zero_delta_never_fires() {
        let mut c = Countdown::ZERO;
        assert!(!c.tick(0));
    }
}

#[cfg(test)]
mod config {
    use crate::{AiConfig, SplineLimits};

    #[test]
    fn stock_values() {
        let cfg = AiConfig::default();
        assert_eq!(cfg.invoker_check_interval_ms, 1_000);
        assert_eq!(cfg.max_invoker_distance, 60.0);
        assert_eq!(cfg.despawn_fade_ms, 1_000);
        assert_eq!(cfg.spline_limits, SplineLimits { max_dx: 255.0, max_dy: 255.0, max_dz: 127.0 });
    }
}

#[cfg(test)]
mod movement {
    use crate::MoveMode;

    #[test]
    fn from_run_flag() {
        assert_eq!(MoveMode::from_run(true), MoveMode::Run);
        assert_eq!(MoveMode::from_run(false), MoveMode::Walk);
        assert_eq!(MoveMode::default(), MoveMode::Walk);
        assert_eq!(MoveMode::Run.to_string(), "run");
    }
}

#[cfg(test)]
mod error {
    use crate::{ActorId, CreatureId, SaiError};

    #[test]
    fn messages_name_the_id() {
        assert_eq!(SaiError::CreatureNotFound(CreatureId(3)).to_string(), "creature CreatureId(3) not found");
        assert_eq!(SaiError::ActorNotFound(ActorId(9)).to_string(), "actor ActorId(9) not found");
    }
}
