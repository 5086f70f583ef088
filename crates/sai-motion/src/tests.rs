//! Unit tests for sai-motion.

use sai_core::{ActorId, MoveMode, Position, SplineLimits};

use crate::{MotionConfig, MotionEngine, MotionInform, MotionKind, MotionMaster, PointId};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 1 unit per second walking, so 1000 ms moves exactly one unit.
fn slow_engine() -> MotionEngine {
    MotionEngine::new(MotionConfig { walk_speed: 1.0, run_speed: 4.0 })
}

fn nobody(_: ActorId) -> Option<Position> {
    None
}

fn p(x: f32, y: f32, z: f32) -> Position {
    Position::new(x, y, z)
}

// ── PointId ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod point_id {
    use super::*;

    #[test]
    fn raw_values() {
        assert_eq!(PointId::Waypoint(7).raw(), 7);
        assert_eq!(PointId::ReturnToOrigin.raw(), 0x00FF_FFFF);
        assert!(PointId::ReturnToOrigin.is_origin());
        assert!(!PointId::Waypoint(0x00FF_FFFF).is_origin());
    }
}

// ── Spline sharding ───────────────────────────────────────────────────────────

#[cfg(test)]
mod spline {
    use super::*;
    use crate::generate_path_points;
    use crate::spline::fits_limits;

    #[test]
    fn short_path_kept_whole() {
        let remaining = [p(10.0, 0.0, 0.0), p(20.0, 0.0, 0.0), p(30.0, 0.0, 0.0)];
        let seg = generate_path_points(Position::ORIGIN, &remaining, false, &SplineLimits::default());
        assert_eq!(seg.points.len(), 4);
        assert_eq!(seg.points[0], Position::ORIGIN);
        assert_eq!(seg.fraction, 1.0);
        assert_eq!(seg.waypoint_count(), 3);
    }

    #[test]
    fn interior_offset_too_large_forces_split() {
        // Midpoint of (0,0,0) and (0,0,0) is the origin; (300,0,0) is 300 away.
        let remaining = [p(300.0, 0.0, 0.0), p(0.0, 0.0, 0.0)];
        let seg = generate_path_points(Position::ORIGIN, &remaining, false, &SplineLimits::default());
        assert!(seg.points.len() < 3);
        assert!(seg.fraction < 1.0);
        assert_eq!(seg.points[1], p(300.0, 0.0, 0.0));
    }

    #[test]
    fn halving_keeps_longest_fitting_prefix() {
        // Whole path pulls the midpoint to ~1000 on x; half of it stays near 15.
        let remaining = [
            p(10.0, 0.0, 0.0),
            p(20.0, 0.0, 0.0),
            p(30.0, 0.0, 0.0),
            p(40.0, 0.0, 0.0),
            p(2000.0, 0.0, 0.0),
        ];
        let seg = generate_path_points(Position::ORIGIN, &remaining, false, &SplineLimits::default());
        assert_eq!(seg.fraction, 0.5);
        assert_eq!(seg.points.len(), 4);
        assert_eq!(seg.points[3], p(30.0, 0.0, 0.0));
        assert!(fits_limits(&seg.points, &SplineLimits::default()));
    }

    #[test]
    fn boundary_offset_is_rejected() {
        // Offset of exactly 255 on x is outside the packed range.
        let pts = [p(-255.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(255.0, 0.0, 0.0)];
        assert!(fits_limits(&pts, &SplineLimits::default()));
        let pts = [p(0.0, 0.0, 0.0), p(255.0, 0.0, 0.0), p(0.0, 0.0, 0.0)];
        assert!(!fits_limits(&pts, &SplineLimits::default()));
        let pts = [p(0.0, 0.0, 0.0), p(0.0, 0.0, 127.0), p(0.0, 0.0, 0.0)];
        assert!(!fits_limits(&pts, &SplineLimits::default()));
        let pts = [p(0.0, 0.0, 0.0), p(0.0, 0.0, 126.0), p(0.0, 0.0, 0.0)];
        assert!(fits_limits(&pts, &SplineLimits::default()));
    }

    #[test]
    fn flying_skips_sharding() {
        let remaining = [p(300.0, 0.0, 0.0), p(0.0, 0.0, 0.0)];
        let seg = generate_path_points(Position::ORIGIN, &remaining, true, &SplineLimits::default());
        assert_eq!(seg.points.len(), 3);
        assert_eq!(seg.fraction, 1.0);
    }

    #[test]
    fn accepted_segment_always_fits() {
        let remaining: Vec<Position> = (1..=20)
            .map(|i| p(if i % 2 == 0 { 400.0 } else { -400.0 }, i as f32, 0.0))
            .collect();
        let seg = generate_path_points(Position::ORIGIN, &remaining, false, &SplineLimits::default());
        assert!(seg.points.len() >= 2);
        assert!(seg.points.len() <= 2 || fits_limits(&seg.points, &SplineLimits::default()));
        assert_eq!(seg.points[1], remaining[0]);
    }

    #[test]
    fn single_waypoint_is_two_points() {
        let seg = generate_path_points(Position::ORIGIN, &[p(1000.0, 0.0, 0.0)], false, &SplineLimits::default());
        assert_eq!(seg.points.len(), 2);
    }
}

// ── MotionEngine ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use super::*;

    #[test]
    fn config_validation() {
        assert!(MotionConfig::default().validate().is_ok());
        let bad = MotionConfig { walk_speed: 0.0, run_speed: 7.0 };
        assert!(matches!(
            MotionEngine::try_new(bad),
            Err(crate::MotionError::InvalidSpeed { mode: MoveMode::Walk, .. })
        ));
    }

    #[test]
    fn starts_idle() {
        let e = slow_engine();
        assert_eq!(e.current_kind(), MotionKind::Idle);
        assert_eq!(e.active_slot_kind(), None);
        assert!(e.spline_finalized());
    }

    #[test]
    fn path_reports_each_point_once() {
        let mut e = slow_engine();
        let mut pos = Position::ORIGIN;
        e.move_path(&[pos, p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)], 4);
        assert_eq!(e.current_kind(), MotionKind::Path);
        assert!(!e.spline_finalized());

        let first = e.advance(1000, &mut pos, Position::ORIGIN, &nobody);
        assert_eq!(first, Some(MotionInform::new(MotionKind::Path, Some(PointId::Waypoint(4)))));
        assert!(!e.spline_finalized());

        let second = e.advance(1000, &mut pos, Position::ORIGIN, &nobody);
        assert_eq!(second, Some(MotionInform::new(MotionKind::Path, Some(PointId::Waypoint(5)))));
        assert!(e.spline_finalized());
        assert_eq!(e.current_kind(), MotionKind::Path);
        assert_eq!(pos, p(2.0, 0.0, 0.0));

        assert_eq!(e.advance(1000, &mut pos, Position::ORIGIN, &nobody), None);
    }

    #[test]
    fn at_most_one_arrival_per_advance() {
        let mut e = slow_engine();
        let mut pos = Position::ORIGIN;
        e.move_path(&[pos, p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)], 1);
        let inform = e.advance(60_000, &mut pos, Position::ORIGIN, &nobody);
        assert_eq!(inform.and_then(|i| i.point), Some(PointId::Waypoint(1)));
        assert_eq!(pos, p(1.0, 0.0, 0.0));
    }

    #[test]
    fn point_motion_expires_on_arrival() {
        let mut e = slow_engine();
        let mut pos = Position::ORIGIN;
        e.move_point(PointId::ReturnToOrigin, p(0.5, 0.0, 0.0));
        let inform = e.advance(1000, &mut pos, Position::ORIGIN, &nobody);
        assert_eq!(inform, Some(MotionInform::new(MotionKind::Point, Some(PointId::ReturnToOrigin))));
        assert_eq!(e.current_kind(), MotionKind::Idle);
    }

    #[test]
    fn run_mode_is_faster() {
        let mut e = slow_engine();
        e.set_move_mode(MoveMode::Run);
        let mut pos = Position::ORIGIN;
        e.move_point(PointId::Waypoint(1), p(10.0, 0.0, 0.0));
        e.advance(1000, &mut pos, Position::ORIGIN, &nobody);
        assert!((pos.x - 4.0).abs() < 1e-4);
    }

    #[test]
    fn stop_halts_but_keeps_generator() {
        let mut e = slow_engine();
        let mut pos = Position::ORIGIN;
        e.move_point(PointId::Waypoint(1), p(10.0, 0.0, 0.0));
        e.stop();
        assert!(e.spline_finalized());
        assert_eq!(e.active_slot_kind(), Some(MotionKind::Point));
        assert_eq!(e.advance(1000, &mut pos, Position::ORIGIN, &nobody), None);
        assert_eq!(pos, Position::ORIGIN);

        e.movement_expired();
        assert_eq!(e.active_slot_kind(), None);
    }

    #[test]
    fn follow_reports_arrival_once() {
        let mut e = slow_engine();
        let mut pos = Position::ORIGIN;
        let leader = ActorId(9);
        e.move_follow(leader, 1.0, 0.0);
        let locate = |id: ActorId| (id == leader).then_some(p(1.0, 0.0, 0.0));
        // Slot is (2,0,0): two seconds away.
        assert_eq!(e.advance(1000, &mut pos, Position::ORIGIN, &locate), None);
        let arrived = e.advance(1000, &mut pos, Position::ORIGIN, &locate);
        assert_eq!(arrived, Some(MotionInform::new(MotionKind::Follow, None)));
        assert_eq!(e.advance(1000, &mut pos, Position::ORIGIN, &locate), None);
        assert_eq!(e.current_kind(), MotionKind::Follow);
    }

    #[test]
    fn follow_target_lost_goes_idle() {
        let mut e = slow_engine();
        let mut pos = Position::ORIGIN;
        e.move_follow(ActorId(3), 1.0, 0.0);
        e.advance(100, &mut pos, Position::ORIGIN, &nobody);
        assert_eq!(e.current_kind(), MotionKind::Idle);
    }

    #[test]
    fn chase_stops_at_melee_reach() {
        let mut e = slow_engine();
        let mut pos = Position::ORIGIN;
        e.move_chase(ActorId(2));
        let locate = |_: ActorId| Some(p(3.0, 0.0, 0.0));
        for _ in 0..5 {
            e.advance(1000, &mut pos, Position::ORIGIN, &locate);
        }
        assert!((pos.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn home_reports_and_expires() {
        let mut e = slow_engine();
        let mut pos = p(0.5, 0.0, 0.0);
        e.move_home();
        let inform = e.advance(1000, &mut pos, Position::ORIGIN, &nobody);
        assert_eq!(inform, Some(MotionInform::new(MotionKind::Home, None)));
        assert_eq!(pos, Position::ORIGIN);
        assert_eq!(e.current_kind(), MotionKind::Idle);
    }
}
