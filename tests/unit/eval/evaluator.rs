use super::*;
use crate::system::bodies::{SOLAR_SYSTEM, SUN};

#[test]
fn evaluates_one_placement_per_body_in_table_order() {
    let f = Evaluator::eval_frame(&SOLAR_SYSTEM, SUN, FrameIndex(0), 0.0);
    assert_eq!(f.placements.len(), SOLAR_SYSTEM.len());
    for (idx, (p, b)) in f.placements.iter().zip(SOLAR_SYSTEM.iter()).enumerate() {
        assert_eq!(p.body, idx);
        assert_eq!(p.name, b.name);
        assert_eq!(p.orbit_radius, b.scaled_radius());
        assert_eq!(p.position, Point::new(b.scaled_radius(), 0.0));
    }
}

#[test]
fn placements_follow_body_positions() {
    let t = 4.5;
    let f = Evaluator::eval_frame(&SOLAR_SYSTEM, SUN, FrameIndex(7), t);
    assert_eq!(f.frame, FrameIndex(7));
    assert_eq!(f.time_s, t);
    for (p, b) in f.placements.iter().zip(SOLAR_SYSTEM.iter()) {
        assert_eq!(p.position, b.position_at(t));
    }
}

#[test]
fn evaluation_is_deterministic() {
    let a = Evaluator::eval_frame(&SOLAR_SYSTEM, SUN, FrameIndex(3), 1.25);
    let b = Evaluator::eval_frame(&SOLAR_SYSTEM, SUN, FrameIndex(3), 1.25);
    assert_eq!(a, b);
}

#[test]
fn serializes_to_json() {
    let f = Evaluator::eval_frame(&SOLAR_SYSTEM[..1], SUN, FrameIndex(0), 0.0);
    let v = serde_json::to_value(&f).unwrap();
    assert_eq!(v["placements"][0]["name"], "Mercury");
    assert_eq!(v["central"]["name"], "Sun");
}
