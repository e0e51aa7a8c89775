//! Actor steering and collision-resolution tests

use wellbeing_sim_core_rs::arcade::motion::{advance_entities, count_nearby_hazards, overlaps, Actor};
use wellbeing_sim_core_rs::arcade::InputState;
use wellbeing_sim_core_rs::{EntityKind, SimEntity, Surface};

fn surface() -> Surface {
    Surface {
        width: 800.0,
        height: 600.0,
    }
}

fn entity(x: f64, y: f64, speed: f64, kind: EntityKind) -> SimEntity {
    SimEntity {
        id: 0,
        x,
        y,
        speed,
        radius: kind.radius(),
        kind,
        value: kind.base_value(),
        spawned_at_ms: 0,
    }
}

#[test]
fn test_actor_converges_on_pointer_target() {
    let s = surface();
    let mut actor = Actor::new(&s, 30.0, 8.0);
    let input = InputState {
        pointer_x: Some(700.0),
        ..Default::default()
    };

    for _ in 0..100 {
        actor.steer(&input, &s, 0.2);
    }
    assert!((actor.x - 700.0).abs() < 1.0);
}

#[test]
fn test_keyboard_steering_moves_target() {
    let s = surface();
    let mut actor = Actor::new(&s, 30.0, 8.0);
    let input = InputState {
        left: true,
        ..Default::default()
    };

    actor.steer(&input, &s, 0.2);
    assert_eq!(actor.target_x(), 392.0);
    assert!(actor.x < 400.0);
}

#[test]
fn test_actor_never_leaves_bounds() {
    let s = surface();
    let mut actor = Actor::new(&s, 30.0, 8.0);
    let input = InputState {
        right: true,
        ..Default::default()
    };

    for _ in 0..500 {
        actor.steer(&input, &s, 0.2);
        assert!(actor.x >= 30.0 && actor.x <= s.width - 30.0);
    }
    // Fully saturated against the right edge
    assert!((actor.x - (s.width - 30.0)).abs() < 1.0);
}

/// Property 7: a center distance exactly equal to
/// `combined_radii * tolerance` registers as a collision; marginally larger
/// does not.
#[test]
fn test_collision_boundary() {
    let s = surface();
    let actor = Actor::new(&s, 30.0, 8.0);
    let tolerance = 0.8;
    let kind = EntityKind::Hazard;
    let contact = (30.0 + kind.radius()) * tolerance;

    let at_contact = entity(actor.x - contact, actor.y, 0.0, kind);
    assert!(overlaps(&actor, &at_contact, tolerance));

    let just_outside = entity(actor.x - contact - 0.001, actor.y, 0.0, kind);
    assert!(!overlaps(&actor, &just_outside, tolerance));
}

#[test]
fn test_collided_entities_removed_and_returned() {
    let s = surface();
    let actor = Actor::new(&s, 30.0, 8.0);

    let mut entities = vec![
        // Will land on the actor after one advance step
        entity(actor.x, actor.y - 10.0, 5.0, EntityKind::Collectible),
        // Far away, keeps falling
        entity(100.0, 100.0, 3.0, EntityKind::Hazard),
    ];

    let collided = advance_entities(&mut entities, &actor, &s, 0.8, 50.0);

    assert_eq!(collided.len(), 1);
    assert_eq!(collided[0].kind, EntityKind::Collectible);
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].kind, EntityKind::Hazard);
    assert_eq!(entities[0].y, 103.0);
}

#[test]
fn test_fallen_entities_culled_without_dispatch() {
    let s = surface();
    let actor = Actor::new(&s, 30.0, 8.0);

    let mut entities = vec![entity(50.0, s.height + 60.0, 10.0, EntityKind::Bonus)];
    let collided = advance_entities(&mut entities, &actor, &s, 0.8, 50.0);

    assert!(collided.is_empty());
    assert!(entities.is_empty());
}

#[test]
fn test_nearby_hazards_respect_neighborhood() {
    let entities = vec![
        entity(200.0, 200.0, 0.0, EntityKind::Hazard),
        entity(310.0, 200.0, 0.0, EntityKind::Hazard), // 110 < 120 away
        entity(330.0, 200.0, 0.0, EntityKind::Hazard), // 130 > 120 away
        entity(200.0, 345.0, 0.0, EntityKind::Hazard), // 145 < 150 below
        entity(200.0, 360.0, 0.0, EntityKind::Hazard), // 160 > 150 below
        entity(205.0, 205.0, 0.0, EntityKind::Collectible),
    ];

    assert_eq!(count_nearby_hazards(&entities, 200.0, 200.0, 120.0, 150.0), 3);
}

#[test]
fn test_resize_pulls_actor_back_in_bounds() {
    let s = surface();
    let mut actor = Actor::new(&s, 30.0, 8.0);

    // Drift to the far right, then shrink the playfield under the actor
    let input = InputState {
        pointer_x: Some(770.0),
        ..Default::default()
    };
    for _ in 0..100 {
        actor.steer(&input, &s, 0.2);
    }

    let narrow = Surface {
        width: 300.0,
        height: 400.0,
    };
    actor.reclamp(&narrow);

    assert!(actor.x <= narrow.width - 30.0);
    assert!(actor.target_x() <= narrow.width - 30.0);

    // Steering afterwards stays inside the new bounds
    actor.steer(&input, &narrow, 0.2);
    assert!(actor.x <= narrow.width - 30.0);
}
