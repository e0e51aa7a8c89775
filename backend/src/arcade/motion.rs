//! Actor steering, entity advancement and collision resolution.
//!
//! Pure update functions over explicit state, so every rule here is
//! unit-testable without a rendering surface.

use crate::arcade::engine::{InputState, Surface};
use crate::models::entity::SimEntity;

/// The player-controlled actor.
///
/// The actor chases a target x position set by keyboard or pointer input
/// using exponential damping, and never leaves the playfield bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    target_x: f64,
    /// Target displacement per tick while a key is held
    keyboard_speed: f64,
}

/// Vertical offset of the actor above the bottom edge.
const ACTOR_BASELINE: f64 = 80.0;

impl Actor {
    /// Place the actor at the bottom center of the surface.
    pub fn new(surface: &Surface, radius: f64, keyboard_speed: f64) -> Self {
        Self {
            x: surface.width / 2.0,
            y: surface.height - ACTOR_BASELINE,
            radius,
            target_x: surface.width / 2.0,
            keyboard_speed,
        }
    }

    /// Apply one frame of input: move the target, clamp it into bounds, then
    /// damp the position toward it.
    pub fn steer(&mut self, input: &InputState, surface: &Surface, damping: f64) {
        if let Some(pointer_x) = input.pointer_x {
            self.target_x = pointer_x;
        }
        if input.left {
            self.target_x -= self.keyboard_speed;
        }
        if input.right {
            self.target_x += self.keyboard_speed;
        }

        self.target_x = self.target_x.clamp(self.radius, surface.width - self.radius);
        self.x += (self.target_x - self.x) * damping;
    }

    /// Pull the actor (and its target) back inside new bounds after a
    /// mid-run resize. Out-of-bounds positions are reclamped, not errors.
    pub fn reclamp(&mut self, surface: &Surface) {
        self.x = self.x.clamp(self.radius, surface.width - self.radius);
        self.target_x = self.target_x.clamp(self.radius, surface.width - self.radius);
        self.y = surface.height - ACTOR_BASELINE;
    }

    pub fn target_x(&self) -> f64 {
        self.target_x
    }
}

/// Distance-vs-combined-radius overlap test with a tolerance factor.
///
/// The tolerance (< 1.0) shrinks the effective contact distance so overlap
/// registers slightly before exact radius contact. A center distance exactly
/// equal to `(r_a + r_e) * tolerance` counts as a collision.
pub fn overlaps(actor: &Actor, entity: &SimEntity, tolerance: f64) -> bool {
    let dx = actor.x - entity.x;
    let dy = actor.y - entity.y;
    let distance = (dx * dx + dy * dy).sqrt();
    distance <= (actor.radius + entity.radius) * tolerance
}

/// Advance every live entity and resolve actor overlap.
///
/// Collided entities are removed and returned in encounter order for the
/// scoring machine; entities fallen past the bottom edge (plus `cull_margin`)
/// are removed without dispatch.
pub fn advance_entities(
    entities: &mut Vec<SimEntity>,
    actor: &Actor,
    surface: &Surface,
    tolerance: f64,
    cull_margin: f64,
) -> Vec<SimEntity> {
    let mut collided = Vec::new();

    let mut i = 0;
    while i < entities.len() {
        entities[i].y += entities[i].speed;

        if overlaps(actor, &entities[i], tolerance) {
            collided.push(entities.remove(i));
        } else if entities[i].y - entities[i].radius > surface.height + cull_margin {
            entities.remove(i);
        } else {
            i += 1;
        }
    }

    collided
}

/// Hazards within a rectangular neighborhood of a pickup position.
///
/// Used as a behavioral proxy: collecting with hazards close by is
/// risk-seeking behavior worth recording.
pub fn count_nearby_hazards(entities: &[SimEntity], x: f64, y: f64, dx: f64, dy: f64) -> usize {
    entities
        .iter()
        .filter(|e| e.kind.is_hazard() && (e.x - x).abs() < dx && (e.y - y).abs() < dy)
        .count()
}
