//! Transient arcade objects: falling entities and cosmetic particles.
//!
//! Neither type is ever persisted. Entities live from spawn until collision
//! or until they fall out of the visible playfield; particles are purely
//! visual and must never feed into scoring or risk computation.

use serde::{Deserialize, Serialize};

/// Category of a spawned arcade entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Common low-value collectible
    Collectible,
    /// Rare high-value collectible
    Bonus,
    /// Hazard: breaks the combo streak on contact
    Hazard,
}

impl EntityKind {
    /// Base reward value before any combo bonus.
    pub fn base_value(&self) -> i64 {
        match self {
            EntityKind::Collectible => 10,
            EntityKind::Bonus => 50,
            EntityKind::Hazard => 0,
        }
    }

    /// Collision radius in playfield pixels.
    pub fn radius(&self) -> f64 {
        match self {
            EntityKind::Collectible => 17.5,
            EntityKind::Bonus => 20.0,
            EntityKind::Hazard => 22.5,
        }
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, EntityKind::Hazard)
    }

    /// Stable tag for telemetry payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Collectible => "collectible",
            EntityKind::Bonus => "bonus",
            EntityKind::Hazard => "hazard",
        }
    }
}

/// One live falling object.
#[derive(Debug, Clone, PartialEq)]
pub struct SimEntity {
    /// Unique id within the session (monotonic counter, not persisted)
    pub id: u64,
    /// Center x position
    pub x: f64,
    /// Center y position
    pub y: f64,
    /// Downward speed in pixels per frame-unit
    pub speed: f64,
    /// Collision radius
    pub radius: f64,
    pub kind: EntityKind,
    /// Reward value carried (base value at spawn time)
    pub value: i64,
    /// Session-relative spawn time in ms
    pub spawned_at_ms: u64,
}

/// One cosmetic particle. Bounded lifetime, decays every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining life in [0, 1]; culled at 0
    pub life: f64,
    pub size: f64,
}

impl Particle {
    /// Advance one tick: integrate velocity, apply gravity, decay life.
    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += 0.2;
        self.life -= 0.02;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_values() {
        assert_eq!(EntityKind::Collectible.base_value(), 10);
        assert_eq!(EntityKind::Bonus.base_value(), 50);
        assert_eq!(EntityKind::Hazard.base_value(), 0);
        assert!(EntityKind::Hazard.is_hazard());
        assert!(!EntityKind::Bonus.is_hazard());
    }

    #[test]
    fn test_particle_decays_to_death() {
        let mut p = Particle {
            x: 0.0,
            y: 0.0,
            vx: 1.0,
            vy: -1.0,
            life: 1.0,
            size: 4.0,
        };
        let mut steps = 0;
        while p.is_alive() {
            p.step();
            steps += 1;
            assert!(steps <= 51, "particle must expire within its bounded lifetime");
        }
        assert!(p.x > 0.0);
    }
}
