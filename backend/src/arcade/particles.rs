//! Cosmetic particle bursts.
//!
//! Particles are visual feedback on scoring events. They decay every tick,
//! the pool is hard-capped, and nothing in scoring or risk computation ever
//! reads them.

use crate::models::entity::Particle;
use crate::rng::GameRng;

/// Emit a radial burst of particles at a position.
///
/// Respects the pool cap: a burst that would overflow it is truncated.
pub fn burst(
    pool: &mut Vec<Particle>,
    x: f64,
    y: f64,
    count: usize,
    max_particles: usize,
    rng: &mut GameRng,
) {
    for i in 0..count {
        if pool.len() >= max_particles {
            return;
        }
        let angle = std::f64::consts::TAU * i as f64 / count as f64 + rng.unit_f64() * 0.5;
        let speed = 2.0 + rng.unit_f64() * 4.0;
        pool.push(Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed - 1.0,
            life: 1.0,
            size: 3.0 + rng.unit_f64() * 4.0,
        });
    }
}

/// Advance and cull the pool for one tick.
pub fn step(pool: &mut Vec<Particle>) {
    for particle in pool.iter_mut() {
        particle.step();
    }
    pool.retain(Particle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_respects_cap() {
        let mut pool = Vec::new();
        let mut rng = GameRng::new(1);
        burst(&mut pool, 0.0, 0.0, 20, 16, &mut rng);
        assert_eq!(pool.len(), 16);
    }

    #[test]
    fn test_pool_drains_completely() {
        let mut pool = Vec::new();
        let mut rng = GameRng::new(1);
        burst(&mut pool, 100.0, 100.0, 15, 512, &mut rng);
        assert_eq!(pool.len(), 15);

        for _ in 0..51 {
            step(&mut pool);
        }
        assert!(pool.is_empty());
    }
}
