use glam::Vec2;
use rand::Rng;
use serde::Deserialize;

use crate::core::canvas::Rgba;
use crate::core::timer::{Countdown, Interval};

/// Hero-section particles that float up and are removed after a lifetime
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub interval_ms: f32,
    pub max_particles: usize,
    pub lifetime_ms: f32,
    /// Upper bound of the random start delay, seconds
    pub max_delay: f32,
    /// Shortest float duration, seconds
    pub min_duration: f32,
    /// Random extra duration on top of `min_duration`, seconds
    pub duration_jitter: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            interval_ms: 500.0,
            max_particles: 20,
            lifetime_ms: 8000.0,
            max_delay: 6.0,
            min_duration: 4.0,
            duration_jitter: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftParticle {
    pub id: u64,
    /// Horizontal position as a percentage of the container width
    pub left: f32,
    pub delay: f32,
    pub duration: f32,
    pub born_at: f32,
    pub expiry: Countdown,
}

impl DriftParticle {
    /// Phase of the float cycle at `now`, or `None` while still delayed
    pub fn phase(&self, now: f32) -> Option<f32> {
        let running = now - self.born_at - self.delay;
        if running < 0.0 || self.duration <= 0.0 {
            return None;
        }
        Some((running % self.duration) / self.duration)
    }
}

/// Spawns drift particles on a fixed cadence up to a cap
#[derive(Debug, Clone)]
pub struct DriftSpawner {
    config: DriftConfig,
    interval: Interval,
    particles: Vec<DriftParticle>,
    next_id: u64,
}

impl DriftSpawner {
    pub fn new(config: DriftConfig, now: f32) -> Self {
        Self {
            config,
            interval: Interval::new(now, config.interval_ms / 1000.0),
            particles: Vec::new(),
            next_id: 0,
        }
    }

    /// Remove expired particles, then spawn one per elapsed interval while
    /// under the cap. Returns how many were spawned.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) -> usize {
        self.particles.retain_mut(|p| !p.expiry.tick(now));

        let mut spawned = 0;
        for _ in 0..self.interval.tick(now) {
            if self.particles.len() >= self.config.max_particles {
                continue;
            }
            let particle = DriftParticle {
                id: self.next_id,
                left: rng.gen::<f32>() * 100.0,
                delay: rng.gen::<f32>() * self.config.max_delay,
                duration: rng.gen::<f32>() * self.config.duration_jitter + self.config.min_duration,
                born_at: now,
                expiry: Countdown::new(now, self.config.lifetime_ms / 1000.0),
            };
            self.next_id += 1;
            self.particles.push(particle);
            spawned += 1;
        }
        spawned
    }

    pub fn particles(&self) -> &[DriftParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }
}

/// Free-floating dots bouncing around a container, in percent coordinates
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    pub count: usize,
    /// Velocity range per axis is `(-speed/2, speed/2)` percent per step
    pub speed: f32,
    /// Dot diameter in pixels
    pub size: f32,
    pub color: u32,
    pub opacity: f32,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            count: 30,
            speed: 0.5,
            size: 1.0,
            color: 0x00FF88,
            opacity: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceParticle {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl BounceParticle {
    fn step(&mut self) {
        self.position += self.velocity;
        if self.position.x <= 0.0 || self.position.x >= 100.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y <= 0.0 || self.position.y >= 100.0 {
            self.velocity.y = -self.velocity.y;
        }
        self.position = self.position.clamp(Vec2::ZERO, Vec2::splat(100.0));
    }
}

/// Runs until destroyed
#[derive(Debug, Clone)]
pub struct BouncePool {
    config: BounceConfig,
    particles: Vec<BounceParticle>,
}

impl BouncePool {
    pub fn new<R: Rng + ?Sized>(config: BounceConfig, rng: &mut R) -> Self {
        let particles = (0..config.count)
            .map(|_| BounceParticle {
                position: Vec2::new(rng.gen::<f32>() * 100.0, rng.gen::<f32>() * 100.0),
                velocity: Vec2::new(
                    (rng.gen::<f32>() - 0.5) * config.speed,
                    (rng.gen::<f32>() - 0.5) * config.speed,
                ),
            })
            .collect();

        Self { config, particles }
    }

    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.step();
        }
    }

    /// Remove every particle; the pool stays empty afterwards
    pub fn destroy(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[BounceParticle] {
        &self.particles
    }

    pub fn color(&self) -> Rgba {
        Rgba::hex(self.config.color, self.config.opacity)
    }

    pub fn size(&self) -> f32 {
        self.config.size
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawns_one_per_interval() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut spawner = DriftSpawner::new(DriftConfig::default(), 0.0);

        assert_eq!(spawner.tick(0.4, &mut rng), 0);
        assert_eq!(spawner.tick(0.5, &mut rng), 1);
        assert_eq!(spawner.tick(1.6, &mut rng), 2);
        assert_eq!(spawner.len(), 3);
    }

    #[test]
    fn never_exceeds_cap() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = DriftConfig {
            lifetime_ms: 60_000.0,
            ..DriftConfig::default()
        };
        let mut spawner = DriftSpawner::new(config, 0.0);

        let mut now = 0.0;
        for _ in 0..200 {
            now += 0.25;
            spawner.tick(now, &mut rng);
            assert!(spawner.len() <= 20);
        }
        assert_eq!(spawner.len(), 20);

        // A long stall does not overshoot either
        spawner.tick(now + 30.0, &mut rng);
        assert_eq!(spawner.len(), 20);
    }

    #[test]
    fn particles_expire_after_lifetime() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut spawner = DriftSpawner::new(DriftConfig::default(), 0.0);
        spawner.tick(0.5, &mut rng);
        assert_eq!(spawner.len(), 1);

        // Nothing new is due between 8.5 and 8.9, but the first one is gone
        let mut steady = DriftSpawner::new(DriftConfig { interval_ms: 100_000.0, ..DriftConfig::default() }, 0.0);
        steady.particles.push(spawner.particles()[0]);
        steady.tick(8.49, &mut rng);
        assert_eq!(steady.len(), 1);
        steady.tick(8.5, &mut rng);
        assert!(steady.is_empty());
    }

    #[test]
    fn drift_parameters_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut spawner = DriftSpawner::new(DriftConfig::default(), 0.0);
        spawner.tick(10.0, &mut rng);

        for p in spawner.particles() {
            assert!((0.0..100.0).contains(&p.left));
            assert!((0.0..6.0).contains(&p.delay));
            assert!((4.0..8.0).contains(&p.duration));
        }
    }

    #[test]
    fn phase_waits_for_delay() {
        let p = DriftParticle {
            id: 0,
            left: 50.0,
            delay: 1.0,
            duration: 4.0,
            born_at: 2.0,
            expiry: Countdown::new(2.0, 8.0),
        };
        assert_eq!(p.phase(2.5), None);
        assert_eq!(p.phase(3.0), Some(0.0));
        assert_eq!(p.phase(5.0), Some(0.5));
    }

    #[test]
    fn bounce_reflects_and_clamps() {
        let mut particle = BounceParticle {
            position: Vec2::new(99.9, 0.2),
            velocity: Vec2::new(0.25, -0.25),
        };
        particle.step();
        assert_eq!(particle.position, Vec2::new(100.0, 0.0));
        assert_eq!(particle.velocity, Vec2::new(-0.25, 0.25));
    }

    #[test]
    fn bounce_pool_stays_inside_container() {
        let mut rng = StdRng::seed_from_u64(21);
        let config = BounceConfig { count: 50, speed: 4.0, ..BounceConfig::default() };
        let mut pool = BouncePool::new(config, &mut rng);
        assert_eq!(pool.len(), 50);

        for _ in 0..1000 {
            pool.step();
        }
        for p in pool.particles() {
            assert!((0.0..=100.0).contains(&p.position.x));
            assert!((0.0..=100.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= 2.0 && p.velocity.y.abs() <= 2.0);
        }
    }

    #[test]
    fn destroy_empties_pool() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut pool = BouncePool::new(BounceConfig::default(), &mut rng);
        pool.destroy();
        assert!(pool.is_empty());
        pool.step();
        assert!(pool.is_empty());
    }
}
