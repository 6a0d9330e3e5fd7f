//! Correct-answer particle burst.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::ParticleConfig;

/// One decorative particle flying out from the chosen option's centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal travel in pixels
    pub dx: f64,
    /// Vertical travel in pixels
    pub dy: f64,
}

impl Particle {
    /// Inline style for a particle element, animated by the page's
    /// `particle-burst` keyframes through the `--tx`/`--ty` variables
    #[must_use]
    pub fn css_text(&self) -> String {
        format!(
            "position: absolute; width: 6px; height: 6px; \
             background: linear-gradient(135deg, #22d3ee, #06b6d4); border-radius: 50%; \
             top: 50%; left: 50%; transform: translate(-50%, -50%); \
             animation: particle-burst 1s ease-out forwards; \
             --tx: {:.1}px; --ty: {:.1}px; opacity: 0;",
            self.dx, self.dy
        )
    }

    /// Travel distance
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

/// Generates particle bursts with seeded jitter
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    config: ParticleConfig,
    rng: SmallRng,
}

impl ParticleEmitter {
    /// Create an emitter seeded from `config.seed`
    #[must_use]
    pub fn new(config: ParticleConfig) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(config.seed),
            config,
        }
    }

    /// Particles at evenly spaced angles, each travelling
    /// `base_distance + [0, jitter)` pixels
    pub fn burst(&mut self) -> Vec<Particle> {
        let count = self.config.count;
        (0..count)
            .map(|i| {
                let angle = (i as f64 / count as f64) * TAU;
                let extra = if self.config.jitter > 0.0 {
                    self.rng.gen_range(0.0..self.config.jitter)
                } else {
                    0.0
                };
                let distance = self.config.base_distance + extra;
                Particle {
                    dx: angle.cos() * distance,
                    dy: angle.sin() * distance,
                }
            })
            .collect()
    }
}
