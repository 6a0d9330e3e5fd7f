//! Interaction configuration
//!
//! Timings for the quiz's deferred visual effects and the particle burst
//! geometry. Defaults match the page's CSS animation durations.

use serde::{Deserialize, Serialize};

use crate::error::{InteractionError, InteractionResult};

/// Delays (milliseconds) for the quiz's deferred effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizTiming {
    /// Exit animation length between hiding one question and showing the next
    pub transition_ms: u64,
    /// Delay before the correct option is revealed after a wrong answer
    pub reveal_correct_ms: u64,
    /// Delay before the explanation panel appears
    pub explanation_ms: u64,
    /// Delay before the next button appears
    pub next_button_ms: u64,
    /// Lifetime of the correct-answer particle burst
    pub particle_lifetime_ms: u64,
}

impl Default for QuizTiming {
    fn default() -> Self {
        Self {
            transition_ms: 400,
            reveal_correct_ms: 300,
            explanation_ms: 400,
            next_button_ms: 600,
            particle_lifetime_ms: 1000,
        }
    }
}

impl QuizTiming {
    /// All delays set to zero; every deferred effect fires on the next tick
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            transition_ms: 0,
            reveal_correct_ms: 0,
            explanation_ms: 0,
            next_button_ms: 0,
            particle_lifetime_ms: 0,
        }
    }

    /// Set the question transition delay
    #[must_use]
    pub const fn with_transition_ms(mut self, ms: u64) -> Self {
        self.transition_ms = ms;
        self
    }

    /// Longest delay of any effect scheduled by a single answer
    #[must_use]
    pub fn settle_ms(&self) -> u64 {
        self.reveal_correct_ms
            .max(self.explanation_ms)
            .max(self.next_button_ms)
            .max(self.particle_lifetime_ms)
    }
}

/// Geometry of the correct-answer particle burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles, spread evenly around a circle
    pub count: usize,
    /// Minimum travel distance in pixels
    pub base_distance: f64,
    /// Random extra travel distance in pixels, added to `base_distance`
    pub jitter: f64,
    /// Seed for the jitter generator
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 12,
            base_distance: 60.0,
            jitter: 20.0,
            seed: 0x5eed,
        }
    }
}

impl ParticleConfig {
    /// Set the particle count
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the jitter seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Top-level configuration for the interaction components
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Quiz effect timings
    pub quiz: QuizTiming,
    /// Particle burst geometry
    pub particles: ParticleConfig,
}

impl InteractionConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the quiz timings
    #[must_use]
    pub const fn with_timing(mut self, timing: QuizTiming) -> Self {
        self.quiz = timing;
        self
    }

    /// Replace the particle configuration
    #[must_use]
    pub const fn with_particles(mut self, particles: ParticleConfig) -> Self {
        self.particles = particles;
        self
    }

    /// Parse a configuration from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> InteractionResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| InteractionError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that particle geometry is usable
    pub fn validate(&self) -> InteractionResult<()> {
        let p = &self.particles;
        if !p.base_distance.is_finite() || p.base_distance < 0.0 {
            return Err(InteractionError::config(format!(
                "particles.base_distance must be a non-negative number, got {}",
                p.base_distance
            )));
        }
        if !p.jitter.is_finite() || p.jitter < 0.0 {
            return Err(InteractionError::config(format!(
                "particles.jitter must be a non-negative number, got {}",
                p.jitter
            )));
        }
        Ok(())
    }
}
