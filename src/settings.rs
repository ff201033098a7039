//! Simulation settings
//!
//! Arena size and physics tuning, loadable from a JSON file. Missing fields
//! fall back to the defaults in `consts`.

use std::path::Path;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{MAX_TIER, TIERS};

/// Smallest arena side that still fits the largest ball
pub fn min_arena_size() -> f32 {
    2.0 * TIERS[MAX_TIER].radius
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub width: f32,
    pub height: f32,

    // === Physics ===
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Velocity multiplier per tick, in (0, 1]
    pub air_drag: f32,

    // === Dropping ===
    /// Cursor movement per tick
    pub cursor_step: f32,
    /// Y coordinate of newly dropped balls
    pub spawn_height: f32,
    pub gauge_max: f32,
    pub gauge_rate: f32,

    /// Seed for the host RNG
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            gravity: GRAVITY,
            air_drag: AIR_DRAG,
            cursor_step: CURSOR_STEP,
            spawn_height: SPAWN_HEIGHT,
            gauge_max: GAUGE_MAX,
            gauge_rate: GAUGE_RATE,
            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // Plain numeric fields always serialize
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.width > 0.0 && self.width.is_finite()) {
            log::warn!("Arena width {} invalid, using {}", self.width, defaults.width);
            self.width = defaults.width;
        }
        if !(self.height > 0.0 && self.height.is_finite()) {
            log::warn!("Arena height {} invalid, using {}", self.height, defaults.height);
            self.height = defaults.height;
        }
        let min_size = min_arena_size();
        if self.width < min_size {
            log::warn!(
                "Arena width {} too narrow for the largest ball, using {}",
                self.width,
                min_size
            );
            self.width = min_size;
        }
        if self.height < min_size {
            log::warn!(
                "Arena height {} too short for the largest ball, using {}",
                self.height,
                min_size
            );
            self.height = min_size;
        }
        if !self.gravity.is_finite() {
            log::warn!("Gravity {} invalid, using {}", self.gravity, defaults.gravity);
            self.gravity = defaults.gravity;
        }
        if !(self.air_drag > 0.0 && self.air_drag <= 1.0) {
            log::warn!("Air drag {} outside (0, 1], using {}", self.air_drag, defaults.air_drag);
            self.air_drag = defaults.air_drag;
        }
        if !(self.cursor_step >= 0.0 && self.cursor_step.is_finite()) {
            log::warn!("Cursor step {} invalid, using {}", self.cursor_step, defaults.cursor_step);
            self.cursor_step = defaults.cursor_step;
        }
        if !self.spawn_height.is_finite() {
            log::warn!(
                "Spawn height {} invalid, using {}",
                self.spawn_height,
                defaults.spawn_height
            );
            self.spawn_height = defaults.spawn_height;
        }
        if !(self.gauge_max > 0.0 && self.gauge_max.is_finite()) {
            log::warn!("Gauge max {} invalid, using {}", self.gauge_max, defaults.gauge_max);
            self.gauge_max = defaults.gauge_max;
        }
        if !(self.gauge_rate > 0.0 && self.gauge_rate.is_finite()) {
            log::warn!("Gauge rate {} invalid, using {}", self.gauge_rate, defaults.gauge_rate);
            self.gauge_rate = defaults.gauge_rate;
        }

        self
    }

    /// Build the seeded generator hosts use for `RandomSource`
    pub fn rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
