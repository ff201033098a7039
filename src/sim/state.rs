//! Simulation state and core entity types

use glam::Vec2;

use super::tick::tick;
use super::tier::{TIER_COUNT, TIERS, Tier};
use crate::consts::*;
use crate::platform::Host;
use crate::settings::Settings;

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Index into `TIERS`
    pub tier: usize,
    /// Copied from the tier when the ball is created
    pub radius: f32,
    /// Claimed by a merge during the current collision pass
    pub consumed: bool,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, tier: &Tier) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            tier: tier.index,
            radius: tier.radius,
            consumed: false,
        }
    }

    #[inline]
    pub fn tier(&self) -> &'static Tier {
        &TIERS[self.tier]
    }

    /// Snap tiny velocity components to zero, then move
    pub fn integrate(&mut self) {
        if self.vel.x.abs() < VELOCITY_FLOOR {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < VELOCITY_FLOOR {
            self.vel.y = 0.0;
        }
        self.pos += self.vel;
    }

    /// Keep the ball inside the arena.
    ///
    /// The floor bounces at half speed and bleeds horizontal speed; the side
    /// walls only clamp position.
    pub fn resolve_boundary(&mut self, width: f32, height: f32) {
        if self.pos.y + self.radius > height {
            self.pos.y = height - self.radius;
            self.vel.y = -self.vel.y * FLOOR_RESTITUTION;
            self.vel.x *= FLOOR_FRICTION;
        }
        if self.pos.x + self.radius > width {
            self.pos.x = width - self.radius;
        } else if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
        }
    }
}

/// Drop cooldown meter
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub value: f32,
    pub max: f32,
    pub rate: f32,
    /// Screen placement of the meter
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new(GAUGE_MAX, GAUGE_RATE)
    }
}

impl Gauge {
    pub fn new(max: f32, rate: f32) -> Self {
        Self {
            value: 0.0,
            max,
            rate,
            x: GAUGE_X,
            y: GAUGE_Y,
            height: GAUGE_HEIGHT,
        }
    }

    /// Charge by one step; no-op once full
    pub fn tick(&mut self) {
        if self.value < self.max {
            self.value = (self.value + self.rate).min(self.max);
        }
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }
}

/// Notable things that happened during a tick (for sound/effects hooks)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Player dropped a new ball
    Dropped { id: u32, pos: Vec2 },
    /// Two balls merged into a new one of `tier`
    Merged {
        consumed: (u32, u32),
        id: u32,
        tier: usize,
        pos: Vec2,
    },
    /// Two top-tier balls met and vanished
    TopTierCleared { consumed: (u32, u32), pos: Vec2 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub settings: Settings,
    /// Live balls in spawn order
    pub balls: Vec<Ball>,
    /// Drop cursor, clamped to `[0, width]`
    pub cursor_x: f32,
    pub gauge: Gauge,
    /// Update counter
    pub time_ticks: u64,
    pub(crate) events: Vec<SimEvent>,
    /// Next ball ID
    next_id: u32,
}

impl Simulation {
    pub fn new(settings: Settings) -> Self {
        log::info!(
            "Simulation created: arena {}x{}, gravity {}, drag {}",
            settings.width,
            settings.height,
            settings.gravity,
            settings.air_drag
        );
        Self {
            cursor_x: (settings.width / 2.0).floor(),
            gauge: Gauge::new(settings.gauge_max, settings.gauge_rate),
            settings,
            balls: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 0,
        }
    }

    /// Allocate a new ball ID
    pub fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a resting ball of `tier` at `pos`, returning its id
    pub fn spawn(&mut self, pos: Vec2, tier: &Tier) -> u32 {
        let id = self.next_ball_id();
        self.balls.push(Ball::new(id, pos, tier));
        id
    }

    /// Spawn by tier name; None if the name is unknown
    pub fn spawn_named(&mut self, pos: Vec2, name: &str) -> Option<u32> {
        let tier = Tier::by_name(name)?;
        Some(self.spawn(pos, tier))
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Advance one frame, reading input and randomness from the host
    pub fn update<H: Host>(&mut self, host: &mut H) {
        let input = host.poll_input();
        tick(self, &input, host);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of live balls per tier
    pub fn tier_counts(&self) -> [usize; TIER_COUNT] {
        let mut counts = [0; TIER_COUNT];
        for ball in &self.balls {
            counts[ball.tier] += 1;
        }
        counts
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
