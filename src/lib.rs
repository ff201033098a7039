//! Merge Drop - a merge-ball arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tiers, balls, collisions, per-frame pipeline)
//! - `renderer`: Scene drawing against a host-supplied canvas
//! - `platform`: Host abstraction (input polling, randomness, drawing primitives)
//! - `settings`: Data-driven physics and arena tuning

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::{Canvas, Color, Host, InputSource, RandomSource};
pub use settings::Settings;
pub use sim::{Simulation, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 256.0;
    pub const SCREEN_HEIGHT: f32 = 256.0;

    /// Downward acceleration added to every ball each tick
    pub const GRAVITY: f32 = 0.4;
    /// Velocity multiplier applied each tick after gravity
    pub const AIR_DRAG: f32 = 0.96;

    /// Velocity components below this magnitude snap to zero
    pub const VELOCITY_FLOOR: f32 = 0.2;
    /// Vertical speed kept after a floor bounce
    pub const FLOOR_RESTITUTION: f32 = 0.5;
    /// Horizontal speed kept after touching the floor
    pub const FLOOR_FRICTION: f32 = 0.5;

    /// Horizontal offsets below this count as vertical stacking
    pub const STACK_THRESHOLD: f32 = 1.0;
    /// Half-width of the random horizontal jitter used to break vertical stacks
    pub const STACK_JITTER: f32 = 2.0;
    /// Centers closer than this have no usable contact normal
    pub const MIN_SEPARATION: f32 = 1e-4;

    /// Cursor movement per tick while a direction is held
    pub const CURSOR_STEP: f32 = 2.0;
    /// Height at which dropped balls appear
    pub const SPAWN_HEIGHT: f32 = 10.0;

    /// Drop gauge defaults
    pub const GAUGE_MAX: f32 = 10.0;
    pub const GAUGE_RATE: f32 = 0.5;
    pub const GAUGE_X: f32 = 10.0;
    pub const GAUGE_Y: f32 = 10.0;
    pub const GAUGE_HEIGHT: f32 = 5.0;

    /// Height of the drop guide line
    pub const GUIDE_LINE_Y: f32 = 20.0;
    /// Size of the square cursor marker
    pub const CURSOR_SIZE: f32 = 10.0;

    /// Default RNG seed for the stack tie-break
    pub const DEFAULT_SEED: u64 = 0x5EED;
}
