//! Platform abstraction layer
//!
//! The host owns the window, input devices, randomness and drawing. The
//! simulation only sees it through these traits:
//! - `InputSource`: raw button state for one frame
//! - `RandomSource`: uniform floats for the stacked-ball tie-break
//! - `Canvas`: immediate-mode drawing primitives

use rand::Rng;
use rand_pcg::Pcg32;

use crate::sim::TickInput;

/// Opaque palette index passed through to the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u8);

impl Color {
    pub const BLACK: Color = Color(0);
    pub const WHITE: Color = Color(7);
}

/// Per-frame input polling
pub trait InputSource {
    fn poll_input(&mut self) -> TickInput;
}

/// Uniform random floats
pub trait RandomSource {
    /// Uniform value in `[lo, hi]`
    fn uniform(&mut self, lo: f32, hi: f32) -> f32;
}

impl RandomSource for Pcg32 {
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        self.random_range(lo..=hi)
    }
}

/// Everything `Simulation::update` needs from the host
pub trait Host: InputSource + RandomSource {}

impl<T: InputSource + RandomSource> Host for T {}

/// Drawing primitives. Coordinates are in arena pixels.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color);
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
}
