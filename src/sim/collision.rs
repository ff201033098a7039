//! Ball-ball collision detection and response
//!
//! Overlapping balls of different tiers get a velocity impulse along the
//! contact normal proportional to their penetration depth. They are not
//! moved apart directly; separation emerges over the following ticks.
//! Overlapping balls of the same tier are reported as a merge and left
//! untouched, since the caller decides which merges to accept.

use glam::Vec2;

use super::state::Ball;
use crate::consts::{MIN_SEPARATION, STACK_JITTER, STACK_THRESHOLD};
use crate::platform::RandomSource;

/// Outcome of a pair check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// No contact, or contact already resolved with an impulse
    None,
    /// Same-tier overlap; the pair should merge
    Merge,
}

/// Contact geometry between two circles
#[derive(Debug, Clone, Copy)]
struct Overlap {
    /// Unit vector from `b` toward `a`
    normal: Vec2,
    /// Positive when the circles intersect
    penetration: f32,
}

fn overlap<R: RandomSource + ?Sized>(a: &Ball, b: &Ball, rng: &mut R) -> Option<Overlap> {
    let mut delta = a.pos - b.pos;
    if delta.x.abs() < STACK_THRESHOLD {
        // Balls stacked straight up: pick a random side so they can slide off
        delta.x = rng.uniform(-STACK_JITTER, STACK_JITTER);
    }

    let distance = delta.length();
    if distance < MIN_SEPARATION {
        return None;
    }

    Some(Overlap {
        normal: delta / distance,
        penetration: (a.radius + b.radius) - distance,
    })
}

/// Check a pair of balls and apply the separation impulse if needed
pub fn resolve_pair<R: RandomSource + ?Sized>(a: &mut Ball, b: &mut Ball, rng: &mut R) -> Contact {
    debug_assert_ne!(a.id, b.id, "ball paired with itself");

    let Some(hit) = overlap(a, b, rng) else {
        return Contact::None;
    };
    if hit.penetration <= 0.0 {
        return Contact::None;
    }
    if a.tier == b.tier {
        return Contact::Merge;
    }

    let push = hit.penetration * hit.normal;
    a.vel += push;
    b.vel -= push;

    Contact::None
}
