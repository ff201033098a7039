//! Ball tiers
//!
//! Tiers are ranked by index; two balls of the same tier merge into one ball
//! of the next tier. The last tier never merges further.

use crate::platform::Color;

/// A size class for balls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    /// Rank in the tier table (0 = smallest)
    pub index: usize,
    pub name: &'static str,
    pub radius: f32,
    /// Palette id handed to the canvas untouched
    pub color: Color,
}

const fn tier(index: usize, name: &'static str, radius: f32, color: u8) -> Tier {
    Tier {
        index,
        name,
        radius,
        color: Color(color),
    }
}

/// Number of tiers
pub const TIER_COUNT: usize = 8;

/// Every tier, ordered by increasing size
pub static TIERS: [Tier; TIER_COUNT] = [
    tier(0, "red", 10.0, 8),
    tier(1, "orange", 12.0, 9),
    tier(2, "blue", 20.0, 12),
    tier(3, "purple", 30.0, 2),
    tier(4, "yellow", 36.0, 10),
    tier(5, "green", 42.0, 3),
    tier(6, "white", 50.0, 7),
    tier(7, "black", 60.0, 6),
];

/// Index of the largest tier
pub const MAX_TIER: usize = TIER_COUNT - 1;

impl Tier {
    /// Look up a tier by rank
    pub fn get(index: usize) -> Option<&'static Tier> {
        TIERS.get(index)
    }

    /// Look up a tier by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<&'static Tier> {
        TIERS.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// The tier two balls of this tier merge into, or None at the top
    pub fn next(&self) -> Option<&'static Tier> {
        if self.is_max() {
            None
        } else {
            TIERS.get(self.index + 1)
        }
    }

    #[inline]
    pub fn is_max(&self) -> bool {
        self.index == MAX_TIER
    }
}
