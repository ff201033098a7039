//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host frame
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (collection order, ids issued monotonically)
//! - No rendering or platform dependencies beyond the host traits

pub mod collision;
pub mod state;
pub mod tick;
pub mod tier;

pub use collision::{Contact, resolve_pair};
pub use state::{Ball, Gauge, SimEvent, Simulation};
pub use tick::{MergeEvent, TickInput, tick};
pub use tier::{MAX_TIER, TIER_COUNT, TIERS, Tier};
