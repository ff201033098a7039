//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one host frame.

use glam::Vec2;

use super::collision::{Contact, resolve_pair};
use super::state::{SimEvent, Simulation};
use super::tier::{TIERS, Tier};
use crate::platform::RandomSource;

/// Input state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move cursor left (held)
    pub left: bool,
    /// Move cursor right (held)
    pub right: bool,
    /// Drop key released this frame
    pub drop_released: bool,
    /// Drop button pressed this frame
    pub drop_pressed: bool,
}

impl TickInput {
    #[inline]
    pub fn wants_drop(&self) -> bool {
        self.drop_released || self.drop_pressed
    }
}

/// A same-tier pair accepted for merging during the collision pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    pub consumed: (u32, u32),
    /// Midpoint of the two source balls
    pub pos: Vec2,
    /// Tier of the source balls
    pub tier: usize,
}

/// Advance the simulation by one frame
pub fn tick<R: RandomSource + ?Sized>(sim: &mut Simulation, input: &TickInput, rng: &mut R) {
    sim.time_ticks += 1;

    move_cursor(sim, input);
    drop_ball(sim, input);

    apply_forces(sim);
    let merges = collide(sim, rng);
    apply_merges(sim, &merges);

    let (width, height) = (sim.settings.width, sim.settings.height);
    for ball in &mut sim.balls {
        ball.integrate();
        ball.resolve_boundary(width, height);
    }
}

fn move_cursor(sim: &mut Simulation, input: &TickInput) {
    let step = sim.settings.cursor_step;
    if input.left {
        sim.cursor_x -= step;
    }
    if input.right {
        sim.cursor_x += step;
    }
    sim.cursor_x = sim.cursor_x.clamp(0.0, sim.settings.width);
}

/// Charge the gauge, or drop a ball once it is full
fn drop_ball(sim: &mut Simulation, input: &TickInput) {
    if !sim.gauge.is_full() {
        sim.gauge.tick();
        return;
    }
    if !input.wants_drop() {
        return;
    }

    let pos = Vec2::new(sim.cursor_x, sim.settings.spawn_height);
    let id = sim.spawn(pos, &TIERS[0]);
    sim.gauge.reset();
    log::debug!("Dropped ball {} at x={}", id, pos.x);
    sim.events.push(SimEvent::Dropped { id, pos });
}

/// Gravity, then air drag
fn apply_forces(sim: &mut Simulation) {
    let gravity = sim.settings.gravity;
    let drag = sim.settings.air_drag;
    for ball in &mut sim.balls {
        ball.vel.y += gravity;
        ball.vel *= drag;
    }
}

/// Run every unordered pair once, in collection order.
///
/// A ball is claimed by the first merge it takes part in and skipped by all
/// later pairs of the pass.
fn collide<R: RandomSource + ?Sized>(sim: &mut Simulation, rng: &mut R) -> Vec<MergeEvent> {
    let mut merges = Vec::new();
    let n = sim.balls.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = sim.balls.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            if a.consumed || b.consumed {
                continue;
            }
            if resolve_pair(a, b, rng) == Contact::Merge {
                a.consumed = true;
                b.consumed = true;
                merges.push(MergeEvent {
                    consumed: (a.id, b.id),
                    pos: (a.pos + b.pos) / 2.0,
                    tier: a.tier,
                });
            }
        }
    }

    merges
}

/// Remove claimed balls and spawn their replacements
fn apply_merges(sim: &mut Simulation, merges: &[MergeEvent]) {
    if merges.is_empty() {
        return;
    }
    sim.balls.retain(|b| !b.consumed);

    for merge in merges {
        let event = match Tier::get(merge.tier).and_then(Tier::next) {
            Some(next) => {
                let id = sim.spawn(merge.pos, next);
                log::debug!(
                    "Merged {:?} into ball {} ({})",
                    merge.consumed,
                    id,
                    next.name
                );
                SimEvent::Merged {
                    consumed: merge.consumed,
                    id,
                    tier: next.index,
                    pos: merge.pos,
                }
            }
            None => {
                log::debug!("Top tier pair {:?} cleared", merge.consumed);
                SimEvent::TopTierCleared {
                    consumed: merge.consumed,
                    pos: merge.pos,
                }
            }
        };
        sim.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::tier::MAX_TIER;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    fn sim_with_full_gauge() -> Simulation {
        let mut sim = Simulation::default();
        sim.gauge.value = sim.gauge.max;
        sim
    }

    #[test]
    fn test_merge_scenario() {
        let mut sim = Simulation::default();
        let a = sim.spawn(Vec2::new(100.0, 100.0), &TIERS[2]);
        let b = sim.spawn(Vec2::new(105.0, 100.0), &TIERS[2]);

        tick(&mut sim, &TickInput::default(), &mut rng());

        assert_eq!(sim.balls.len(), 1);
        let merged = sim.balls[0].clone();
        assert_eq!(merged.tier, 3);
        assert_eq!(merged.radius, 30.0);
        assert_eq!(merged.pos, Vec2::new(102.5, 100.0));
        assert_eq!(merged.vel, Vec2::ZERO);
        assert!(sim.ball(a).is_none());
        assert!(sim.ball(b).is_none());
        assert!(merged.id > b);

        let events = sim.drain_events();
        assert_eq!(
            events,
            vec![SimEvent::Merged {
                consumed: (a, b),
                id: merged.id,
                tier: 3,
                pos: Vec2::new(102.5, 100.0),
            }]
        );
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn test_top_tier_merge_vanishes() {
        let mut sim = Simulation::default();
        sim.spawn(Vec2::new(70.0, 150.0), &TIERS[MAX_TIER]);
        sim.spawn(Vec2::new(150.0, 150.0), &TIERS[MAX_TIER]);

        tick(&mut sim, &TickInput::default(), &mut rng());

        assert!(sim.balls.is_empty());
        assert!(matches!(
            sim.drain_events().as_slice(),
            [SimEvent::TopTierCleared { consumed: (0, 1), .. }]
        ));
    }

    #[test]
    fn test_three_way_overlap_merges_once() {
        let mut sim = Simulation::default();
        let a = sim.spawn(Vec2::new(100.0, 100.0), &TIERS[0]);
        let b = sim.spawn(Vec2::new(110.0, 100.0), &TIERS[0]);
        let c = sim.spawn(Vec2::new(105.0, 108.0), &TIERS[0]);

        tick(&mut sim, &TickInput::default(), &mut rng());

        assert_eq!(sim.balls.len(), 2);
        assert!(sim.ball(a).is_none());
        assert!(sim.ball(b).is_none());
        let survivor = sim.ball(c).unwrap();
        assert_eq!(survivor.tier, 0);
        assert!(!survivor.consumed);
        assert_eq!(sim.tier_counts()[1], 1);

        let merges = sim
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SimEvent::Merged { .. }))
            .count();
        assert_eq!(merges, 1);
    }

    #[test]
    fn test_consumed_pair_gives_no_impulse() {
        // The red pair merges first; the orange ball overlaps both of them
        let mut sim = Simulation::default();
        sim.spawn(Vec2::new(100.0, 200.0), &TIERS[0]);
        sim.spawn(Vec2::new(104.0, 200.0), &TIERS[0]);
        let orange = sim.spawn(Vec2::new(115.0, 200.0), &TIERS[1]);

        tick(&mut sim, &TickInput::default(), &mut rng());

        let ball = sim.ball(orange).unwrap();
        assert_eq!(ball.vel.x, 0.0);
        assert!((ball.vel.y - 0.384).abs() < 1e-6);
        assert_eq!(ball.pos.x, 115.0);
        assert_eq!(sim.tier_counts()[1], 2);
    }

    #[test]
    fn test_merged_ball_waits_a_tick_before_merging_again() {
        // Two merges produce two orange balls that overlap each other
        let mut sim = Simulation::default();
        sim.spawn(Vec2::new(100.0, 200.0), &TIERS[0]);
        sim.spawn(Vec2::new(104.0, 200.0), &TIERS[0]);
        sim.spawn(Vec2::new(110.0, 200.0), &TIERS[0]);
        sim.spawn(Vec2::new(114.0, 200.0), &TIERS[0]);

        tick(&mut sim, &TickInput::default(), &mut rng());
        assert_eq!(sim.balls.len(), 2);
        assert!(sim.balls.iter().all(|b| b.tier == 1));

        tick(&mut sim, &TickInput::default(), &mut rng());
        assert_eq!(sim.balls.len(), 1);
        assert_eq!(sim.balls[0].tier, 2);
    }

    #[test]
    fn test_forces_then_kinematics() {
        let mut sim = Simulation::default();
        let id = sim.spawn(Vec2::new(128.0, 50.0), &TIERS[0]);

        tick(&mut sim, &TickInput::default(), &mut rng());
        // 0.4 * 0.96 = 0.384 clears the velocity floor
        let ball = sim.ball(id).unwrap();
        assert!((ball.vel.y - 0.384).abs() < 1e-6);
        assert!((ball.pos.y - 50.384).abs() < 1e-4);
    }

    #[test]
    fn test_ball_settles_on_floor() {
        let mut sim = Simulation::default();
        let id = sim.spawn(Vec2::new(128.0, 30.0), &TIERS[0]);
        for _ in 0..600 {
            tick(&mut sim, &TickInput::default(), &mut rng());
        }
        let ball = sim.ball(id).unwrap();
        assert_eq!(ball.pos.y, 246.0);
        assert_eq!(ball.pos.x, 128.0);
    }

    #[test]
    fn test_cursor_clamps() {
        let mut sim = Simulation::default();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut sim, &left, &mut rng());
        }
        assert_eq!(sim.cursor_x, 0.0);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut sim, &right, &mut rng());
        }
        assert_eq!(sim.cursor_x, 256.0);
    }

    #[test]
    fn test_no_drop_before_gauge_is_full() {
        let mut sim = Simulation::default();
        let drop = TickInput {
            drop_released: true,
            ..Default::default()
        };
        for _ in 0..20 {
            tick(&mut sim, &drop, &mut rng());
            assert!(sim.balls.is_empty());
        }
        assert!(sim.gauge.is_full());

        tick(&mut sim, &drop, &mut rng());
        assert_eq!(sim.balls.len(), 1);
        assert_eq!(sim.gauge.value, 0.0);

        // Next tick only charges again
        tick(&mut sim, &drop, &mut rng());
        assert_eq!(sim.balls.len(), 1);
        assert_eq!(sim.gauge.value, 0.5);
    }

    #[test]
    fn test_drop_spawns_red_ball_at_cursor() {
        let mut sim = sim_with_full_gauge();
        let input = TickInput {
            drop_pressed: true,
            ..Default::default()
        };
        tick(&mut sim, &input, &mut rng());

        assert_eq!(sim.balls.len(), 1);
        let ball = &sim.balls[0];
        assert_eq!(ball.tier, 0);
        assert_eq!(ball.pos.x, 128.0);
        assert!(matches!(
            sim.drain_events().as_slice(),
            [SimEvent::Dropped { id: 0, .. }]
        ));
    }

    #[test]
    fn test_full_gauge_waits_for_input() {
        let mut sim = sim_with_full_gauge();
        for _ in 0..10 {
            tick(&mut sim, &TickInput::default(), &mut rng());
        }
        assert!(sim.balls.is_empty());
        assert!(sim.gauge.is_full());
    }

    #[test]
    fn test_custom_arena() {
        let settings = Settings {
            width: 160.0,
            height: 130.0,
            ..Default::default()
        };
        let mut sim = Simulation::new(settings);
        let id = sim.spawn(Vec2::new(155.0, 10.0), &TIERS[0]);
        for _ in 0..300 {
            tick(&mut sim, &TickInput::default(), &mut rng());
        }
        let ball = sim.ball(id).unwrap();
        assert_eq!(ball.pos, Vec2::new(150.0, 120.0));
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs should produce identical results
        let mut sim1 = Simulation::default();
        let mut sim2 = Simulation::default();
        let mut rng1 = rng();
        let mut rng2 = rng();

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                drop_released: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                drop_pressed: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for frame in 0..400 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut sim1, input, &mut rng1);
            tick(&mut sim2, input, &mut rng2);
        }

        assert_eq!(sim1.time_ticks, sim2.time_ticks);
        assert!(!sim1.balls.is_empty());
        assert_eq!(sim1.balls, sim2.balls);
    }
}
