//! Merge Drop entry point
//!
//! Headless runner: plays the simulation with a scripted autoplay host and
//! prints where the balls ended up. A windowed host drives the same
//! `Simulation::update` / `renderer::draw` pair once per frame.
//!
//! Usage: `merge-drop [frames] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use merge_drop::platform::{Canvas, Color, InputSource, RandomSource};
    use merge_drop::renderer;
    use merge_drop::sim::{SimEvent, Simulation, TIERS, TickInput};
    use merge_drop::Settings;

    const DEFAULT_FRAMES: u64 = 3600;

    /// Wanders the cursor and drops whenever allowed
    struct Autoplay {
        /// Drives cursor decisions
        input_rng: Pcg32,
        /// Handed to the simulation for tie-breaks
        physics_rng: Pcg32,
        direction: i8,
        hold_frames: u32,
    }

    impl Autoplay {
        fn new(settings: &Settings) -> Self {
            Self {
                input_rng: Pcg32::seed_from_u64(settings.seed.wrapping_add(1)),
                physics_rng: settings.rng(),
                direction: 0,
                hold_frames: 0,
            }
        }
    }

    impl InputSource for Autoplay {
        fn poll_input(&mut self) -> TickInput {
            if self.hold_frames == 0 {
                self.direction = self.input_rng.random_range(-1..=1);
                self.hold_frames = self.input_rng.random_range(10..60);
            }
            self.hold_frames -= 1;

            TickInput {
                left: self.direction < 0,
                right: self.direction > 0,
                drop_released: true,
                drop_pressed: false,
            }
        }
    }

    impl RandomSource for Autoplay {
        fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
            self.physics_rng.uniform(lo, hi)
        }
    }

    /// Counts primitives instead of rasterizing them
    #[derive(Debug, Default)]
    struct CountingCanvas {
        clears: u64,
        lines: u64,
        rects: u64,
        circles: u64,
    }

    impl Canvas for CountingCanvas {
        fn clear(&mut self, _color: Color) {
            self.clears += 1;
        }
        fn line(&mut self, _x0: f32, _y0: f32, _x1: f32, _y1: f32, _color: Color) {
            self.lines += 1;
        }
        fn rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {
            self.rects += 1;
        }
        fn circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: Color) {
            self.circles += 1;
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let frames = match args.next() {
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                log::warn!("Invalid frame count {:?}, using {}", arg, DEFAULT_FRAMES);
                DEFAULT_FRAMES
            }),
            None => DEFAULT_FRAMES,
        };
        let settings = match args.next() {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };

        log::info!("Running {} frames with seed {}", frames, settings.seed);

        let mut host = Autoplay::new(&settings);
        let mut sim = Simulation::new(settings);
        let mut canvas = CountingCanvas::default();
        let (mut drops, mut merges, mut cleared) = (0u64, 0u64, 0u64);

        for _ in 0..frames {
            sim.update(&mut host);
            renderer::draw(&sim, &mut canvas);

            for event in sim.drain_events() {
                match event {
                    SimEvent::Dropped { .. } => drops += 1,
                    SimEvent::Merged { tier, .. } => {
                        merges += 1;
                        log::debug!("Reached {} at tick {}", TIERS[tier].name, sim.time_ticks);
                    }
                    SimEvent::TopTierCleared { .. } => {
                        cleared += 1;
                        log::info!("Top tier cleared at tick {}", sim.time_ticks);
                    }
                }
            }
        }

        println!(
            "Ran {} ticks: {} drops, {} merges, {} top-tier clears",
            sim.time_ticks, drops, merges, cleared
        );
        for (tier, count) in TIERS.iter().zip(sim.tier_counts()) {
            if count > 0 {
                println!("  {:>7} (r{:>2}): {}", tier.name, tier.radius, count);
            }
        }
        log::info!("Canvas calls: {:?}", canvas);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Merge Drop (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts embed the library directly
}
