//! Frame layout: guide line, cursor marker, balls, drop gauge

use crate::consts::{CURSOR_SIZE, GUIDE_LINE_Y};
use crate::platform::{Canvas, Color};
use crate::sim::Simulation;

/// Draw one frame of `sim`
pub fn draw<C: Canvas + ?Sized>(sim: &Simulation, canvas: &mut C) {
    canvas.clear(Color::BLACK);
    canvas.line(0.0, GUIDE_LINE_Y, sim.settings.width, GUIDE_LINE_Y, Color::WHITE);
    canvas.rect(
        sim.cursor_x - CURSOR_SIZE / 2.0,
        0.0,
        CURSOR_SIZE,
        CURSOR_SIZE,
        Color::WHITE,
    );

    for ball in &sim.balls {
        // Inset by a pixel so touching balls read as separate
        canvas.circle(ball.pos.x, ball.pos.y, ball.radius - 1.0, ball.tier().color);
    }

    let gauge = &sim.gauge;
    canvas.rect(gauge.x, gauge.y, gauge.value, gauge.height, Color::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TIERS;
    use glam::Vec2;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear(Color),
        Line(f32, f32, f32, f32, Color),
        Rect(f32, f32, f32, f32, Color),
        Circle(f32, f32, f32, Color),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Canvas for Recorder {
        fn clear(&mut self, color: Color) {
            self.0.push(Call::Clear(color));
        }
        fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
            self.0.push(Call::Line(x0, y0, x1, y1, color));
        }
        fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
            self.0.push(Call::Rect(x, y, w, h, color));
        }
        fn circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
            self.0.push(Call::Circle(x, y, radius, color));
        }
    }

    #[test]
    fn test_draw_layout() {
        let mut sim = Simulation::default();
        sim.spawn(Vec2::new(40.0, 60.0), &TIERS[2]);
        sim.gauge.value = 3.5;

        let mut canvas = Recorder::default();
        draw(&sim, &mut canvas);

        assert_eq!(
            canvas.0,
            vec![
                Call::Clear(Color(0)),
                Call::Line(0.0, 20.0, 256.0, 20.0, Color(7)),
                Call::Rect(123.0, 0.0, 10.0, 10.0, Color(7)),
                Call::Circle(40.0, 60.0, 19.0, Color(12)),
                Call::Rect(10.0, 10.0, 3.5, 5.0, Color(7)),
            ]
        );
    }

    #[test]
    fn test_draw_does_not_mutate() {
        let mut sim = Simulation::default();
        sim.spawn(Vec2::new(100.0, 100.0), &TIERS[0]);
        let before = sim.balls.clone();

        draw(&sim, &mut Recorder::default());
        assert_eq!(sim.balls, before);
    }
}
