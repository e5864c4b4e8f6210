//! Idle mode: steer the paddle under the ball
//!
//! Produces the same key transitions a player would, so the game cannot tell
//! the difference.

use glam::Vec2;

use super::tick::Breakout;
use crate::platform::{InputEvent, Key};

/// Distance from the aim point within which the paddle stays put
const DEAD_ZONE: f32 = 4.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    held: Option<Key>,
    frame: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key transitions needed to chase the ball this frame
    pub fn steer(&mut self, game: &Breakout) -> Vec<InputEvent> {
        self.frame += 1;
        let paddle = game.paddle();

        // Oscillating aim offset so rallies do not repeat forever
        let t = self.frame as f32 * 0.01;
        let offset = (t.sin() * 0.3 + (t * 0.7).sin() * 0.15) * paddle.width();
        let target = game.ball().center() + Vec2::new(offset, 0.0);

        let error = target.x - paddle.body.center().x;
        let wanted = if error < -DEAD_ZONE {
            Some(Key::Left)
        } else if error > DEAD_ZONE {
            Some(Key::Right)
        } else {
            None
        };
        self.hold(wanted)
    }

    /// Release everything currently held
    pub fn release(&mut self) -> Vec<InputEvent> {
        self.hold(None)
    }

    fn hold(&mut self, wanted: Option<Key>) -> Vec<InputEvent> {
        if wanted == self.held {
            return Vec::new();
        }
        let mut events = Vec::with_capacity(2);
        if let Some(key) = self.held.take() {
            events.push(InputEvent::KeyUp(key));
        }
        if let Some(key) = wanted {
            events.push(InputEvent::KeyDown(key));
        }
        self.held = wanted;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::Rect;

    #[test]
    fn test_emits_transitions_only_on_change() {
        let mut game = Breakout::new(Config::default(), 5).unwrap();
        let radius = game.ball().radius;
        game.ball_mut().body.bounds = Rect::around_circle(Vec2::new(50.0, 300.0), radius);

        let mut pilot = Autopilot::new();
        assert_eq!(pilot.steer(&game), vec![InputEvent::KeyDown(Key::Left)]);
        assert!(pilot.steer(&game).is_empty());

        game.ball_mut().body.bounds = Rect::around_circle(Vec2::new(750.0, 300.0), radius);
        assert_eq!(
            pilot.steer(&game),
            vec![InputEvent::KeyUp(Key::Left), InputEvent::KeyDown(Key::Right)]
        );
        assert_eq!(pilot.release(), vec![InputEvent::KeyUp(Key::Right)]);
        assert!(pilot.release().is_empty());
    }
}
