//! Side classification and velocity reflection
//!
//! The ball is tested against the four edge strips of a stationary target.
//! One touched strip names the side directly; a corner touches two strips and
//! is resolved from where the ball's center sits relative to the target.

use glam::Vec2;

use super::object::{Edges, Side};
use super::rect::Rect;

/// Which side of `target` the `probe` struck, if any
///
/// Tie-break when several strips are touched:
/// - Top candidate: top if the probe center is at or above the target top,
///   otherwise the first other touched side.
/// - Bottom candidate: bottom if the probe center is at or below the target
///   bottom, otherwise the first other touched side.
/// - Left and right only: the mirrored rule on x, then the nearer half.
pub fn classify_hit(probe: &Rect, target: &Rect) -> Option<Side> {
    let edges = Edges::of(target);
    let mut touched = [false; 4];
    let mut count = 0;
    for (i, (_, strip)) in edges.iter().enumerate() {
        if probe.intersects(&strip) {
            touched[i] = true;
            count += 1;
        }
    }

    // Side discriminants follow Side::ALL order
    let is_touched = |side: Side| touched[side as usize];
    let first_other = |excluded: Side| {
        Side::ALL
            .into_iter()
            .find(|side| *side != excluded && is_touched(*side))
    };

    match count {
        0 => None,
        1 => Side::ALL.into_iter().find(|side| is_touched(*side)),
        _ => {
            let center = probe.center();
            if is_touched(Side::Top) {
                if center.y <= target.top() {
                    Some(Side::Top)
                } else {
                    first_other(Side::Top)
                }
            } else if is_touched(Side::Bottom) {
                if center.y >= target.bottom() {
                    Some(Side::Bottom)
                } else {
                    first_other(Side::Bottom)
                }
            } else if center.x <= target.left() {
                Some(Side::Left)
            } else if center.x >= target.right() {
                Some(Side::Right)
            } else if center.x < target.center_x() {
                Some(Side::Left)
            } else {
                Some(Side::Right)
            }
        }
    }
}

/// Velocity after striking the paddle
///
/// A top hit bounces the ball back up and adds the paddle's spin
/// (-1 moving left, +1 moving right, 0 at rest) to the horizontal speed.
/// Side hits reverse horizontal motion. Bottom hits leave the ball alone.
pub fn reflect_off_paddle(velocity: Vec2, side: Side, spin: f32) -> Vec2 {
    match side {
        Side::Top => Vec2::new(velocity.x + spin, -velocity.y),
        Side::Left | Side::Right => Vec2::new(-velocity.x, velocity.y),
        Side::Bottom => velocity,
    }
}

/// Velocity after striking one or more bricks in the same tick
///
/// Each axis is reversed at most once, however many bricks were hit on it.
pub fn reflect_off_bricks(velocity: Vec2, sides: impl IntoIterator<Item = Side>) -> Vec2 {
    let (mut flip_x, mut flip_y) = (false, false);
    for side in sides {
        if side.is_horizontal_face() {
            flip_y = true;
        } else {
            flip_x = true;
        }
    }
    Vec2::new(
        if flip_x { -velocity.x } else { velocity.x },
        if flip_y { -velocity.y } else { velocity.y },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32) -> Rect {
        Rect::around_circle(Vec2::new(x, y), 8.0)
    }

    const BRICK: Rect = Rect::new(100.0, 100.0, 100.0, 20.0);

    #[test]
    fn test_no_contact() {
        assert_eq!(classify_hit(&ball_at(50.0, 50.0), &BRICK), None);
    }

    #[test]
    fn test_single_sides() {
        assert_eq!(classify_hit(&ball_at(150.0, 95.0), &BRICK), Some(Side::Top));
        assert_eq!(classify_hit(&ball_at(150.0, 126.0), &BRICK), Some(Side::Bottom));
        assert_eq!(classify_hit(&ball_at(95.0, 110.0), &BRICK), Some(Side::Left));
        assert_eq!(classify_hit(&ball_at(205.0, 110.0), &BRICK), Some(Side::Right));
    }

    #[test]
    fn test_top_corner_above_is_top() {
        // Touches top and left strips, center above the brick
        let probe = ball_at(104.0, 98.0);
        assert_eq!(classify_hit(&probe, &BRICK), Some(Side::Top));
    }

    #[test]
    fn test_top_corner_below_falls_through() {
        // Touches top and left strips, center below the top edge
        let probe = ball_at(94.0, 102.0);
        assert_eq!(classify_hit(&probe, &BRICK), Some(Side::Left));
    }

    #[test]
    fn test_bottom_corner() {
        let below = ball_at(196.0, 122.0);
        assert_eq!(classify_hit(&below, &BRICK), Some(Side::Bottom));

        let beside = ball_at(206.0, 118.0);
        assert_eq!(classify_hit(&beside, &BRICK), Some(Side::Right));
    }

    #[test]
    fn test_left_right_tie_break_is_symmetric() {
        // A probe wider than a thin target touches only the left and right strips
        let post = Rect::new(100.0, 100.0, 6.0, 40.0);
        let left_of_center = Rect::new(94.0, 110.0, 16.0, 16.0);
        let right_of_center = Rect::new(98.0, 110.0, 16.0, 16.0);

        assert_eq!(classify_hit(&left_of_center, &post), Some(Side::Left));
        assert_eq!(classify_hit(&right_of_center, &post), Some(Side::Right));
    }

    #[test]
    fn test_paddle_top_adds_spin() {
        let v = Vec2::new(0.0, 3.0);
        assert_eq!(reflect_off_paddle(v, Side::Top, 0.0), Vec2::new(0.0, -3.0));
        assert_eq!(reflect_off_paddle(v, Side::Top, -1.0), Vec2::new(-1.0, -3.0));
        assert_eq!(reflect_off_paddle(v, Side::Top, 1.0), Vec2::new(1.0, -3.0));
    }

    #[test]
    fn test_paddle_sides_flip_dx() {
        let v = Vec2::new(2.0, 3.0);
        assert_eq!(reflect_off_paddle(v, Side::Left, 1.0), Vec2::new(-2.0, 3.0));
        assert_eq!(reflect_off_paddle(v, Side::Right, 0.0), Vec2::new(-2.0, 3.0));
    }

    #[test]
    fn test_bricks_flip_each_axis_once() {
        let v = Vec2::new(2.0, -5.0);
        assert_eq!(reflect_off_bricks(v, [Side::Bottom]), Vec2::new(2.0, 5.0));
        assert_eq!(
            reflect_off_bricks(v, [Side::Bottom, Side::Bottom]),
            Vec2::new(2.0, 5.0)
        );
        assert_eq!(
            reflect_off_bricks(v, [Side::Left, Side::Top]),
            Vec2::new(-2.0, 5.0)
        );
        assert_eq!(reflect_off_bricks(v, []), v);
    }
}
