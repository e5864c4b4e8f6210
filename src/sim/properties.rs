//! Property-based tests for collision and scoring invariants

use glam::Vec2;
use proptest::prelude::*;

use crate::sim::{
    EDGE_THICKNESS, Rect, Side, classify_hit, reflect_off_bricks, reflect_off_paddle,
};
use crate::{Breakout, Config, GamePhase};

fn plain_config() -> Config {
    Config {
        effects_enabled: false,
        ..Config::default()
    }
}

fn running(seed: u64) -> Breakout {
    let mut game = Breakout::new(plain_config(), seed).unwrap();
    game.start();
    game.tick(0.0);
    game.drain_events();
    game
}

/// Mirror a rectangle across the vertical line x = axis
fn mirror(r: &Rect, axis: f32) -> Rect {
    Rect::new(2.0 * axis - r.right(), r.y, r.w, r.h)
}

proptest! {
    #[test]
    fn test_side_walls_keep_dy(
        y in 200.0f32..500.0,
        dx in 1i32..5,
        dy in -5i32..5,
        left in any::<bool>(),
    ) {
        let mut game = running(1);
        let radius = game.ball().radius;
        let (x, vx) = if left {
            (radius, -dx as f32)
        } else {
            (800.0 - radius, dx as f32)
        };
        let ball = game.ball_mut();
        ball.body.bounds = Rect::around_circle(Vec2::new(x, y), radius);
        ball.body.velocity = Vec2::new(vx, dy as f32);

        game.tick(1.0);
        prop_assert_eq!(game.ball().velocity(), Vec2::new(-vx, dy as f32));
    }

    #[test]
    fn test_brick_hit_adds_points_per_brick(
        col in 0usize..8,
        dx in -2i32..=2,
        ppb in 1u32..5,
    ) {
        let mut game = running(3);
        game.world_mut().points_per_brick = ppb;
        let radius = game.ball().radius;
        let center = Vec2::new(col as f32 * 100.0 + 50.0, 151.0);
        let ball = game.ball_mut();
        ball.body.bounds = Rect::around_circle(center, radius);
        ball.body.velocity = Vec2::new(dx as f32, -5.0);

        let before = game.bricks().len();
        game.tick(1.0);
        prop_assert_eq!(game.bricks().len(), before - 1);
        prop_assert_eq!(game.score(), u64::from(ppb));
        prop_assert_eq!(game.ball().velocity().y, 5.0);
    }

    #[test]
    fn test_lives_never_negative(seed in any::<u64>(), drops in 1usize..8) {
        let mut game = running(seed);
        for i in 0..drops {
            let radius = game.ball().radius;
            let ball = game.ball_mut();
            ball.body.bounds = Rect::around_circle(Vec2::new(400.0, 620.0), radius);
            game.tick(1.0 + i as f64);
        }
        let expected = 3usize.saturating_sub(drops) as u32;
        prop_assert_eq!(game.lives(), expected);
        if expected == 0 {
            prop_assert_eq!(game.phase(), GamePhase::GameOver);
        }
    }

    #[test]
    fn test_paddle_top_flips_dy_and_spins(
        dx in -3i32..=3,
        dy in 1i32..6,
        spin in prop_oneof![Just(-1.0f32), Just(0.0f32), Just(1.0f32)],
    ) {
        let v = Vec2::new(dx as f32, dy as f32);
        let out = reflect_off_paddle(v, Side::Top, spin);
        prop_assert_eq!(out.y, -v.y);
        prop_assert_eq!(out.x, v.x + spin);
    }

    #[test]
    fn test_brick_reflection_flips_each_axis_at_most_once(
        sides in prop::collection::vec(
            prop_oneof![Just(Side::Left), Just(Side::Right), Just(Side::Top), Just(Side::Bottom)],
            0..6,
        ),
    ) {
        let v = Vec2::new(2.0, -3.0);
        let out = reflect_off_bricks(v, sides.iter().copied());
        let hit_x = sides.iter().any(|s| !s.is_horizontal_face());
        let hit_y = sides.iter().any(|s| s.is_horizontal_face());
        prop_assert_eq!(out.x, if hit_x { -v.x } else { v.x });
        prop_assert_eq!(out.y, if hit_y { -v.y } else { v.y });
    }

    #[test]
    fn test_classifier_is_deterministic(x in 60.0f32..240.0, y in 60.0f32..160.0) {
        let target = Rect::new(100.0, 100.0, 100.0, 20.0);
        let probe = Rect::around_circle(Vec2::new(x, y), 8.0);
        prop_assert_eq!(classify_hit(&probe, &target), classify_hit(&probe, &target));
    }

    #[test]
    fn test_side_hits_mirror(x in 60i32..240, y in 101i32..=123) {
        // Tall target, probe clear of the top and bottom strips
        let target = Rect::new(100.0, 100.0, 100.0, 40.0);
        let probe = Rect::new(x as f32, y as f32, 16.0, 16.0);
        // The strip pair is centered half a strip right of the bounds center
        let axis = target.center_x() + EDGE_THICKNESS / 2.0;

        let side = classify_hit(&probe, &target);
        let mirrored = classify_hit(&mirror(&probe, axis), &target);
        prop_assert_eq!(mirrored, side.map(|s| s.mirrored_x()));
    }
}
