//! End-to-end game scenarios through the public game API

use glam::Vec2;

use crate::platform::{
    DrawCommand, InputEvent, Key, ManualClock, NullAudio, QueuedInput, RecordingCanvas,
};
use crate::shell::LoopSettings;
use crate::sim::{
    EffectKind, GAME_OVER_MESSAGE, GameEvent, ObjectHandle, Rect, WIN_MESSAGE,
};
use crate::{Breakout, Config, GamePhase, Shell};

fn plain_config() -> Config {
    Config {
        effects_enabled: false,
        ..Config::default()
    }
}

/// Started game, past the ready tick
fn running(config: Config) -> Breakout {
    let mut game = Breakout::new(config, 2024).unwrap();
    game.start();
    game.tick(0.0);
    game.drain_events();
    game
}

fn place_ball(game: &mut Breakout, center: Vec2, velocity: Vec2) {
    let radius = game.ball().radius;
    let ball = game.ball_mut();
    ball.body.bounds = Rect::around_circle(center, radius);
    ball.body.velocity = velocity;
}

#[test]
fn test_ball_moving_up_hits_brick_bottom() {
    let mut game = running(plain_config());
    assert_eq!(game.bricks().len(), 40);

    // Under the second brick of the bottom row (100..200 x 130..150)
    place_ball(&mut game, Vec2::new(150.0, 151.0), Vec2::new(0.0, -5.0));
    let score = game.score();
    let points = game.points_per_brick();
    let (target, _) = game
        .bricks()
        .iter()
        .find(|(_, b)| b.body.bounds == Rect::new(100.0, 130.0, 100.0, 20.0))
        .unwrap();

    game.tick(0.5);

    assert_eq!(game.ball().velocity(), Vec2::new(0.0, 5.0));
    assert_eq!(game.bricks().len(), 39);
    assert!(game.bricks().get(target).is_none());
    assert!(!game.scene().contains(&ObjectHandle::Brick(target)));
    assert_eq!(game.score(), score + u64::from(points));

    // Removed from drawing too: 39 bricks plus the paddle
    let mut canvas = RecordingCanvas::new();
    game.draw(&mut canvas);
    crate::platform::Canvas::present(&mut canvas);
    let rects = canvas
        .last_frame()
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Rect(..)))
        .count();
    assert_eq!(rects, 40);
}

#[test]
fn test_paddle_at_left_wall_stays_put() {
    let config = Config {
        paddle_speed: 10.0,
        ..plain_config()
    };
    let mut game = running(config);
    game.world_mut().paddle.body.bounds.x = 0.0;
    game.handle_event(&InputEvent::KeyDown(Key::Left));
    assert!(game.paddle().moving_left());

    for i in 0..3 {
        game.tick(1.0 + f64::from(i));
        assert_eq!(game.paddle().body.left(), 0.0);
    }
}

#[test]
fn test_last_life_lost_is_game_over_without_respawn() {
    let mut game = running(plain_config());
    game.world_mut().lives = 1;
    place_ball(&mut game, Vec2::new(400.0, 612.0), Vec2::new(1.0, 3.0));

    game.tick(1.0);

    assert_eq!(game.lives(), 0);
    assert_eq!(game.phase(), GamePhase::GameOver);
    // Same ball, not a fresh one at screen center
    assert_eq!(game.ball().center(), Vec2::new(400.0, 612.0));
    let events = game.drain_events();
    assert!(events.contains(&GameEvent::Message(GAME_OVER_MESSAGE.to_string())));

    // Terminal: further ticks change nothing
    game.tick(2.0);
    assert_eq!(game.lives(), 0);
    assert_eq!(game.ball().center(), Vec2::new(400.0, 612.0));
    assert!(game.is_finished());
}

#[test]
fn test_clearing_last_brick_wins_same_tick() {
    let config = Config {
        screen_width: 100.0,
        brick_rows: 1,
        ..plain_config()
    };
    let mut game = running(config);
    assert_eq!(game.bricks().len(), 1);
    assert_eq!(game.lives(), 3);

    place_ball(&mut game, Vec2::new(50.0, 78.0), Vec2::new(0.0, -3.0));
    game.tick(1.0);

    assert!(game.bricks().is_empty());
    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.lives(), 3);
    assert!(
        game.drain_events()
            .contains(&GameEvent::Message(WIN_MESSAGE.to_string()))
    );
}

#[test]
fn test_triple_points_scores_following_bricks_and_expires() {
    let mut game = running(plain_config());
    let ids: Vec<_> = game.bricks().iter().map(|(id, _)| id).collect();
    // Bottom row, second and sixth columns
    let (first, second) = (ids[33], ids[37]);
    game.brick_mut(first).unwrap().effect = Some(EffectKind::TriplePoints);

    place_ball(&mut game, Vec2::new(150.0, 151.0), Vec2::new(0.0, -5.0));
    game.tick(1.0);
    assert_eq!(game.score(), 1);
    assert_eq!(game.points_per_brick(), 3);
    assert_eq!(game.effect().active().map(|e| e.kind), Some(EffectKind::TriplePoints));

    assert!(game.bricks().get(second).is_some());
    place_ball(&mut game, Vec2::new(550.0, 151.0), Vec2::new(0.0, -5.0));
    game.tick(2.0);
    assert_eq!(game.score(), 4);

    game.tick(21.0);
    assert!(game.effect().is_empty());
    assert_eq!(game.points_per_brick(), 1);
}

#[test]
fn test_new_effect_replaces_running_one() {
    let mut game = running(plain_config());
    let ids: Vec<_> = game.bricks().iter().map(|(id, _)| id).collect();
    game.brick_mut(ids[33]).unwrap().effect = Some(EffectKind::LongPaddle);
    game.brick_mut(ids[37]).unwrap().effect = Some(EffectKind::ExtraLife);

    place_ball(&mut game, Vec2::new(150.0, 151.0), Vec2::new(0.0, -5.0));
    game.tick(1.0);
    assert_eq!(game.paddle().width(), 120.0);

    place_ball(&mut game, Vec2::new(550.0, 151.0), Vec2::new(0.0, -5.0));
    game.tick(2.0);
    // Long paddle undone before the extra life was granted
    assert_eq!(game.paddle().width(), 80.0);
    assert_eq!(game.lives(), 4);

    game.tick(30.0);
    assert!(game.effect().is_empty());
    assert_eq!(game.lives(), 4);
}

#[test]
fn test_headless_session_through_shell() {
    let config = plain_config();
    let settings = LoopSettings::from_config(&config);
    let mut game = Breakout::new(config, 9).unwrap();
    game.start();
    let input = QueuedInput::new();
    let mut shell = Shell::new(
        game,
        RecordingCanvas::new(),
        input.clone(),
        NullAudio,
        ManualClock::new(),
        settings,
    );

    assert!(shell.frame());
    assert!(shell.canvas().texts().contains(&"READY!"));
    assert!(shell.canvas().texts().contains(&"SCORE: 0"));
    assert!(shell.canvas().texts().contains(&"LIVES: 3"));

    input.push(InputEvent::Quit);
    shell.clock_mut().advance(2.0);
    assert!(!shell.frame());
    assert_eq!(shell.scene().phase(), GamePhase::Quit);
}
