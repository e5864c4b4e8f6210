//! Breakout orchestrator
//!
//! Owns every object in the level and advances the game by one tick:
//! effect expiry, ball collisions against paddle, floor, ceiling, walls and
//! bricks, then object updates. Time only enters through the `now` argument.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{classify_hit, reflect_off_bricks, reflect_off_paddle};
use super::effects::{EffectKind, EffectSlot};
use super::object::{Body, GameObject, Side};
use super::rect::Rect;
use super::state::{
    Ball, Brick, BrickId, BrickStore, Button, GamePhase, MenuAction, Paddle, TextObject, World,
};
use crate::config::{Config, ConfigError};
use crate::platform::{Canvas, Dispatcher, InputEvent, Key, SoundEffect, TextStyle};

pub const READY_MESSAGE: &str = "READY!";
pub const WIN_MESSAGE: &str = "YOU WIN!";
pub const GAME_OVER_MESSAGE: &str = "GAME OVER!";

/// Side effects produced by a tick, drained by the frame loop
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// Overlay text that freezes the loop for the message duration
    Message(String),
}

/// Handle to an object in the draw/update list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectHandle {
    Brick(BrickId),
    Paddle,
    Ball,
    ScoreLabel,
    LivesLabel,
    Button(usize),
}

/// Registered input handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    Paddle,
    Quit,
    Button(usize),
}

/// The breakout game
pub struct Breakout {
    config: Config,
    rng: Pcg32,
    phase: GamePhase,
    world: World,
    bricks: BrickStore,
    effect: EffectSlot,
    menu_buttons: Vec<Button>,
    score_label: TextObject,
    lives_label: TextObject,
    /// Draw and update order
    scene: Vec<ObjectHandle>,
    dispatcher: Dispatcher<Handler>,
    events: Vec<GameEvent>,
}

impl Breakout {
    /// Build the level and menu; fails when the configuration is unusable
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let bricks = build_bricks(&config, &mut rng);
        let effect_bricks = bricks.iter().filter(|(_, b)| b.effect.is_some()).count();
        log::info!(
            "Level: {} rows x {} columns, {} effect bricks (seed {})",
            config.brick_rows,
            config.brick_columns(),
            effect_bricks,
            seed
        );

        let paddle = Paddle::new(
            Rect::new(
                ((config.screen_width - config.paddle_width) / 2.0).floor(),
                config.screen_height - config.paddle_height * 2.0,
                config.paddle_width,
                config.paddle_height,
            ),
            config.paddle_color,
            config.paddle_speed,
            config.screen_width,
        );
        let ball = spawn_ball(&config, &mut rng, 0.0);

        let label_style = TextStyle {
            font: config.font_name.clone(),
            size: config.font_size,
            color: config.text_color,
            centered: false,
        };
        let score_label = TextObject::new(
            Vec2::new(config.score_offset_x, config.status_offset_y),
            "",
            label_style.clone(),
        );
        let lives_label = TextObject::new(
            Vec2::new(config.lives_offset_x, config.status_offset_y),
            "",
            label_style,
        );

        let menu_buttons = build_menu(&config);

        let mut scene: Vec<ObjectHandle> =
            bricks.iter().map(|(id, _)| ObjectHandle::Brick(id)).collect();
        scene.extend([
            ObjectHandle::Paddle,
            ObjectHandle::Ball,
            ObjectHandle::ScoreLabel,
            ObjectHandle::LivesLabel,
        ]);
        scene.extend((0..menu_buttons.len()).map(ObjectHandle::Button));

        let mut dispatcher = Dispatcher::new();
        for key in [Key::Left, Key::Right] {
            dispatcher.on_key_down(key, Handler::Paddle);
            dispatcher.on_key_up(key, Handler::Paddle);
        }
        dispatcher.on_key_down(Key::Escape, Handler::Quit);
        for i in 0..menu_buttons.len() {
            dispatcher.on_mouse(Handler::Button(i));
        }

        let world = World {
            base_paddle_width: config.paddle_width,
            paddle,
            ball,
            score: 0,
            lives: config.initial_lives,
            points_per_brick: 1,
            ball_speed_bias: 0.0,
        };

        let mut game = Self {
            config,
            rng,
            phase: GamePhase::Menu,
            world,
            bricks,
            effect: EffectSlot::default(),
            menu_buttons,
            score_label,
            lives_label,
            scene,
            dispatcher,
            events: Vec::new(),
        };
        game.refresh_labels();
        Ok(game)
    }

    /// Leave the menu: hide the buttons and queue the ready message
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.scene.retain(|h| !matches!(h, ObjectHandle::Button(_)));
        self.dispatcher.clear_mouse();
        self.set_phase(GamePhase::Ready);
    }

    pub fn quit(&mut self) {
        self.set_phase(GamePhase::Quit);
    }

    /// Route one input event to its registered handlers
    pub fn handle_event(&mut self, event: &InputEvent) {
        if *event == InputEvent::Quit {
            self.quit();
            return;
        }
        for handler in self.dispatcher.handlers_for(event) {
            match (handler, *event) {
                (Handler::Paddle, InputEvent::KeyDown(key)) => {
                    self.world.paddle.handle_key(key, true)
                }
                (Handler::Paddle, InputEvent::KeyUp(key)) => {
                    self.world.paddle.handle_key(key, false)
                }
                (Handler::Quit, _) => self.quit(),
                (Handler::Button(i), InputEvent::Mouse { action, pos }) => {
                    let clicked = self
                        .menu_buttons
                        .get_mut(i)
                        .and_then(|button| button.handle_mouse(action, pos));
                    match clicked {
                        Some(MenuAction::Play) => self.start(),
                        Some(MenuAction::Quit) => self.quit(),
                        None => {}
                    }
                }
                _ => {}
            }
        }
    }

    /// Advance one tick; `now` is seconds since the session began
    pub fn tick(&mut self, now: f64) {
        match self.phase {
            GamePhase::Ready => {
                self.events.push(GameEvent::Message(READY_MESSAGE.to_string()));
                self.set_phase(GamePhase::Running);
            }
            GamePhase::Running => {}
            _ => return,
        }

        if let Some(kind) =
            self.effect
                .expire(now, self.config.effect_duration, &mut self.world)
        {
            log::info!("Effect expired: {}", kind.name());
        }

        self.handle_ball_collisions(now);

        if self.phase == GamePhase::Running {
            for handle in self.scene.clone() {
                if let Some(object) = self.object_mut(handle) {
                    object.update();
                }
            }
        }
        self.refresh_labels();
    }

    fn handle_ball_collisions(&mut self, now: f64) {
        let screen_width = self.config.screen_width;

        // Paddle
        let paddle_bounds = self.world.paddle.body.bounds;
        if let Some(side) = classify_hit(&self.world.ball.body.bounds, &paddle_bounds) {
            let ball = &mut self.world.ball.body;
            ball.velocity = reflect_off_paddle(ball.velocity, side, self.world.paddle.spin());
            if side != Side::Bottom {
                log::debug!("Paddle hit on {:?}, velocity {:?}", side, ball.velocity);
                self.events.push(GameEvent::Sound(SoundEffect::PaddleHit));
            }
        }

        // Floor
        if self.world.ball.body.top() > self.config.screen_height {
            self.lose_life();
            return;
        }

        // Ceiling
        if self.world.ball.body.top() <= 0.0 {
            let v = &mut self.world.ball.body.velocity;
            v.y = -v.y;
            self.events.push(GameEvent::Sound(SoundEffect::WallHit));
        }

        // Walls
        let ball = &mut self.world.ball.body;
        if ball.left() <= 0.0 || ball.right() >= screen_width {
            ball.velocity.x = -ball.velocity.x;
            log::debug!("Wall hit, velocity {:?}", ball.velocity);
            self.events.push(GameEvent::Sound(SoundEffect::WallHit));
        }

        // Bricks: classify against the standing set, then remove
        let ball_bounds = self.world.ball.body.bounds;
        let hits: Vec<(BrickId, Side)> = self
            .bricks
            .iter()
            .filter_map(|(id, brick)| {
                classify_hit(&ball_bounds, &brick.body.bounds).map(|side| (id, side))
            })
            .collect();
        if hits.is_empty() {
            return;
        }

        for &(id, side) in &hits {
            let Some(brick) = self.bricks.remove(id) else {
                continue;
            };
            self.scene.retain(|h| *h != ObjectHandle::Brick(id));
            self.world.score += u64::from(self.world.points_per_brick);
            log::debug!(
                "Brick {} hit on {:?}, score {}",
                id.0,
                side,
                self.world.score
            );
            self.events.push(GameEvent::Sound(SoundEffect::BrickHit));

            if let Some(kind) = brick.effect {
                if let Some(replaced) = self.effect.activate(kind, now, &mut self.world) {
                    log::info!("Effect replaced: {}", replaced.name());
                }
                log::info!("Effect activated: {}", kind.name());
                self.events
                    .push(GameEvent::Sound(SoundEffect::EffectActivated));
            }
        }
        let ball = &mut self.world.ball.body;
        ball.velocity = reflect_off_bricks(ball.velocity, hits.iter().map(|(_, side)| *side));

        if self.bricks.is_empty() {
            self.events.push(GameEvent::Sound(SoundEffect::Win));
            self.events.push(GameEvent::Message(WIN_MESSAGE.to_string()));
            self.set_phase(GamePhase::Won);
        }
    }

    fn lose_life(&mut self) {
        self.world.lives = self.world.lives.saturating_sub(1);
        log::info!("Life lost, {} remaining", self.world.lives);
        if self.world.lives == 0 {
            self.events.push(GameEvent::Sound(SoundEffect::GameOver));
            self.events
                .push(GameEvent::Message(GAME_OVER_MESSAGE.to_string()));
            self.set_phase(GamePhase::GameOver);
        } else {
            self.events.push(GameEvent::Sound(SoundEffect::LifeLost));
            self.world.ball = spawn_ball(&self.config, &mut self.rng, self.world.ball_speed_bias);
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn refresh_labels(&mut self) {
        self.score_label.text = format!("SCORE: {}", self.world.score);
        self.lives_label.text = format!("LIVES: {}", self.world.lives);
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut dyn GameObject> {
        match handle {
            ObjectHandle::Brick(id) => self.bricks.get_mut(id).map(|b| b as &mut dyn GameObject),
            ObjectHandle::Paddle => Some(&mut self.world.paddle),
            ObjectHandle::Ball => Some(&mut self.world.ball),
            ObjectHandle::Button(i) => self
                .menu_buttons
                .get_mut(i)
                .map(|b| b as &mut dyn GameObject),
            ObjectHandle::ScoreLabel | ObjectHandle::LivesLabel => None,
        }
    }

    /// Draw every object in scene order
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for handle in &self.scene {
            match *handle {
                ObjectHandle::Brick(id) => {
                    if let Some(brick) = self.bricks.get(id) {
                        brick.draw(canvas);
                    }
                }
                ObjectHandle::Paddle => self.world.paddle.draw(canvas),
                ObjectHandle::Ball => self.world.ball.draw(canvas),
                ObjectHandle::ScoreLabel => self.score_label.draw(canvas),
                ObjectHandle::LivesLabel => self.lives_label.draw(canvas),
                ObjectHandle::Button(i) => {
                    if let Some(button) = self.menu_buttons.get(i) {
                        button.draw(canvas);
                    }
                }
            }
        }
    }

    /// Take queued sounds and messages
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True once the session can no longer continue
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn lives(&self) -> u32 {
        self.world.lives
    }

    pub fn points_per_brick(&self) -> u32 {
        self.world.points_per_brick
    }

    pub fn ball(&self) -> &Ball {
        &self.world.ball
    }

    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.world.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.world.paddle
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct state access for scripted setups
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn bricks(&self) -> &BrickStore {
        &self.bricks
    }

    /// Standing bricks, for scripted setups
    pub fn brick_mut(&mut self, id: BrickId) -> Option<&mut Brick> {
        self.bricks.get_mut(id)
    }

    pub fn effect(&self) -> &EffectSlot {
        &self.effect
    }

    pub fn menu_buttons(&self) -> &[Button] {
        &self.menu_buttons
    }

    pub fn scene(&self) -> &[ObjectHandle] {
        &self.scene
    }
}

/// Brick grid centered horizontally, effects rolled per brick
fn build_bricks(config: &Config, rng: &mut Pcg32) -> BrickStore {
    let (w, h) = (config.brick_width, config.brick_height);
    let columns = config.brick_columns();
    let offset_x = ((config.screen_width - columns as f32 * w) / 2.0).floor();

    let mut store = BrickStore::new();
    for row in 0..config.brick_rows {
        for col in 0..columns {
            let effect = if config.effects_enabled {
                let roll = rng.random_range(0..=config.effect_roll_max) as usize;
                EffectKind::ALL.get(roll).copied()
            } else {
                None
            };
            let bounds = Rect::new(
                offset_x + col as f32 * w,
                config.brick_offset_y + row as f32 * h,
                w,
                h,
            );
            store.insert(Brick {
                body: Body::at_rest(bounds),
                color: effect.map_or(config.brick_color, |kind| kind.color()),
                effect,
            });
        }
    }
    store
}

/// Fresh ball at screen center with a random integer horizontal speed
///
/// `speed_bias` is the vertical speed change of an active slow-ball effect.
fn spawn_ball(config: &Config, rng: &mut Pcg32, speed_bias: f32) -> Ball {
    let spread = i32::try_from(config.ball_spread).unwrap_or(i32::MAX);
    let dx = rng.random_range(-spread..=spread) as f32;
    let dy = config.ball_speed.signum() * (config.ball_speed.abs() + speed_bias);
    Ball::new(
        Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0),
        config.ball_radius,
        config.ball_color,
        Vec2::new(dx, dy),
    )
}

/// PLAY and QUIT, stacked downward from the menu offset
fn build_menu(config: &Config) -> Vec<Button> {
    use crate::consts::{BUTTON_PADDING, MENU_BUTTON_GAP};

    let style = TextStyle {
        font: config.font_name.clone(),
        size: config.font_size,
        color: config.button_text_color,
        centered: false,
    };
    let colors = [
        config.button_colors.normal,
        config.button_colors.hover,
        config.button_colors.pressed,
    ];
    [("PLAY", MenuAction::Play), ("QUIT", MenuAction::Quit)]
        .into_iter()
        .enumerate()
        .map(|(i, (text, action))| {
            let y = config.menu_offset_y + (config.menu_button_height + MENU_BUTTON_GAP) * i as f32;
            Button::new(
                Rect::new(
                    config.menu_offset_x,
                    y,
                    config.menu_button_width,
                    config.menu_button_height,
                ),
                text,
                action,
                BUTTON_PADDING,
                style.clone(),
                colors,
            )
        })
        .collect()
}
