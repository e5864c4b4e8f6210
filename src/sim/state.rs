//! Game objects and mutable game state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{EffectKind, EffectTarget};
use super::object::{Body, GameObject};
use super::rect::Rect;
use crate::Color;
use crate::platform::{Canvas, Key, MouseAction, TextStyle};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu buttons visible, simulation paused
    Menu,
    /// Level about to start; shows the ready message on the next tick
    Ready,
    /// Active gameplay
    Running,
    /// All bricks destroyed
    Won,
    /// Lives exhausted
    GameOver,
    /// Quit requested
    Quit,
}

impl GamePhase {
    /// No transition leaves a terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::GameOver | GamePhase::Quit)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    pub radius: f32,
    pub color: Color,
}

impl Ball {
    pub fn new(center: Vec2, radius: f32, color: Color, velocity: Vec2) -> Self {
        Self {
            body: Body::new(Rect::around_circle(center, radius), velocity),
            radius,
            color,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }
}

impl GameObject for Ball {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_circle(self.center(), self.radius, self.color);
    }
}

/// Paddle movement intent from held arrow keys
///
/// Each flag follows its key's down/up transitions, so it always matches the
/// physical key state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Steering {
    pub left_held: bool,
    pub right_held: bool,
}

impl Steering {
    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Left => self.left_held = held,
            Key::Right => self.right_held = held,
            _ => {}
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: Body,
    pub color: Color,
    /// Maximum displacement per tick
    pub offset: f32,
    /// Right limit of travel
    pub screen_width: f32,
    pub steering: Steering,
}

impl Paddle {
    pub fn new(bounds: Rect, color: Color, offset: f32, screen_width: f32) -> Self {
        Self {
            body: Body::at_rest(bounds),
            color,
            offset,
            screen_width,
            steering: Steering::default(),
        }
    }

    /// Key handler for both key-down and key-up
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        self.steering.set(key, pressed);
    }

    pub fn moving_left(&self) -> bool {
        self.steering.left_held
    }

    pub fn moving_right(&self) -> bool {
        self.steering.right_held
    }

    /// Horizontal nudge given to a ball bouncing off the top
    pub fn spin(&self) -> f32 {
        if self.moving_left() {
            -1.0
        } else if self.moving_right() {
            1.0
        } else {
            0.0
        }
    }

    pub fn width(&self) -> f32 {
        self.body.bounds.width()
    }

    /// Grow or shrink around the center, staying on screen
    pub fn widen(&mut self, amount: f32) {
        self.body.bounds.inflate(amount, 0.0);
        self.body.bounds.clamp_x_within(0.0, self.screen_width);
    }
}

impl GameObject for Paddle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Move by at most `offset`, never past either screen edge
    fn update(&mut self) {
        let bounds = self.body.bounds;
        let dx = if self.moving_left() {
            -self.offset.min(bounds.left().max(0.0))
        } else if self.moving_right() {
            self.offset.min((self.screen_width - bounds.right()).max(0.0))
        } else {
            return;
        };
        self.body.translate(Vec2::new(dx, 0.0));
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.body.bounds, self.color);
    }
}

/// Stable handle into the brick store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrickId(pub usize);

/// A brick, optionally carrying a special effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub body: Body,
    pub color: Color,
    pub effect: Option<EffectKind>,
}

impl GameObject for Brick {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.body.bounds, self.color);
    }
}

/// Brick arena; removing a brick leaves every other handle valid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickStore {
    slots: Vec<Option<Brick>>,
    live: usize,
}

impl BrickStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, brick: Brick) -> BrickId {
        self.slots.push(Some(brick));
        self.live += 1;
        BrickId(self.slots.len() - 1)
    }

    pub fn get(&self, id: BrickId) -> Option<&Brick> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: BrickId) -> Option<&mut Brick> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn remove(&mut self, id: BrickId) -> Option<Brick> {
        let brick = self.slots.get_mut(id.0)?.take()?;
        self.live -= 1;
        Some(brick)
    }

    /// Number of bricks still standing
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live bricks in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (BrickId, &Brick)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|brick| (BrickId(i), brick)))
    }
}

/// A line of text anchored at a position
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    pub pos: Vec2,
    pub text: String,
    pub style: TextStyle,
}

impl TextObject {
    pub fn new(pos: Vec2, text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            pos,
            text: text.into(),
            style,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_text(&self.text, self.pos, &self.style);
    }
}

/// Menu button interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Hover,
    Pressed,
}

/// What a menu button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Quit,
}

/// A clickable menu button
#[derive(Debug, Clone)]
pub struct Button {
    pub body: Body,
    pub label: TextObject,
    pub state: ButtonState,
    pub action: MenuAction,
    /// Background per state: normal, hover, pressed
    pub colors: [Color; 3],
}

impl Button {
    pub fn new(
        bounds: Rect,
        text: &str,
        action: MenuAction,
        padding: f32,
        style: TextStyle,
        colors: [Color; 3],
    ) -> Self {
        let label = TextObject::new(
            Vec2::new(bounds.left() + padding, bounds.top() + padding),
            text,
            style,
        );
        Self {
            body: Body::at_rest(bounds),
            label,
            state: ButtonState::Normal,
            action,
            colors,
        }
    }

    pub fn back_color(&self) -> Color {
        match self.state {
            ButtonState::Normal => self.colors[0],
            ButtonState::Hover => self.colors[1],
            ButtonState::Pressed => self.colors[2],
        }
    }

    /// Track hover/press state; returns the action when a click completes
    pub fn handle_mouse(&mut self, action: MouseAction, pos: Vec2) -> Option<MenuAction> {
        let inside = self.body.bounds.contains_point(pos);
        match action {
            MouseAction::Move => {
                if inside {
                    if self.state != ButtonState::Pressed {
                        self.state = ButtonState::Hover;
                    }
                } else {
                    self.state = ButtonState::Normal;
                }
                None
            }
            MouseAction::Down => {
                if inside {
                    self.state = ButtonState::Pressed;
                }
                None
            }
            MouseAction::Up => {
                if self.state == ButtonState::Pressed {
                    self.state = ButtonState::Hover;
                    Some(self.action)
                } else {
                    None
                }
            }
        }
    }
}

impl GameObject for Button {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.body.bounds, self.back_color());
        self.label.draw(canvas);
    }
}

/// State touched by collisions and special effects
#[derive(Debug, Clone)]
pub struct World {
    pub paddle: Paddle,
    pub ball: Ball,
    pub score: u64,
    pub lives: u32,
    pub points_per_brick: u32,
    /// Paddle width before any effect
    pub base_paddle_width: f32,
    /// Vertical speed change currently applied by an effect
    pub ball_speed_bias: f32,
}

impl EffectTarget for World {
    fn widen_paddle(&mut self, fraction: f32) {
        self.paddle.widen(self.base_paddle_width * fraction);
    }

    fn change_ball_speed(&mut self, delta: f32) {
        let vy = self.ball.body.velocity.y;
        self.ball.body.velocity.y = vy.signum() * (vy.abs() + delta);
        self.ball_speed_bias += delta;
    }

    fn set_points_per_brick(&mut self, points: u32) {
        self.points_per_brick = points;
    }

    fn add_life(&mut self) {
        self.lives += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN_W: f32 = 800.0;

    fn paddle_at(x: f32) -> Paddle {
        Paddle::new(Rect::new(x, 560.0, 80.0, 20.0), [1.0; 4], 10.0, SCREEN_W)
    }

    #[test]
    fn test_paddle_clamped_at_left_wall() {
        let mut paddle = paddle_at(0.0);
        paddle.handle_key(Key::Left, true);
        paddle.update();
        assert_eq!(paddle.body.left(), 0.0);
    }

    #[test]
    fn test_paddle_moves_partial_step_to_wall() {
        let mut paddle = paddle_at(4.0);
        paddle.handle_key(Key::Left, true);
        paddle.update();
        assert_eq!(paddle.body.left(), 0.0);

        let mut paddle = paddle_at(SCREEN_W - 80.0 - 3.0);
        paddle.handle_key(Key::Right, true);
        paddle.update();
        assert_eq!(paddle.body.right(), SCREEN_W);
    }

    #[test]
    fn test_paddle_follows_held_keys() {
        let mut paddle = paddle_at(300.0);
        paddle.handle_key(Key::Right, true);
        paddle.update();
        assert_eq!(paddle.body.left(), 310.0);

        // Repeated key-down events do not flip the intent off
        paddle.handle_key(Key::Right, true);
        paddle.update();
        assert_eq!(paddle.body.left(), 320.0);

        paddle.handle_key(Key::Right, false);
        paddle.update();
        assert_eq!(paddle.body.left(), 320.0);
        assert_eq!(paddle.spin(), 0.0);
    }

    #[test]
    fn test_left_wins_when_both_held() {
        let mut paddle = paddle_at(300.0);
        paddle.handle_key(Key::Right, true);
        paddle.handle_key(Key::Left, true);
        paddle.update();
        assert_eq!(paddle.body.left(), 290.0);
        assert_eq!(paddle.spin(), -1.0);
    }

    #[test]
    fn test_widen_stays_on_screen() {
        let mut paddle = paddle_at(0.0);
        paddle.widen(40.0);
        assert_eq!(paddle.width(), 120.0);
        assert_eq!(paddle.body.left(), 0.0);
    }

    #[test]
    fn test_brick_store_handles_survive_removal() {
        let mut store = BrickStore::new();
        let brick = |x| Brick {
            body: Body::at_rest(Rect::new(x, 0.0, 10.0, 10.0)),
            color: [1.0; 4],
            effect: None,
        };
        let a = store.insert(brick(0.0));
        let b = store.insert(brick(10.0));
        let c = store.insert(brick(20.0));

        assert!(store.remove(b).is_some());
        assert!(store.remove(b).is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(c).unwrap().body.left(), 20.0);
        let ids: Vec<BrickId> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_button_click_cycle() {
        let style = TextStyle {
            font: "Arial".into(),
            size: 20.0,
            color: [1.0; 4],
            centered: false,
        };
        let mut button = Button::new(
            Rect::new(20.0, 300.0, 80.0, 50.0),
            "PLAY",
            MenuAction::Play,
            5.0,
            style,
            [[0.0; 4], [0.5; 4], [1.0; 4]],
        );
        let inside = Vec2::new(30.0, 310.0);
        let outside = Vec2::new(200.0, 10.0);

        assert_eq!(button.handle_mouse(MouseAction::Move, inside), None);
        assert_eq!(button.state, ButtonState::Hover);
        assert_eq!(button.handle_mouse(MouseAction::Down, inside), None);
        assert_eq!(button.state, ButtonState::Pressed);
        // Still pressed while hovering
        button.handle_mouse(MouseAction::Move, inside);
        assert_eq!(button.state, ButtonState::Pressed);
        assert_eq!(
            button.handle_mouse(MouseAction::Up, inside),
            Some(MenuAction::Play)
        );
        assert_eq!(button.state, ButtonState::Hover);

        button.handle_mouse(MouseAction::Move, outside);
        assert_eq!(button.state, ButtonState::Normal);
        assert_eq!(button.handle_mouse(MouseAction::Up, outside), None);
    }
}
