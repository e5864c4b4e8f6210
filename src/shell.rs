//! Fixed-rate frame loop
//!
//! One frame: poll input and dispatch it to the scene, update, play queued
//! sounds, clear, draw, overlay any message, present. A message freezes the
//! loop (input included) for the message duration.

use glam::Vec2;

use crate::Color;
use crate::colors;
use crate::config::Config;
use crate::platform::{AudioSink, Canvas, Clock, InputEvent, InputSource, TextStyle};
use crate::sim::{Breakout, GameEvent};

/// What the frame loop drives
pub trait Scene {
    fn handle_event(&mut self, event: &InputEvent);
    /// One simulation step at `now` seconds
    fn update(&mut self, now: f64);
    fn draw(&self, canvas: &mut dyn Canvas);
    fn drain_events(&mut self) -> Vec<GameEvent>;
    fn is_finished(&self) -> bool;
    fn background(&self) -> Color;
}

impl Scene for Breakout {
    fn handle_event(&mut self, event: &InputEvent) {
        Breakout::handle_event(self, event);
    }

    fn update(&mut self, now: f64) {
        self.tick(now);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        Breakout::draw(self, canvas);
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        Breakout::drain_events(self)
    }

    fn is_finished(&self) -> bool {
        Breakout::is_finished(self)
    }

    fn background(&self) -> Color {
        self.config().background
    }
}

/// Loop timing and message overlay settings
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub frame_rate: f32,
    pub message_duration: f64,
    pub message_pos: Vec2,
    pub message_style: TextStyle,
}

impl LoopSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            frame_rate: config.frame_rate,
            message_duration: config.message_duration,
            message_pos: Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0),
            message_style: TextStyle {
                font: config.font_name.clone(),
                size: config.font_size,
                color: colors::WHITE,
                centered: true,
            },
        }
    }

    /// Seconds per tick
    pub fn tick_duration(&self) -> f64 {
        1.0 / f64::from(self.frame_rate)
    }
}

/// Frame loop over a scene and its platform collaborators
pub struct Shell<S, C, I, A, K> {
    scene: S,
    canvas: C,
    input: I,
    audio: A,
    clock: K,
    settings: LoopSettings,
    /// Clock time until which the loop is frozen by a message
    hold_until: f64,
    frames: u64,
}

impl<S, C, I, A, K> Shell<S, C, I, A, K>
where
    S: Scene,
    C: Canvas,
    I: InputSource,
    A: AudioSink,
    K: Clock,
{
    pub fn new(scene: S, canvas: C, input: I, audio: A, clock: K, settings: LoopSettings) -> Self {
        Self {
            scene,
            canvas,
            input,
            audio,
            clock,
            settings,
            hold_until: 0.0,
            frames: 0,
        }
    }

    /// Seconds of message hold left
    pub fn hold_remaining(&self) -> f64 {
        (self.hold_until - self.clock.elapsed()).max(0.0)
    }

    /// Run one frame; returns false once the scene has finished
    ///
    /// While a message is being held the frame is skipped entirely.
    pub fn frame(&mut self) -> bool {
        if self.hold_remaining() > 0.0 {
            return true;
        }

        for event in self.input.poll_events() {
            self.scene.handle_event(&event);
        }

        let now = self.clock.elapsed();
        self.scene.update(now);

        let mut message = None;
        for event in self.scene.drain_events() {
            match event {
                GameEvent::Sound(effect) => self.audio.play(effect),
                GameEvent::Message(text) => message = Some(text),
            }
        }

        self.canvas.clear(self.scene.background());
        self.scene.draw(&mut self.canvas);
        if let Some(text) = &message {
            self.canvas
                .draw_text(text, self.settings.message_pos, &self.settings.message_style);
        }
        self.canvas.present();
        self.frames += 1;

        if message.is_some() {
            self.hold_until = self.clock.elapsed() + self.settings.message_duration;
        }
        !self.scene.is_finished()
    }

    /// Blocking loop paced to the tick rate, for hosts with a sleeping clock
    pub fn run(&mut self) {
        let tick = self.settings.tick_duration();
        loop {
            let hold = self.hold_remaining();
            if hold > 0.0 {
                self.clock.sleep(hold);
            }
            let start = self.clock.elapsed();
            if !self.frame() {
                break;
            }
            let spent = self.clock.elapsed() - start;
            self.clock.sleep(tick - spent);
        }
        // Let the final message stay up
        let hold = self.hold_remaining();
        self.clock.sleep(hold);
        log::info!("Loop finished after {} frames", self.frames);
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut K {
        &mut self.clock
    }

    pub fn into_scene(self) -> S {
        self.scene
    }
}
