//! Audio system using Web Audio API
//!
//! Every sound is a short oscillator tone sequence; no sample files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{AudioSink, SoundEffect};

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    /// `volume` is the configured master volume, 0.0 mutes
    pub fn new(volume: f32) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// One decaying tone starting `delay` seconds from now
    fn tone(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        level: f32,
        decay: f64,
        delay: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;
        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + decay)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + decay + 0.05).ok();
    }

    /// Paddle hit - solid thump
    fn play_paddle_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Brick destroyed - bright crack over a soft body
    fn play_brick_hit(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, 900.0, OscillatorType::Square, vol * 0.15, 0.06, 0.0);
        self.tone(ctx, 300.0, OscillatorType::Triangle, vol * 0.3, 0.12, 0.0);
    }

    /// Ball lost - falling tone
    fn play_life_lost(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.6)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.7).ok();
    }

    /// Special effect - rising arpeggio
    fn play_effect(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [600.0, 800.0, 1000.0].into_iter().enumerate() {
            self.tone(ctx, freq, OscillatorType::Sine, vol * 0.25, 0.15, i as f64 * 0.08);
        }
    }

    fn play_win(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 500.0, 600.0, 800.0, 1000.0].into_iter().enumerate() {
            self.tone(ctx, freq, OscillatorType::Triangle, vol * 0.3, 0.35, i as f64 * 0.1);
        }
    }

    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].into_iter().enumerate() {
            self.tone(ctx, freq, OscillatorType::Sine, vol * 0.3, 0.3, i as f64 * 0.2);
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::PaddleHit => self.play_paddle_hit(ctx, vol),
            SoundEffect::WallHit => {
                self.tone(ctx, 400.0, OscillatorType::Sine, vol * 0.3, 0.08, 0.0)
            }
            SoundEffect::BrickHit => self.play_brick_hit(ctx, vol),
            SoundEffect::LifeLost => self.play_life_lost(ctx, vol),
            SoundEffect::EffectActivated => self.play_effect(ctx, vol),
            SoundEffect::Win => self.play_win(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }
}
