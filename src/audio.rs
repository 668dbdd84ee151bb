//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed! Cues
//! are fire-and-forget oscillator/gain graphs scheduled on the audio clock;
//! the game loop never waits on them.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Fruit eaten
    FruitEaten,
    /// Run ended
    GameOver,
    /// Sound just unmuted (confirmation blip)
    SoundOn,
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // Context creation can fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, muted: false }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self { muted: false }
    }

    /// Mute/unmute. Checked before *starting* a sound; tones already
    /// scheduled play out.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Resume the audio context (required after a user gesture)
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume(&self) {}

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::FruitEaten => {
                self.play_tone_at(ctx, 610.0, 0.06, 0.08, OscillatorType::Square, 0.0);
                self.play_tone_at(ctx, 780.0, 0.05, 0.07, OscillatorType::Triangle, 0.036);
            }
            SoundEffect::GameOver => {
                self.play_tone_at(ctx, 220.0, 0.18, 0.10, OscillatorType::Sawtooth, 0.0);
                self.play_tone_at(ctx, 140.0, 0.22, 0.08, OscillatorType::Triangle, 0.070);
            }
            SoundEffect::SoundOn => {
                self.play_tone_at(ctx, 520.0, 0.05, 0.06, OscillatorType::Triangle, 0.0);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, _effect: SoundEffect) {
        // No-op for native
    }

    /// Play a single tone, fire-and-forget
    #[cfg(target_arch = "wasm32")]
    pub fn play_tone(&self, freq: f32, duration: f64, gain: f32, osc_type: OscillatorType) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.play_tone_at(ctx, freq, duration, gain, osc_type, 0.0);
    }

    // === Tone synthesis ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
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

    /// Schedule one enveloped tone `offset` seconds from now. A quick
    /// exponential attack avoids the click of a hard start.
    #[cfg(target_arch = "wasm32")]
    fn play_tone_at(
        &self,
        ctx: &AudioContext,
        freq: f32,
        duration: f64,
        gain: f32,
        osc_type: OscillatorType,
        offset: f64,
    ) {
        let Some((osc, env)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + offset;

        env.gain().set_value_at_time(0.0001, t).ok();
        env.gain()
            .exponential_ramp_to_value_at_time(gain, t + 0.01)
            .ok();
        env.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration + 0.02).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mute_flag_round_trips() {
        let mut audio = AudioManager::new();
        assert!(!audio.muted());
        audio.set_muted(true);
        assert!(audio.muted());
        // Playing while muted must be a harmless no-op.
        audio.play(SoundEffect::FruitEaten);
    }
}
