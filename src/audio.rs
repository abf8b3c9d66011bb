//! Audio system using Web Audio API
//!
//! Procedurally generated pops - no sound files to load. Every failure here
//! is swallowed: a missing or suspended AudioContext just means silence.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bubble popped; pitch rises with the combo multiplier
    Pop { multiplier: u32 },
    /// A bubble came back during regeneration
    Reveal,
    /// Grid fully regenerated
    RegenerationDone,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
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

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let played = match effect {
            SoundEffect::Pop { multiplier } => self.play_pop(ctx, vol, multiplier),
            SoundEffect::Reveal => self.play_reveal(ctx, vol),
            SoundEffect::RegenerationDone => self.play_done(ctx, vol),
        };
        if played.is_none() {
            log::debug!("Sound {:?} could not be played", effect);
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
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

    /// Pop - short downward blip with a click on top
    fn play_pop(&self, ctx: &AudioContext, vol: f32, multiplier: u32) -> Option<()> {
        let t = ctx.current_time();
        let pitch = 1.0 + (multiplier.saturating_sub(1) as f32) * 0.12;

        let (osc, gain) = self.create_osc(ctx, 700.0 * pitch, OscillatorType::Sine)?;
        gain.gain().set_value_at_time(vol * 0.5, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok()?;
        osc.frequency().set_value_at_time(700.0 * pitch, t).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(180.0 * pitch, t + 0.07)
            .ok()?;
        osc.start().ok()?;
        osc.stop_with_when(t + 0.1).ok()?;

        let (click, click_gain) = self.create_osc(ctx, 2400.0, OscillatorType::Square)?;
        click_gain.gain().set_value_at_time(vol * 0.08, t).ok()?;
        click_gain
            .gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.015)
            .ok()?;
        click.start().ok()?;
        click.stop_with_when(t + 0.02).ok()?;
        Some(())
    }

    /// Reveal - faint high tick
    fn play_reveal(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        let (osc, gain) = self.create_osc(ctx, 1200.0, OscillatorType::Triangle)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.06, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.04)
            .ok()?;
        osc.start().ok()?;
        osc.stop_with_when(t + 0.05).ok()?;
        Some(())
    }

    /// Regeneration done - soft rising chime
    fn play_done(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        for (i, freq) in [523.0, 659.0, 784.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            let (osc, gain) = self.create_osc(ctx, *freq, OscillatorType::Sine)?;
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.2, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok()?;
            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + 0.35).ok()?;
        }
        Some(())
    }
}
