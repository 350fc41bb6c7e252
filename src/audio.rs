//! Sound cues
//!
//! The simulation never depends on sound. The session talks to an injected
//! [`AudioSink`]; [`NullAudio`] stands in until (or unless) Web Audio comes up.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet fired
    Shoot,
    /// Asteroid destroyed - noise burst
    AsteroidExplosion,
    /// Ship destroyed - low membrane drop
    PlayerExplosion,
}

/// Fire-and-forget audio output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    /// Start or stop the continuous engine tone
    fn set_thrust(&mut self, on: bool);
}

/// Silent sink used when audio is unavailable
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
    fn set_thrust(&mut self, _on: bool) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioBuffer, AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::config::AudioSettings;

    /// Engine tone level (about -25 dB)
    const THRUST_GAIN: f32 = 0.056;
    /// Length of the shared white-noise buffer (seconds)
    const NOISE_SECONDS: f32 = 0.4;

    /// Procedural sound effects on the Web Audio API - no asset files
    pub struct WebAudio {
        ctx: AudioContext,
        volume: f32,
        noise: Option<AudioBuffer>,
        thrust: Option<(OscillatorNode, GainNode)>,
    }

    impl WebAudio {
        /// Create the audio context (may fail outside a secure context)
        pub fn new(settings: &AudioSettings) -> Result<Self, JsValue> {
            let ctx = AudioContext::new()?;
            let noise = white_noise(&ctx)
                .map_err(|e| log::warn!("Noise buffer unavailable: {e:?}"))
                .ok();
            Ok(Self {
                ctx,
                volume: settings.effective_volume(),
                noise,
                thrust: None,
            })
        }

        /// Resume the context; browsers start it suspended until a user gesture
        pub async fn resume(&self) -> Result<(), JsValue> {
            JsFuture::from(self.ctx.resume()?).await?;
            Ok(())
        }

        /// Create an oscillator with gain envelope
        fn create_osc(&self, freq: f32, osc_type: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
            let osc = self.ctx.create_oscillator().ok()?;
            let gain = self.ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Shot - short triangle blip at C5
        fn play_shoot(&self) {
            let Some((osc, gain)) = self.create_osc(523.25, OscillatorType::Triangle) else {
                return;
            };
            let t = self.ctx.current_time();

            gain.gain().set_value_at_time(0.001, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(self.volume * 0.3, t + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.32).ok();
        }

        /// Rock explosion - white-noise burst
        fn play_noise_burst(&self) {
            let Some(buffer) = &self.noise else { return };
            let Ok(source) = self.ctx.create_buffer_source() else {
                return;
            };
            let Ok(gain) = self.ctx.create_gain() else {
                return;
            };
            source.set_buffer(Some(buffer));
            if source.connect_with_audio_node(&gain).is_err()
                || gain.connect_with_audio_node(&self.ctx.destination()).is_err()
            {
                return;
            }
            let t = self.ctx.current_time();

            gain.gain().set_value_at_time(self.volume * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();

            source.start().ok();
            source.stop_with_when(t + f64::from(NOISE_SECONDS)).ok();
        }

        /// Ship explosion - pitch drop to C2 with a long tail
        fn play_membrane(&self) {
            let Some((osc, gain)) = self.create_osc(650.0, OscillatorType::Sine) else {
                return;
            };
            let t = self.ctx.current_time();

            gain.gain().set_value_at_time(self.volume * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 1.8)
                .ok();
            osc.frequency().set_value_at_time(650.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(65.4, t + 0.05)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 2.0).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            match effect {
                SoundEffect::Shoot => self.play_shoot(),
                SoundEffect::AsteroidExplosion => self.play_noise_burst(),
                SoundEffect::PlayerExplosion => self.play_membrane(),
            }
        }

        fn set_thrust(&mut self, on: bool) {
            if on && self.thrust.is_none() && self.volume > 0.0 {
                if let Some((osc, gain)) = self.create_osc(50.0, OscillatorType::Sawtooth) {
                    gain.gain().set_value(self.volume * THRUST_GAIN);
                    if osc.start().is_ok() {
                        self.thrust = Some((osc, gain));
                    }
                }
            } else if !on {
                if let Some((osc, _gain)) = self.thrust.take() {
                    osc.stop().ok();
                }
            }
        }
    }

    impl Drop for WebAudio {
        fn drop(&mut self) {
            self.set_thrust(false);
            let _ = self.ctx.close();
        }
    }

    /// Mono buffer of uniform white noise
    fn white_noise(ctx: &AudioContext) -> Result<AudioBuffer, JsValue> {
        let rate = ctx.sample_rate();
        let len = (rate * NOISE_SECONDS) as u32;
        let buffer = ctx.create_buffer(1, len, rate)?;
        let samples: Vec<f32> = (0..len)
            .map(|_| (js_sys::Math::random() * 2.0 - 1.0) as f32)
            .collect();
        buffer.copy_to_channel(&samples, 0)?;
        Ok(buffer)
    }
}

