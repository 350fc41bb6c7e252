//! Game tuning and preferences
//!
//! Every field has a default, so a host page only needs to supply the values
//! it wants to change. On the web the JSON is read from an optional
//! `<script id="game-config" type="application/json">` element.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Start with sound disabled
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Effective output gain
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Ship ===
    pub player_radius: f32,
    /// Multiplicative speed decay applied every step
    pub friction: f32,
    /// Speed gained per step while thrusting
    pub thrust: f32,
    pub max_speed: f32,
    /// Radians per step while a rotate control is held
    pub rotation_step: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub max_bullets: usize,

    // === Asteroids ===
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub split_threshold: f32,
    pub wave_size: usize,

    // === Scoring ===
    pub split_points: u32,
    pub destroy_points: u32,

    // === Background ===
    pub star_count: usize,

    pub audio: AudioSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            friction: PLAYER_FRICTION,
            thrust: PLAYER_THRUST,
            max_speed: PLAYER_MAX_SPEED,
            rotation_step: ROTATION_STEP,

            bullet_speed: BULLET_SPEED,
            max_bullets: MAX_BULLETS,

            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_max_radius: ASTEROID_MAX_RADIUS,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            split_threshold: SPLIT_THRESHOLD,
            wave_size: WAVE_SIZE,

            split_points: SPLIT_POINTS,
            destroy_points: DESTROY_POINTS,

            star_count: STAR_COUNT,

            audio: AudioSettings::default(),
        }
    }
}

impl GameConfig {
    /// DOM id of the inline JSON config block
    pub const ELEMENT_ID: &'static str = "game-config";

    /// Parse a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Clamp values that would break the simulation
    fn sanitize(&mut self) {
        if self.asteroid_max_radius < self.asteroid_min_radius {
            std::mem::swap(&mut self.asteroid_min_radius, &mut self.asteroid_max_radius);
        }
        if self.asteroid_max_speed < self.asteroid_min_speed {
            std::mem::swap(&mut self.asteroid_min_speed, &mut self.asteroid_max_speed);
        }
        self.friction = self.friction.clamp(0.0, 1.0);
        self.wave_size = self.wave_size.max(1);
    }

    /// Load config from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from #{}", Self::ELEMENT_ID);
                    config
                }
                Err(e) => {
                    log::warn!("Invalid game config ({e}), using defaults");
                    Self::default()
                }
            },
            None => {
                log::info!("Using default game config");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "max_bullets": 8, "audio": { "muted": true } }"#)
            .unwrap();
        assert_eq!(config.max_bullets, 8);
        assert!(config.audio.muted);
        assert_eq!(config.audio.master_volume, 0.8);
        assert_eq!(config.wave_size, WAVE_SIZE);
        assert_eq!(config.split_points, 20);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(GameConfig::from_json("{ max_bullets: }").is_err());
    }

    #[test]
    fn test_sanitize_swaps_inverted_ranges() {
        let config =
            GameConfig::from_json(r#"{ "asteroid_min_radius": 50, "asteroid_max_radius": 10 }"#)
                .unwrap();
        assert_eq!(config.asteroid_min_radius, 10.0);
        assert_eq!(config.asteroid_max_radius, 50.0);
    }

    #[test]
    fn test_muted_volume_is_zero() {
        let audio = AudioSettings {
            master_volume: 1.0,
            muted: true,
        };
        assert_eq!(audio.effective_volume(), 0.0);
    }
}
