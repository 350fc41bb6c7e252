//! Platform layer
//!
//! Binds the game to its host page on wasm32:
//! - `dom`: DOM anchors and show/hide helpers
//! - `web`: `initGameUI`, event listeners and the animation-frame loop

use crate::consts::VIEWPORT_FRACTION;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Canvas size for a viewport: a fixed fraction of each side, whole pixels
pub fn playfield_size(viewport_width: f64, viewport_height: f64) -> (u32, u32) {
    let scale = |v: f64| (v.max(0.0) * VIEWPORT_FRACTION).floor() as u32;
    (scale(viewport_width), scale(viewport_height))
}

/// Lazy audio start-up, gated on the first Start click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AudioStart {
    #[default]
    NotRequested,
    /// Context created, resume promise in flight
    Pending,
    /// Audio is up, or failed and the game plays muted
    Settled,
}

/// What a Start click should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAction {
    /// Bring audio up first, open the game once it settles
    RequestAudio,
    OpenGame,
    /// Audio is still starting; the pending start will open the game
    Ignore,
}

impl AudioStart {
    pub fn on_start_click(&mut self) -> StartAction {
        match self {
            AudioStart::NotRequested => {
                *self = AudioStart::Pending;
                StartAction::RequestAudio
            }
            AudioStart::Pending => StartAction::Ignore,
            AudioStart::Settled => StartAction::OpenGame,
        }
    }

    pub fn settle(&mut self) {
        *self = AudioStart::Settled;
    }
}
