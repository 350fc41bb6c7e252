//! Play session controller
//!
//! Owns the world, the input state and the audio sink, and moves through
//! `Idle -> ControlsModalOpen -> Playing -> GameOver -> Playing | Idle`.
//! Nothing here touches the DOM; the platform layer mirrors the phase onto
//! the page.

use crate::audio::{AudioSink, NullAudio, SoundEffect};
use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::{Command, InputController, Key, TouchControl};
use crate::sim::{GameEvent, World, fire, tick};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Game closed; the page is in control
    #[default]
    Idle,
    /// Controls help shown, waiting for Start
    ControlsModalOpen,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart or close
    GameOver,
}

/// Inputs to the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    OpenControls,
    Start,
    PlayerDestroyed,
    Restart,
    Close,
}

impl SessionPhase {
    /// Next phase for `event`, or `None` if the event doesn't apply here
    pub fn next(self, event: SessionEvent) -> Option<SessionPhase> {
        use SessionEvent as E;
        use SessionPhase as P;
        match (self, event) {
            (P::Idle, E::OpenControls) => Some(P::ControlsModalOpen),
            (P::ControlsModalOpen, E::Start) => Some(P::Playing),
            (P::Playing, E::PlayerDestroyed) => Some(P::GameOver),
            (P::GameOver, E::Restart) => Some(P::Playing),
            (P::ControlsModalOpen | P::Playing | P::GameOver, E::Close) => Some(P::Idle),
            _ => None,
        }
    }

    /// Whether the game overlay (canvas + listeners) is live
    pub fn is_open(self) -> bool {
        matches!(self, SessionPhase::Playing | SessionPhase::GameOver)
    }
}

/// What happened during one display frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Simulation steps run
    pub steps: u32,
    pub score_changed: bool,
    /// The run ended during this frame
    pub game_over: bool,
}

/// One open game and everything it owns
pub struct Session {
    phase: SessionPhase,
    world: World,
    input: InputController,
    audio: Box<dyn AudioSink>,
    accumulator: f32,
    thrust_tone: bool,
}

impl Session {
    pub fn new(config: GameConfig, width: f32, height: f32) -> Self {
        Self {
            phase: SessionPhase::Idle,
            world: World::new(0, width, height, config),
            input: InputController::new(),
            audio: Box::new(NullAudio),
            accumulator: 0.0,
            thrust_tone: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Swap in a real audio backend once it is available
    pub fn set_audio(&mut self, audio: Box<dyn AudioSink>) {
        self.audio.set_thrust(false);
        self.audio = audio;
        self.thrust_tone = false;
        self.sync_thrust_tone();
    }

    fn transition(&mut self, event: SessionEvent) -> bool {
        match self.phase.next(event) {
            Some(next) => {
                log::debug!("Session {:?} -> {:?} on {:?}", self.phase, next, event);
                self.phase = next;
                true
            }
            None => {
                log::debug!("Ignoring {:?} in {:?}", event, self.phase);
                false
            }
        }
    }

    /// Show the controls help
    pub fn open_controls(&mut self) -> bool {
        self.transition(SessionEvent::OpenControls)
    }

    /// Leave the controls help and begin a fresh run
    pub fn start(&mut self, seed: u64) -> bool {
        if !self.transition(SessionEvent::Start) {
            return false;
        }
        self.begin_run(seed);
        true
    }

    /// Begin a fresh run after game over
    pub fn restart(&mut self, seed: u64) -> bool {
        if !self.transition(SessionEvent::Restart) {
            return false;
        }
        self.begin_run(seed);
        true
    }

    fn begin_run(&mut self, seed: u64) {
        self.world.reset(seed);
        self.accumulator = 0.0;
        log::info!("Run started with seed {seed}");
        self.sync_thrust_tone();
    }

    /// Close the game from any open phase
    pub fn close(&mut self) -> bool {
        if !self.transition(SessionEvent::Close) {
            return false;
        }
        self.input.clear();
        self.accumulator = 0.0;
        self.sync_thrust_tone();
        true
    }

    /// Keep the viewport-driven playfield size current
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
    }

    /// Handle a key press. Fire is handled here; restart and close are
    /// returned for the host, which owns seeds and the page.
    pub fn key_down(&mut self, key: Key) -> Option<Command> {
        if !self.phase.is_open() {
            return None;
        }
        let command = self.input.key_down(key, self.world.game_over);
        self.sync_thrust_tone();
        self.dispatch(command)
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
        self.sync_thrust_tone();
    }

    pub fn touch_start(&mut self, control: TouchControl) -> Option<Command> {
        if !self.phase.is_open() {
            return None;
        }
        let command = self.input.touch_start(control);
        self.sync_thrust_tone();
        self.dispatch(command)
    }

    pub fn touch_end(&mut self, control: TouchControl) {
        self.input.touch_end(control);
        self.sync_thrust_tone();
    }

    fn dispatch(&mut self, command: Option<Command>) -> Option<Command> {
        match command {
            Some(Command::Fire) => {
                if self.phase == SessionPhase::Playing {
                    if let Some(event) = fire(&mut self.world) {
                        self.handle_event(&event);
                    }
                }
                None
            }
            other => other,
        }
    }

    /// Engine tone follows thrust, but only while actually playing
    fn sync_thrust_tone(&mut self) {
        let wanted = self.phase == SessionPhase::Playing && self.input.thrusting();
        if wanted != self.thrust_tone {
            self.audio.set_thrust(wanted);
            self.thrust_tone = wanted;
        }
    }

    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BulletFired => self.audio.play(SoundEffect::Shoot),
            GameEvent::AsteroidDestroyed { .. } => self.audio.play(SoundEffect::AsteroidExplosion),
            GameEvent::PlayerDestroyed { final_score, .. } => {
                self.audio.play(SoundEffect::PlayerExplosion);
                self.transition(SessionEvent::PlayerDestroyed);
                self.sync_thrust_tone();
                log::info!("Game over - final score {final_score}");
            }
            GameEvent::WaveSpawned { count } => log::info!("New wave of {count} asteroids"),
        }
    }

    /// Advance by a display frame's worth of time (seconds) in fixed steps
    pub fn advance(&mut self, frame_dt: f32) -> FrameReport {
        let mut report = FrameReport::default();
        if self.phase != SessionPhase::Playing {
            return report;
        }

        let score_before = self.world.score;
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        while self.accumulator >= SIM_DT && report.steps < MAX_SUBSTEPS {
            let input = self.input.tick_input();
            let events = tick(&mut self.world, &input);
            self.accumulator -= SIM_DT;
            report.steps += 1;

            for event in &events {
                self.handle_event(event);
            }
            if self.phase == SessionPhase::GameOver {
                report.game_over = true;
                self.accumulator = 0.0;
                break;
            }
        }
        // Drop backlog we could not simulate rather than replaying it later
        self.accumulator = self.accumulator.min(SIM_DT);

        report.score_changed = self.world.score != score_before;
        report
    }

    /// HUD score text
    pub fn score_text(&self) -> String {
        format!("SCORE: {}", self.world.score)
    }

    /// Game-over panel text
    pub fn final_score_text(&self) -> String {
        format!("FINAL SCORE: {}", self.world.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Cue {
        Play(SoundEffect),
        Thrust(bool),
    }

    #[derive(Clone, Default)]
    struct RecordingAudio(Rc<RefCell<Vec<Cue>>>);

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.0.borrow_mut().push(Cue::Play(effect));
        }
        fn set_thrust(&mut self, on: bool) {
            self.0.borrow_mut().push(Cue::Thrust(on));
        }
    }

    fn playing_session() -> (Session, Rc<RefCell<Vec<Cue>>>) {
        let mut session = Session::new(GameConfig::default(), 800.0, 600.0);
        let audio = RecordingAudio::default();
        let log = audio.0.clone();
        session.set_audio(Box::new(audio));
        assert!(session.open_controls());
        assert!(session.start(1234));
        (session, log)
    }

    /// Park every rock in a corner, motionless, away from the ship
    fn park_asteroids(session: &mut Session) {
        let world = &mut session.world;
        world.asteroids.truncate(1);
        world.asteroids[0].pos = Vec2::new(40.0, 40.0);
        world.asteroids[0].radius = 10.0;
        world.asteroids[0].speed = 0.0;
    }

    #[test]
    fn test_phase_transitions() {
        use SessionEvent as E;
        use SessionPhase as P;
        assert_eq!(P::Idle.next(E::OpenControls), Some(P::ControlsModalOpen));
        assert_eq!(P::ControlsModalOpen.next(E::Start), Some(P::Playing));
        assert_eq!(P::Playing.next(E::PlayerDestroyed), Some(P::GameOver));
        assert_eq!(P::GameOver.next(E::Restart), Some(P::Playing));
        assert_eq!(P::GameOver.next(E::Close), Some(P::Idle));
        assert_eq!(P::Playing.next(E::Close), Some(P::Idle));

        assert_eq!(P::Idle.next(E::Start), None);
        assert_eq!(P::Playing.next(E::Restart), None);
        assert_eq!(P::Idle.next(E::Close), None);
        assert_eq!(P::GameOver.next(E::PlayerDestroyed), None);
    }

    #[test]
    fn test_run_laid_out_for_resized_playfield() {
        let mut session = Session::new(GameConfig::default(), 800.0, 600.0);
        session.open_controls();
        // Viewport changed while the game was closed
        session.resize(1200.0, 900.0);
        assert!(session.start(1));

        let world = session.world();
        assert_eq!(world.size, Vec2::new(1200.0, 900.0));
        assert_eq!(world.player.pos, Vec2::new(600.0, 450.0));
        for star in &world.stars {
            assert!(star.pos.x <= 1200.0 && star.pos.y <= 900.0);
        }
        // Wave spawns stay in the outer bands, clear of the centred ship
        for a in &world.asteroids {
            let dx = (a.pos.x - 600.0).abs();
            let dy = (a.pos.y - 450.0).abs();
            assert!(dx >= 239.0 && dy >= 179.0, "asteroid at {:?}", a.pos);
        }
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut session = Session::new(GameConfig::default(), 800.0, 600.0);
        assert_eq!(session.key_down(Key::Close), None);
        assert_eq!(session.key_down(Key::Fire), None);
        assert!(session.world().bullets.is_empty());
    }

    #[test]
    fn test_fire_plays_cue() {
        let (mut session, log) = playing_session();
        assert_eq!(session.key_down(Key::Fire), None);
        assert_eq!(session.world().bullets.len(), 1);
        assert_eq!(log.borrow().last(), Some(&Cue::Play(SoundEffect::Shoot)));
    }

    #[test]
    fn test_thrust_tone_follows_input() {
        let (mut session, log) = playing_session();
        session.key_down(Key::Thrust);
        session.touch_start(TouchControl::Thrust);
        session.key_up(Key::Thrust);
        session.touch_end(TouchControl::Thrust);
        assert_eq!(*log.borrow(), vec![Cue::Thrust(true), Cue::Thrust(false)]);
    }

    #[test]
    fn test_fixed_steps_per_frame() {
        let (mut session, _) = playing_session();
        park_asteroids(&mut session);
        // Two 60 Hz steps in a 33 ms frame
        let report = session.advance(2.0 / 60.0 + 0.001);
        assert_eq!(report.steps, 2);
        // A 120 Hz display alternates between 0 and 1 steps
        let steps: u32 = (0..4).map(|_| session.advance(1.0 / 120.0).steps).sum();
        assert_eq!(steps, 2);
        // Long stalls are capped
        assert_eq!(session.advance(5.0).steps, MAX_SUBSTEPS);
    }

    #[test]
    fn test_game_over_and_restart() {
        let (mut session, log) = playing_session();
        session.key_down(Key::Thrust);
        let world = &mut session.world;
        world.score = 90;
        let ship = world.player.pos;
        world.asteroids[0].pos = ship;

        let report = session.advance(SIM_DT);
        assert!(report.game_over);
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.final_score_text(), "FINAL SCORE: 90");
        assert!(log.borrow().contains(&Cue::Play(SoundEffect::PlayerExplosion)));
        assert_eq!(log.borrow().last(), Some(&Cue::Thrust(false)));

        // Frozen until restarted
        assert_eq!(session.advance(1.0).steps, 0);
        assert_eq!(session.key_down(Key::Fire), None);
        assert!(session.world().bullets.is_empty());

        assert_eq!(session.key_down(Key::Restart), Some(Command::Restart));
        assert!(session.restart(99));
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.world().score, 0);
        assert_eq!(session.score_text(), "SCORE: 0");
        assert_eq!(session.world().asteroids.len(), 5);
    }

    #[test]
    fn test_restart_key_ignored_while_playing() {
        let (mut session, _) = playing_session();
        assert_eq!(session.key_down(Key::Restart), None);
        assert!(!session.restart(5));
    }

    #[test]
    fn test_escape_requests_close() {
        let (mut session, log) = playing_session();
        session.key_down(Key::Thrust);
        assert_eq!(session.key_down(Key::Close), Some(Command::Close));
        assert!(session.close());
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(log.borrow().last(), Some(&Cue::Thrust(false)));
        assert_eq!(session.advance(1.0), FrameReport::default());
    }

    #[test]
    fn test_score_reported() {
        let (mut session, log) = playing_session();
        park_asteroids(&mut session);
        let world = &mut session.world;
        let rock = world.asteroids[0].pos;
        world.bullets.push(crate::sim::Bullet {
            pos: rock,
            vel: Vec2::ZERO,
        });
        let report = session.advance(SIM_DT);
        assert!(report.score_changed);
        assert_eq!(session.score_text(), "SCORE: 50");
        assert!(log.borrow().contains(&Cue::Play(SoundEffect::AsteroidExplosion)));
    }
}
