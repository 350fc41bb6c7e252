//! Player input mapping
//!
//! Keyboard and on-screen touch controls each keep their own held state;
//! the two are OR'd together, so either source can fly the ship. Discrete
//! actions (fire, restart, close) come back as [`Command`]s.

use crate::sim::{TickInput, Turn};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Thrust,
    RotateLeft,
    RotateRight,
    Fire,
    Restart,
    Close,
}

impl Key {
    /// Parse a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Thrust),
            "ArrowLeft" => Some(Key::RotateLeft),
            "ArrowRight" => Some(Key::RotateRight),
            " " | "Spacebar" => Some(Key::Fire),
            "r" | "R" => Some(Key::Restart),
            "Escape" => Some(Key::Close),
            _ => None,
        }
    }
}

/// On-screen touch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchControl {
    Left,
    Right,
    Thrust,
    Shoot,
}

impl TouchControl {
    pub const ALL: [TouchControl; 4] = [
        TouchControl::Left,
        TouchControl::Right,
        TouchControl::Thrust,
        TouchControl::Shoot,
    ];

    /// DOM id of the control
    pub fn element_id(&self) -> &'static str {
        match self {
            TouchControl::Left => "touch-left",
            TouchControl::Right => "touch-right",
            TouchControl::Thrust => "touch-thrust",
            TouchControl::Shoot => "touch-shoot",
        }
    }
}

/// One-shot actions produced by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fire,
    Restart,
    Close,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Held {
    thrust: bool,
    left: bool,
    right: bool,
}

/// Held-control state from both input sources
#[derive(Debug, Clone, Default)]
pub struct InputController {
    keys: Held,
    touch: Held,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed (also called on auto-repeat)
    pub fn key_down(&mut self, key: Key, game_over: bool) -> Option<Command> {
        match key {
            Key::Thrust => self.keys.thrust = true,
            Key::RotateLeft => self.keys.left = true,
            Key::RotateRight => self.keys.right = true,
            Key::Fire => return Some(Command::Fire),
            Key::Restart => return game_over.then_some(Command::Restart),
            Key::Close => return Some(Command::Close),
        }
        None
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Thrust => self.keys.thrust = false,
            Key::RotateLeft => self.keys.left = false,
            Key::RotateRight => self.keys.right = false,
            Key::Fire | Key::Restart | Key::Close => {}
        }
    }

    /// Touch control pressed
    pub fn touch_start(&mut self, control: TouchControl) -> Option<Command> {
        match control {
            TouchControl::Left => self.touch.left = true,
            TouchControl::Right => self.touch.right = true,
            TouchControl::Thrust => self.touch.thrust = true,
            TouchControl::Shoot => return Some(Command::Fire),
        }
        None
    }

    /// Touch control released or cancelled
    pub fn touch_end(&mut self, control: TouchControl) {
        match control {
            TouchControl::Left => self.touch.left = false,
            TouchControl::Right => self.touch.right = false,
            TouchControl::Thrust => self.touch.thrust = false,
            TouchControl::Shoot => {}
        }
    }

    pub fn thrusting(&self) -> bool {
        self.keys.thrust || self.touch.thrust
    }

    /// Current turn direction; right wins when both are held
    pub fn turn(&self) -> Turn {
        if self.keys.right || self.touch.right {
            Turn::Right
        } else if self.keys.left || self.touch.left {
            Turn::Left
        } else {
            Turn::None
        }
    }

    /// Snapshot for the next simulation step
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            thrust: self.thrusting(),
            turn: self.turn(),
        }
    }

    /// Release everything (session closed)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::from_key("ArrowUp"), Some(Key::Thrust));
        assert_eq!(Key::from_key(" "), Some(Key::Fire));
        assert_eq!(Key::from_key("R"), Some(Key::Restart));
        assert_eq!(Key::from_key("Escape"), Some(Key::Close));
        assert_eq!(Key::from_key("ArrowDown"), None);
        assert_eq!(Key::from_key("x"), None);
    }

    #[test]
    fn test_thrust_held_and_released() {
        let mut input = InputController::new();
        assert!(!input.thrusting());
        assert_eq!(input.key_down(Key::Thrust, false), None);
        assert!(input.thrusting());
        input.key_up(Key::Thrust);
        assert!(!input.thrusting());
    }

    #[test]
    fn test_rotation_precedence() {
        let mut input = InputController::new();
        input.key_down(Key::RotateLeft, false);
        assert_eq!(input.turn(), Turn::Left);
        input.key_down(Key::RotateRight, false);
        assert_eq!(input.turn(), Turn::Right);
        input.key_up(Key::RotateRight);
        assert_eq!(input.turn(), Turn::Left);
        input.key_up(Key::RotateLeft);
        assert_eq!(input.turn(), Turn::None);
    }

    #[test]
    fn test_touch_and_keyboard_are_ored() {
        let mut input = InputController::new();
        input.touch_start(TouchControl::Thrust);
        input.key_down(Key::Thrust, false);
        input.key_up(Key::Thrust);
        // Touch still holds thrust
        assert!(input.thrusting());
        input.touch_end(TouchControl::Thrust);
        assert!(!input.thrusting());

        input.touch_start(TouchControl::Left);
        assert_eq!(
            input.tick_input(),
            TickInput {
                thrust: false,
                turn: Turn::Left
            }
        );
    }

    #[test]
    fn test_commands() {
        let mut input = InputController::new();
        assert_eq!(input.key_down(Key::Fire, false), Some(Command::Fire));
        assert_eq!(input.touch_start(TouchControl::Shoot), Some(Command::Fire));
        assert_eq!(input.key_down(Key::Close, false), Some(Command::Close));
        // Restart only counts once the run is over
        assert_eq!(input.key_down(Key::Restart, false), None);
        assert_eq!(input.key_down(Key::Restart, true), Some(Command::Restart));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = InputController::new();
        input.key_down(Key::Thrust, false);
        input.touch_start(TouchControl::Right);
        input.clear();
        assert_eq!(input.tick_input(), TickInput::default());
    }

    #[test]
    fn test_touch_ids() {
        let ids: Vec<_> = TouchControl::ALL.iter().map(|c| c.element_id()).collect();
        assert_eq!(ids, ["touch-left", "touch-right", "touch-thrust", "touch-shoot"]);
    }
}
