use serde::{Deserialize, Serialize};

/// Keys the engine exposes to game code. Kept deliberately small: the
/// capability surface is boolean pressed-state polling, nothing more.
/// Serializable so input scripts and replays can name keys in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
}

const KEY_COUNT: usize = 9;

impl Key {
    const fn index(self) -> usize {
        match self {
            Key::W => 0,
            Key::A => 1,
            Key::S => 2,
            Key::D => 3,
            Key::Up => 4,
            Key::Down => 5,
            Key::Left => 6,
            Key::Right => 7,
            Key::Space => 8,
        }
    }
}

/// Current pressed-state of the keyboard, updated by the host platform
/// layer and polled by game code once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keyboard {
    down: [bool; KEY_COUNT],
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_down(&mut self, key: Key, is_down: bool) {
        self.down[key.index()] = is_down;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    pub fn release_all(&mut self) {
        self.down = [false; KEY_COUNT];
    }
}

#[derive(Debug)]
pub enum InputError {
    /// The engine was constructed without a keyboard. A scene that needs
    /// input must fail at setup rather than run an uncontrollable actor.
    KeyboardUnavailable,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyboardUnavailable => write!(f, "keyboard input not available"),
        }
    }
}

impl std::error::Error for InputError {}
