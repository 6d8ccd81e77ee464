//! Headless host-engine capability surface for Planetaria.
//!
//! Game crates consume this narrow boundary — sprites and animations,
//! arcade physics with static tile groups, key polling, a cancellable
//! one-shot scheduler, graphics display lists, and a follow camera —
//! instead of a full rendering engine. A renderer adapter replays the
//! sprite and graphics state; tests drive everything directly.

pub mod camera;
pub mod clock;
pub mod graphics;
pub mod input;
pub mod physics;
pub mod scene;
pub mod sprite;

pub use scene::{Engine, Scene, SceneError, SceneRunner};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::input::Key;
    use crate::scene::Engine;

    /// Headless engine with a keyboard, for driving scenes from tests.
    pub fn test_engine(world_width: f32, world_height: f32) -> Engine {
        Engine::new(world_width, world_height)
    }

    /// Press or release a key on a test engine.
    pub fn set_key(engine: &mut Engine, key: Key, down: bool) {
        engine
            .keyboard_mut()
            .expect("test engine always has a keyboard")
            .set_down(key, down);
    }

    /// Release every key.
    pub fn release_all(engine: &mut Engine) {
        engine
            .keyboard_mut()
            .expect("test engine always has a keyboard")
            .release_all();
    }
}
