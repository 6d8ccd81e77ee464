//! Sprites, textures, and keyed-frame animations.
//!
//! The store is a headless stand-in for the host renderer's display list:
//! game code creates sprites from named textures, selects frames, flips and
//! layers them; the animation registry holds named frame sequences that can
//! be played per-sprite. Nothing here rasterizes — tests and the renderer
//! adapter read the state back.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Named textures and spritesheets known to the engine.
///
/// Registration is idempotent so repeated scene construction (level restart)
/// does not duplicate work; `register` reports whether the key was new.
#[derive(Debug, Default)]
pub struct TextureStore {
    keys: HashSet<String>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    pub fn exists(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// Handle to a sprite in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(u32);

#[derive(Debug, Clone)]
struct Playing {
    anim: String,
    elapsed: f32,
}

/// A drawable entity at world coordinates.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub texture: String,
    pub frame: u32,
    pub flip_x: bool,
    pub depth: i32,
    playing: Option<Playing>,
}

/// A named looping or one-shot frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub start: u32,
    pub end: u32,
    pub frame_rate: f32,
    pub repeat: bool,
}

/// Registry of named animations, shared by all sprites.
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    anims: HashMap<String, Animation>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation unless the key already exists. Returns whether
    /// the registration happened, mirroring the duplicate-registration query
    /// scenes use across repeated construction.
    pub fn create(&mut self, key: &str, anim: Animation) -> bool {
        if self.anims.contains_key(key) {
            return false;
        }
        self.anims.insert(key.to_string(), anim);
        true
    }

    pub fn exists(&self, key: &str) -> bool {
        self.anims.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Animation> {
        self.anims.get(key)
    }
}

#[derive(Debug, Default)]
pub struct SpriteStore {
    sprites: Vec<Sprite>,
}

impl SpriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, x: f32, y: f32, texture: &str) -> SpriteId {
        self.sprites.push(Sprite {
            x,
            y,
            texture: texture.to_string(),
            frame: 0,
            flip_x: false,
            depth: 0,
            playing: None,
        });
        SpriteId(self.sprites.len() as u32 - 1)
    }

    pub fn get(&self, id: SpriteId) -> &Sprite {
        &self.sprites[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: SpriteId) -> &mut Sprite {
        &mut self.sprites[id.0 as usize]
    }

    pub fn set_position(&mut self, id: SpriteId, x: f32, y: f32) {
        let s = self.get_mut(id);
        s.x = x;
        s.y = y;
    }

    /// Select a static frame, stopping any playing animation.
    pub fn set_frame(&mut self, id: SpriteId, frame: u32) {
        let s = self.get_mut(id);
        s.frame = frame;
        s.playing = None;
    }

    pub fn set_flip_x(&mut self, id: SpriteId, flip: bool) {
        self.get_mut(id).flip_x = flip;
    }

    pub fn set_depth(&mut self, id: SpriteId, depth: i32) {
        self.get_mut(id).depth = depth;
    }

    /// Start a named animation on a sprite. A no-op when that animation is
    /// already playing, so per-state code can set it once on entry without
    /// restarting the loop.
    pub fn play(&mut self, anims: &AnimationRegistry, id: SpriteId, key: &str) {
        let Some(anim) = anims.get(key) else {
            tracing::warn!(key, "play requested for unknown animation");
            debug_assert!(false, "unknown animation {key:?}");
            return;
        };
        let s = self.get_mut(id);
        if s.playing.as_ref().is_some_and(|p| p.anim == key) {
            return;
        }
        s.frame = anim.start;
        s.playing = Some(Playing {
            anim: key.to_string(),
            elapsed: 0.0,
        });
    }

    /// Stop any playing animation, leaving the current frame displayed.
    pub fn stop(&mut self, id: SpriteId) {
        self.get_mut(id).playing = None;
    }

    pub fn is_playing(&self, id: SpriteId, key: &str) -> bool {
        self.get(id)
            .playing
            .as_ref()
            .is_some_and(|p| p.anim == key)
    }

    /// Advance all playing animations by `dt`.
    pub fn tick(&mut self, dt: f32, anims: &AnimationRegistry) {
        for sprite in &mut self.sprites {
            let Some(playing) = &mut sprite.playing else {
                continue;
            };
            let Some(anim) = anims.get(&playing.anim) else {
                continue;
            };
            playing.elapsed += dt;
            let len = anim.end - anim.start + 1;
            let steps = (playing.elapsed * anim.frame_rate) as u32;
            if anim.repeat {
                sprite.frame = anim.start + steps % len;
            } else if steps >= len {
                sprite.frame = anim.end;
                sprite.playing = None;
            } else {
                sprite.frame = anim.start + steps;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_anim() -> Animation {
        Animation {
            start: 0,
            end: 7,
            frame_rate: 10.0,
            repeat: true,
        }
    }

    #[test]
    fn texture_registration_is_idempotent() {
        let mut textures = TextureStore::new();
        assert!(textures.register("astronaut"));
        assert!(!textures.register("astronaut"));
        assert!(textures.exists("astronaut"));
        assert!(!textures.exists("rover"));
    }

    #[test]
    fn animation_create_skips_duplicates() {
        let mut anims = AnimationRegistry::new();
        assert!(anims.create("walk", walk_anim()));
        assert!(!anims.create(
            "walk",
            Animation {
                start: 4,
                end: 5,
                frame_rate: 1.0,
                repeat: false,
            }
        ));
        // First registration wins.
        assert_eq!(anims.get("walk").unwrap().end, 7);
    }

    #[test]
    fn play_is_idempotent_while_running() {
        let mut anims = AnimationRegistry::new();
        anims.create("walk", walk_anim());
        let mut sprites = SpriteStore::new();
        let id = sprites.create(0.0, 0.0, "astronaut");

        sprites.play(&anims, id, "walk");
        sprites.tick(0.35, &anims); // advance a few frames in
        let frame = sprites.get(id).frame;
        assert_ne!(frame, 0);

        // Re-playing the same animation must not restart the loop.
        sprites.play(&anims, id, "walk");
        assert_eq!(sprites.get(id).frame, frame);
        assert!(sprites.is_playing(id, "walk"));
    }

    #[test]
    fn looping_animation_wraps() {
        let mut anims = AnimationRegistry::new();
        anims.create("walk", walk_anim());
        let mut sprites = SpriteStore::new();
        let id = sprites.create(0.0, 0.0, "astronaut");
        sprites.play(&anims, id, "walk");

        // 10 fps over 8 frames: 0.95s lands on frame 9 % 8 = 1.
        sprites.tick(0.95, &anims);
        assert_eq!(sprites.get(id).frame, 1);
        assert!(sprites.is_playing(id, "walk"));
    }

    #[test]
    fn one_shot_animation_holds_last_frame() {
        let mut anims = AnimationRegistry::new();
        anims.create(
            "flash",
            Animation {
                start: 2,
                end: 4,
                frame_rate: 10.0,
                repeat: false,
            },
        );
        let mut sprites = SpriteStore::new();
        let id = sprites.create(0.0, 0.0, "fx");
        sprites.play(&anims, id, "flash");
        sprites.tick(1.0, &anims);
        assert_eq!(sprites.get(id).frame, 4);
        assert!(!sprites.is_playing(id, "flash"));
    }

    #[test]
    fn stop_freezes_the_current_frame() {
        let mut anims = AnimationRegistry::new();
        anims.create("walk", walk_anim());
        let mut sprites = SpriteStore::new();
        let id = sprites.create(0.0, 0.0, "astronaut");
        sprites.play(&anims, id, "walk");
        sprites.tick(0.35, &anims);
        let frame = sprites.get(id).frame;

        sprites.stop(id);
        assert!(!sprites.is_playing(id, "walk"));
        sprites.tick(1.0, &anims);
        assert_eq!(sprites.get(id).frame, frame);
    }

    #[test]
    fn set_frame_stops_playback() {
        let mut anims = AnimationRegistry::new();
        anims.create("walk", walk_anim());
        let mut sprites = SpriteStore::new();
        let id = sprites.create(0.0, 0.0, "astronaut");
        sprites.play(&anims, id, "walk");
        sprites.set_frame(id, 3);
        assert!(!sprites.is_playing(id, "walk"));
        sprites.tick(1.0, &anims);
        assert_eq!(sprites.get(id).frame, 3);
    }
}
