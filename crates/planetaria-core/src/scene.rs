//! Scene lifecycle and the aggregate engine handed to scenes.

use crate::camera::Camera;
use crate::clock::Scheduler;
use crate::graphics::GraphicsStore;
use crate::input::{InputError, Keyboard};
use crate::physics::PhysicsWorld;
use crate::sprite::{AnimationRegistry, SpriteStore, TextureStore};

/// Default viewport size (pixels).
pub const VIEW_WIDTH: f32 = 640.0;
pub const VIEW_HEIGHT: f32 = 360.0;

/// Everything the host engine offers a scene: textures, sprites,
/// animations, physics, graphics layers, camera, scheduler, and keyboard.
///
/// The keyboard is optional at construction so headless and automated runs
/// can exist; components that need input must go through [`Engine::keyboard`]
/// and surface the error at setup time.
#[derive(Debug)]
pub struct Engine {
    pub textures: TextureStore,
    pub sprites: SpriteStore,
    pub anims: AnimationRegistry,
    pub physics: PhysicsWorld,
    pub graphics: GraphicsStore,
    pub camera: Camera,
    pub scheduler: Scheduler,
    keyboard: Option<Keyboard>,
}

impl Engine {
    /// Engine with a keyboard attached, sized to the given world bounds.
    pub fn new(world_width: f32, world_height: f32) -> Self {
        Self::build(world_width, world_height, Some(Keyboard::new()))
    }

    /// Engine with no input device (e.g. replay or CI rendering).
    pub fn without_keyboard(world_width: f32, world_height: f32) -> Self {
        Self::build(world_width, world_height, None)
    }

    fn build(world_width: f32, world_height: f32, keyboard: Option<Keyboard>) -> Self {
        Self {
            textures: TextureStore::new(),
            sprites: SpriteStore::new(),
            anims: AnimationRegistry::new(),
            physics: PhysicsWorld::new(world_width, world_height),
            graphics: GraphicsStore::new(),
            camera: Camera::new(VIEW_WIDTH, VIEW_HEIGHT),
            scheduler: Scheduler::new(),
            keyboard,
        }
    }

    pub fn keyboard(&self) -> Result<&Keyboard, InputError> {
        self.keyboard.as_ref().ok_or(InputError::KeyboardUnavailable)
    }

    pub fn keyboard_mut(&mut self) -> Result<&mut Keyboard, InputError> {
        self.keyboard.as_mut().ok_or(InputError::KeyboardUnavailable)
    }
}

/// Error surfaced by scene setup.
#[derive(Debug)]
pub enum SceneError {
    Input(InputError),
    /// A component failed to build (bad configuration, missing asset).
    Setup(Box<dyn std::error::Error + Send + Sync>),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Setup(e) => write!(f, "scene setup: {e}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) => Some(e),
            Self::Setup(e) => Some(e.as_ref()),
        }
    }
}

impl From<InputError> for SceneError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

impl SceneError {
    pub fn setup<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        Self::Setup(Box::new(e))
    }
}

/// The scene capability set: declare assets, build the world, then receive
/// a per-frame tick. Components depend on this narrow protocol rather than
/// any renderer base class.
pub trait Scene {
    fn preload(&mut self, engine: &mut Engine) -> Result<(), SceneError>;
    fn create(&mut self, engine: &mut Engine) -> Result<(), SceneError>;
    fn update(&mut self, engine: &mut Engine, dt: f32);
}

/// Drives a scene with the fixed frame order:
/// scheduler → scene update → physics → animations → camera.
///
/// Because physics steps *after* the scene update, game logic always reads
/// the previous frame's collision flags and velocities — the contract the
/// player state machine is written against. The scheduler ticking first
/// guarantees a timer scheduled during an update cannot fire the same frame.
pub struct SceneRunner<S: Scene> {
    pub engine: Engine,
    pub scene: S,
}

impl<S: Scene> SceneRunner<S> {
    /// Run preload + create, failing fast on configuration errors.
    pub fn new(mut engine: Engine, mut scene: S) -> Result<Self, SceneError> {
        scene.preload(&mut engine)?;
        scene.create(&mut engine)?;
        Ok(Self { engine, scene })
    }

    /// Advance one frame.
    pub fn frame(&mut self, dt: f32) {
        self.engine.scheduler.tick(dt);
        self.scene.update(&mut self.engine, dt);
        self.engine.physics.step(dt);
        let Engine {
            sprites,
            anims,
            camera,
            ..
        } = &mut self.engine;
        sprites.tick(dt, anims);
        camera.update(sprites);
    }

    /// Advance `n` frames of `dt` each.
    pub fn run(&mut self, n: usize, dt: f32) {
        for _ in 0..n {
            self.frame(dt);
        }
    }
}
