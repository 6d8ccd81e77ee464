//! The astronaut: input-driven movement plus a six-state pose machine.
//!
//! Platformer movement runs Idle/Walking on the ground, a timed JumpLaunch
//! crouch before the impulse, Rising and Falling in the air, and a timed
//! Landing recovery. The two timed states own a scheduler handle; entering
//! any state cancels the previous handle, so a stale elapse can never leak
//! into a later state. The top-down profile reuses the same controller with
//! gravity off and only Idle/Walking wired in.

use planetaria_core::Engine;
use planetaria_core::clock::TimerHandle;
use planetaria_core::input::{InputError, Key};
use planetaria_core::physics::BodyId;
use planetaria_core::sprite::{Animation, SpriteId};

use crate::config::{MovementProfile, PlayerConfig};

/// Spritesheet key for the astronaut.
pub const PLAYER_TEXTURE: &str = "astronaut";
/// Walk-cycle animation key.
pub const WALK_ANIM: &str = "astronaut-walk";

/// Where the astronaut is in its movement/animation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Walking,
    /// Grounded crouch pose held for the launch delay; the jump impulse
    /// applies when the timer elapses.
    JumpLaunch,
    Rising,
    Falling,
    /// Grounded recovery pose held for the landing delay.
    Landing,
}

/// Player construction failure.
#[derive(Debug)]
pub enum PlayerError {
    /// No keyboard on the engine: an uncontrollable player is a setup bug,
    /// caught at construction rather than producing a frozen actor.
    Keyboard(InputError),
}

impl std::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyboard(e) => write!(f, "player needs input: {e}"),
        }
    }
}

impl std::error::Error for PlayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Keyboard(e) => Some(e),
        }
    }
}

impl From<InputError> for PlayerError {
    fn from(e: InputError) -> Self {
        Self::Keyboard(e)
    }
}

/// Per-frame sampled input, collapsed to intent.
#[derive(Debug, Clone, Copy)]
struct Intent {
    move_x: f32,
    move_y: f32,
    jump: bool,
}

pub struct Player {
    sprite: SpriteId,
    body: BodyId,
    config: PlayerConfig,
    state: PlayerState,
    pending: Option<TimerHandle>,
}

impl Player {
    /// Create the player at `(x, y)`: registers the spritesheet and walk
    /// animation, attaches a feet-aligned physics body, and verifies input
    /// is available up front.
    pub fn new(
        engine: &mut Engine,
        config: &PlayerConfig,
        x: f32,
        y: f32,
    ) -> Result<Self, PlayerError> {
        engine.keyboard()?;

        engine.textures.register(PLAYER_TEXTURE);
        engine.anims.create(
            WALK_ANIM,
            Animation {
                start: config.walk_frame_start,
                end: config.walk_frame_end,
                frame_rate: config.walk_frame_rate,
                repeat: true,
            },
        );

        let sprite = engine.sprites.create(x, y, PLAYER_TEXTURE);
        engine.sprites.set_frame(sprite, config.idle_frame);
        engine.sprites.set_depth(sprite, 10);

        let body = engine
            .physics
            .create_body(x, y, config.hitbox_width, config.hitbox_height);
        {
            let b = engine.physics.body_mut(body);
            // Feet-only hitbox: the box hangs at the bottom of the sprite.
            b.offset_y = (config.frame_height - config.hitbox_height) / 2.0;
            b.collide_world_bounds = true;
            b.allow_gravity = config.profile == MovementProfile::Platformer;
        }

        Ok(Self {
            sprite,
            body,
            config: config.clone(),
            state: PlayerState::Idle,
            pending: None,
        })
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn sprite(&self) -> SpriteId {
        self.sprite
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Per-frame tick. Reads the previous frame's contact flags and
    /// velocities (physics steps after scene update), applies input, and
    /// advances the state machine.
    pub fn update(&mut self, engine: &mut Engine) {
        let intent = self.sample_intent(engine);
        match self.config.profile {
            MovementProfile::Platformer => self.update_platformer(engine, intent),
            MovementProfile::TopDown => self.update_top_down(engine, intent),
        }

        let body = engine.physics.body(self.body);
        let (x, y) = (body.x, body.y);
        engine.sprites.set_position(self.sprite, x, y);
    }

    fn sample_intent(&self, engine: &Engine) -> Intent {
        let kb = engine
            .keyboard()
            .expect("keyboard verified at player construction");
        let left = kb.is_down(Key::A) || kb.is_down(Key::Left);
        let right = kb.is_down(Key::D) || kb.is_down(Key::Right);
        let up = kb.is_down(Key::W) || kb.is_down(Key::Up);
        let down = kb.is_down(Key::S) || kb.is_down(Key::Down);
        Intent {
            move_x: f32::from(right as i8 - left as i8),
            move_y: f32::from(down as i8 - up as i8),
            jump: kb.is_down(Key::Space) || up,
        }
    }

    fn update_platformer(&mut self, engine: &mut Engine, intent: Intent) {
        let grounded = engine.physics.blocked(self.body).down;
        let vy = engine.physics.body(self.body).vy;

        // Horizontal control in every state, air included.
        engine
            .physics
            .set_velocity_x(self.body, intent.move_x * self.config.speed);
        self.update_facing(engine, intent.move_x);

        match self.state {
            PlayerState::Idle => {
                if !grounded {
                    self.enter(engine, PlayerState::Falling);
                } else if intent.jump {
                    self.enter(engine, PlayerState::JumpLaunch);
                } else if intent.move_x != 0.0 {
                    self.enter(engine, PlayerState::Walking);
                }
            },
            PlayerState::Walking => {
                if !grounded {
                    self.enter(engine, PlayerState::Falling);
                } else if intent.jump {
                    self.enter(engine, PlayerState::JumpLaunch);
                } else if intent.move_x == 0.0 {
                    self.enter(engine, PlayerState::Idle);
                }
            },
            PlayerState::JumpLaunch => {
                if self.timer_elapsed(engine) {
                    engine
                        .physics
                        .set_velocity_y(self.body, -self.config.jump_velocity);
                    self.enter(engine, PlayerState::Rising);
                }
            },
            PlayerState::Rising => {
                // Apex, or a head bump zeroing the climb.
                if vy >= 0.0 {
                    self.enter(engine, PlayerState::Falling);
                }
            },
            PlayerState::Falling => {
                if grounded {
                    self.enter(engine, PlayerState::Landing);
                }
            },
            PlayerState::Landing => {
                if self.timer_elapsed(engine) {
                    let next = if intent.move_x != 0.0 {
                        PlayerState::Walking
                    } else {
                        PlayerState::Idle
                    };
                    self.enter(engine, next);
                }
            },
        }
    }

    fn update_top_down(&mut self, engine: &mut Engine, intent: Intent) {
        let (mut nx, mut ny) = (intent.move_x, intent.move_y);
        if nx != 0.0 && ny != 0.0 {
            // Diagonals must not outrun straight movement.
            nx *= std::f32::consts::FRAC_1_SQRT_2;
            ny *= std::f32::consts::FRAC_1_SQRT_2;
        }
        engine
            .physics
            .set_velocity(self.body, nx * self.config.speed, ny * self.config.speed);
        self.update_facing(engine, intent.move_x);

        let moving = nx != 0.0 || ny != 0.0;
        match (self.state, moving) {
            (PlayerState::Idle, true) => self.enter(engine, PlayerState::Walking),
            (PlayerState::Walking, false) => self.enter(engine, PlayerState::Idle),
            _ => {},
        }
    }

    /// Face the direction of travel; keep the last facing when stopped.
    fn update_facing(&mut self, engine: &mut Engine, move_x: f32) {
        if move_x < 0.0 {
            engine.sprites.set_flip_x(self.sprite, true);
        } else if move_x > 0.0 {
            engine.sprites.set_flip_x(self.sprite, false);
        }
    }

    fn timer_elapsed(&mut self, engine: &mut Engine) -> bool {
        let Some(handle) = self.pending else {
            return false;
        };
        if engine.scheduler.consume_fired(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Switch state: cancel any outstanding timer, arm the new state's
    /// timer if it has one, and apply the new pose.
    fn enter(&mut self, engine: &mut Engine, next: PlayerState) {
        if let Some(handle) = self.pending.take() {
            engine.scheduler.cancel(handle);
        }
        tracing::debug!(from = ?self.state, to = ?next, "player state change");
        self.state = next;
        self.pending = match next {
            PlayerState::JumpLaunch => Some(engine.scheduler.schedule(self.config.launch_delay)),
            PlayerState::Landing => Some(engine.scheduler.schedule(self.config.landing_delay)),
            _ => None,
        };
        self.apply_pose(engine);
    }

    /// Tear down scheduler state. A pending launch or landing timer must
    /// not outlive its owner when the player is removed mid-level.
    pub fn destroy(&mut self, engine: &mut Engine) {
        if let Some(handle) = self.pending.take() {
            engine.scheduler.cancel(handle);
        }
    }

    fn apply_pose(&mut self, engine: &mut Engine) {
        let c = &self.config;
        match self.state {
            PlayerState::Idle => engine.sprites.set_frame(self.sprite, c.idle_frame),
            PlayerState::Walking => {
                let Engine { sprites, anims, .. } = engine;
                sprites.play(anims, self.sprite, WALK_ANIM);
            },
            PlayerState::JumpLaunch => engine.sprites.set_frame(self.sprite, c.launch_frame),
            PlayerState::Rising => engine.sprites.set_frame(self.sprite, c.rise_frame),
            PlayerState::Falling => engine.sprites.set_frame(self.sprite, c.fall_frame),
            PlayerState::Landing => engine.sprites.set_frame(self.sprite, c.land_frame),
        }
    }
}
