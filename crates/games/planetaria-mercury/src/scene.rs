//! The Mercury level scene: wires terrain, player, collision, and camera
//! together and ticks the player each frame. All behavior lives in the
//! components; the scene is assembly only.

use planetaria_core::{Engine, Scene, SceneError};

use crate::config::{MercuryConfig, MovementProfile};
use crate::player::{PLAYER_TEXTURE, Player};
use crate::terrain::Terrain;

/// Texture for the crashed SS Astra, a decorative landmark near spawn.
pub const SHIP_TEXTURE: &str = "ss-astra";
/// Behind the terrain overlay.
const SHIP_DEPTH: i32 = -5;

pub struct MercuryScene {
    config: MercuryConfig,
    terrain: Option<Terrain>,
    player: Option<Player>,
}

impl MercuryScene {
    pub fn new(config: MercuryConfig) -> Self {
        Self {
            config,
            terrain: None,
            player: None,
        }
    }

    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }
}

impl Scene for MercuryScene {
    fn preload(&mut self, engine: &mut Engine) -> Result<(), SceneError> {
        // Terrain tiles are generated at build time; only the astronaut
        // spritesheet and the ship image load up front.
        engine.textures.register(PLAYER_TEXTURE);
        engine.textures.register(SHIP_TEXTURE);
        Ok(())
    }

    fn create(&mut self, engine: &mut Engine) -> Result<(), SceneError> {
        let world = &self.config.world;
        engine.physics.set_bounds(world.width, world.height);
        engine.physics.gravity_y = match self.config.player.profile {
            MovementProfile::Platformer => self.config.player.gravity,
            MovementProfile::TopDown => 0.0,
        };

        // The crashed ship sits half-buried near the western edge.
        let ship_y = world.height - world.tile_size * 5.0 - 250.0;
        let ship = engine.sprites.create(200.0, ship_y, SHIP_TEXTURE);
        engine.sprites.set_depth(ship, SHIP_DEPTH);

        let terrain = Terrain::build(engine, world).map_err(SceneError::setup)?;

        // Spawn centered, just above the local surface, so the opening
        // frames are a short drop onto the terrain.
        let spawn_x = world.width / 2.0;
        let surface_y = terrain.heights().top_y(terrain.heights().col_at(spawn_x));
        let spawn_y = surface_y - self.config.player.frame_height * 2.0;

        let player = Player::new(engine, &self.config.player, spawn_x, spawn_y)
            .map_err(SceneError::setup)?;
        engine.physics.add_collider(player.body(), terrain.group());

        engine.camera.set_bounds(world.width, world.height);
        engine.camera.set_lerp(self.config.camera.lerp);
        engine
            .camera
            .set_deadzone(self.config.camera.deadzone_x, self.config.camera.deadzone_y);
        engine.camera.start_follow(player.sprite(), &engine.sprites);

        tracing::info!(
            profile = ?self.config.player.profile,
            spawn_x,
            spawn_y,
            "mercury scene created"
        );

        self.terrain = Some(terrain);
        self.player = Some(player);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _dt: f32) {
        if let Some(player) = &mut self.player {
            player.update(engine);
        }
    }
}
