//! Deterministic Mercury terrain: a seeded heightmap, one static collision
//! tile per grid cell beneath it, and a decorative surface overlay driven
//! by the same height data.

use planetaria_core::Engine;
use planetaria_core::graphics::LayerId;
use planetaria_core::physics::StaticGroupId;
use planetaria_core::sprite::SpriteId;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, WorldConfig};
use crate::surface::draw_surface;

/// Texture for body tiles (rocky fill, no border).
pub const TILE_TEXTURE: &str = "mercury-tile";
/// Texture for the topmost tile of each column (lit top edge).
pub const TILE_TOP_TEXTURE: &str = "mercury-tile-top";

/// Depth of the decorative surface layer: behind the player, above the sky.
const SURFACE_DEPTH: i32 = -1;

const LCG_MULTIPLIER: i64 = 16_807;
const LCG_MODULUS: i64 = 2_147_483_647;

/// Park–Miller linear congruential generator.
///
/// The terrain profile is defined in terms of this exact sequence, so the
/// same seed reproduces the same world on every run and platform.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: i64,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        let state = i64::from(seed) % LCG_MODULUS;
        Self {
            // The Lehmer sequence degenerates at zero.
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f32 {
        self.state = self.state * LCG_MULTIPLIER % LCG_MODULUS;
        ((self.state - 1) as f64 / (LCG_MODULUS - 1) as f64) as f32
    }
}

/// Solid rows per terrain column, the shared source of truth for both the
/// collision tiles and the decorative overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightMap {
    rows: Vec<u32>,
    tile_size: f32,
    world_height: f32,
}

impl HeightMap {
    /// Generate the column heights for a world. Layered low- and
    /// high-frequency sine terms plus a small seeded perturbation give a
    /// rugged-but-continuous profile; a pure sine would read as rolling
    /// hills, pure noise as static.
    pub fn generate(world: &WorldConfig) -> Result<Self, ConfigError> {
        world.validate()?;

        let total_cols = world.cols();
        let mut rng = Lcg::new(world.seed);
        let min_rows = world.min_rows as i32;
        let max_extra = world.max_extra as i32;

        let mut rows = Vec::with_capacity(total_cols);
        for col in 0..total_cols {
            let t = col as f32 / total_cols as f32;
            let coarse = (t * std::f32::consts::PI * 6.0).sin() * 2.5;
            let medium = (t * std::f32::consts::PI * 17.0 + 1.7).sin() * 1.5;
            let fine = (rng.next_unit() - 0.5) * 2.0;
            let extra = (world.max_extra as f32 / 2.0 + coarse + medium + fine).round() as i32;
            let clamped = (min_rows + extra).clamp(min_rows, min_rows + max_extra);
            rows.push(clamped as u32);
        }

        Ok(Self {
            rows,
            tile_size: world.tile_size,
            world_height: world.height,
        })
    }

    pub fn cols(&self) -> usize {
        self.rows.len()
    }

    /// Solid rows stacked up from the world floor at `col`.
    pub fn rows(&self, col: usize) -> u32 {
        self.rows[col]
    }

    /// World-space y of the walkable surface at `col` (top face of the
    /// column's highest tile; y-down coordinates).
    pub fn top_y(&self, col: usize) -> f32 {
        self.world_height - self.rows[col] as f32 * self.tile_size
    }

    /// Column index containing world-space `x`, clamped to the grid.
    pub fn col_at(&self, x: f32) -> usize {
        let col = (x / self.tile_size).floor().max(0.0) as usize;
        col.min(self.rows.len().saturating_sub(1))
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }
}

#[derive(Debug)]
struct TerrainTile {
    col: u32,
    row: u32,
    is_top: bool,
    #[allow(dead_code)]
    sprite: SpriteId,
}

/// The built terrain: an opaque collidable group plus the heightmap it was
/// built from. Build-once — there is no mutation API; tiles live for the
/// whole level.
#[derive(Debug)]
pub struct Terrain {
    group: StaticGroupId,
    heights: HeightMap,
    surface: LayerId,
    tiles: Vec<TerrainTile>,
}

impl Terrain {
    /// Generate the heightmap, place one immovable tile per `(col, row)`
    /// cell, and draw the decorative surface overlay from the same heights.
    pub fn build(engine: &mut Engine, world: &WorldConfig) -> Result<Self, ConfigError> {
        let heights = HeightMap::generate(world)?;

        // Tile textures are generated once; level restarts reuse them.
        engine.textures.register(TILE_TEXTURE);
        engine.textures.register(TILE_TOP_TEXTURE);

        let group = engine.physics.create_static_group();
        let tile = world.tile_size;
        let mut tiles = Vec::new();

        for col in 0..heights.cols() {
            let x = col as f32 * tile;
            let rows = heights.rows(col);
            for row in 0..rows {
                let y = world.height - (row + 1) as f32 * tile;
                let is_top = row == rows - 1;
                let texture = if is_top { TILE_TOP_TEXTURE } else { TILE_TEXTURE };

                let cx = x + tile / 2.0;
                let cy = y + tile / 2.0;
                let sprite = engine.sprites.create(cx, cy, texture);
                engine.physics.add_static_rect(group, cx, cy, tile, tile);
                tiles.push(TerrainTile {
                    col: col as u32,
                    row,
                    is_top,
                    sprite,
                });
            }
        }

        let surface = engine.graphics.create_layer();
        let layer = engine.graphics.layer_mut(surface);
        layer.set_depth(SURFACE_DEPTH);
        draw_surface(layer, &heights, world);

        tracing::info!(
            cols = heights.cols(),
            tiles = tiles.len(),
            seed = world.seed,
            "built mercury terrain"
        );

        Ok(Self {
            group,
            heights,
            surface,
            tiles,
        })
    }

    /// The collidable-group handle the orchestrator registers the player
    /// against. The tiles themselves are not exposed.
    pub fn group(&self) -> StaticGroupId {
        self.group
    }

    pub fn heights(&self) -> &HeightMap {
        &self.heights
    }

    /// The decorative overlay layer.
    pub fn surface_layer(&self) -> LayerId {
        self.surface
    }
}
