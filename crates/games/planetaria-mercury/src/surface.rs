//! Decorative Mercury surface overlay.
//!
//! Purely visual: a jagged ridgeline with layered crust fills, craters,
//! boulders, dust speckles, and surface cracks. Collision is handled by the
//! terrain tile group; everything here reads the same heightmap so the
//! visuals line up with the walkable surface.

use planetaria_core::graphics::Graphics;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WorldConfig;
use crate::terrain::HeightMap;

const CRUST_COLOR: u32 = 0x3a3028;
const SUBSURFACE_COLOR: u32 = 0x4e4438;
const DEEP_LAYER_COLOR: u32 = 0x302820;
const RIDGE_COLOR: u32 = 0x9a8a72;
const RIDGE_FAINT_COLOR: u32 = 0xbba882;

const CRATER_COUNT: usize = 60;
const BOULDER_COUNT: usize = 120;
const DUST_COUNT: usize = 250;
const CRACK_COUNT: usize = 50;

/// Ridgeline vertices: one per terrain column at the column's walkable top,
/// with sub-tile jitter, bookended at the world edges so fills reach them.
pub fn ridge_points(heights: &HeightMap, world: &WorldConfig, rng: &mut StdRng) -> Vec<(f32, f32)> {
    let tile = heights.tile_size();
    let mut points = Vec::with_capacity(heights.cols() + 2);
    for col in 0..heights.cols() {
        let x = col as f32 * tile + tile / 2.0;
        let jitter = (rng.random::<f32>() - 0.5) * 4.0;
        points.push((x, heights.top_y(col) + jitter));
    }
    let first_y = points.first().map_or(world.height, |p| p.1);
    let last_y = points.last().map_or(world.height, |p| p.1);
    points.insert(0, (0.0, first_y));
    points.push((world.width, last_y));
    points
}

/// Ridge y at world-space `x`, for anchoring scattered decoration.
fn surface_y_at(points: &[(f32, f32)], x: f32, world_width: f32) -> f32 {
    let interior = points.len() - 2;
    let idx = ((x / world_width) * interior as f32).floor() as isize;
    let idx = idx.clamp(0, interior as isize - 1) as usize + 1;
    points[idx].1
}

/// Closed polygon from a ridgeline offset down by `drop`, around the bottom
/// of the world.
fn crust_polygon(points: &[(f32, f32)], drop: f32, world: &WorldConfig) -> Vec<(f32, f32)> {
    let mut poly: Vec<(f32, f32)> = points.iter().map(|&(x, y)| (x, y + drop)).collect();
    poly.push((world.width, world.height));
    poly.push((0.0, world.height));
    poly
}

/// Draw the full overlay into `layer`. Deterministic for a given world
/// config: scatter comes from an RNG seeded off the terrain seed, so the
/// same level always looks the same.
pub fn draw_surface(layer: &mut Graphics, heights: &HeightMap, world: &WorldConfig) {
    let mut rng = StdRng::seed_from_u64(u64::from(world.seed));
    let points = ridge_points(heights, world, &mut rng);

    // Layered crust fills, darkest on top.
    layer.fill_path(crust_polygon(&points, 0.0, world), CRUST_COLOR, 1.0);
    layer.fill_path(crust_polygon(&points, 6.0, world), SUBSURFACE_COLOR, 0.6);
    layer.fill_path(crust_polygon(&points, 18.0, world), DEEP_LAYER_COLOR, 0.4);

    // Ridgeline highlight plus a faint secondary line one pixel above.
    layer.stroke_path(points.clone(), 2.0, RIDGE_COLOR, 0.8);
    let raised: Vec<(f32, f32)> = points.iter().map(|&(x, y)| (x, y - 1.0)).collect();
    layer.stroke_path(raised, 1.0, RIDGE_FAINT_COLOR, 0.25);

    draw_craters(layer, &points, world, &mut rng);
    draw_boulders(layer, &points, world, &mut rng);
    draw_dust(layer, &points, world, &mut rng);
    draw_cracks(layer, &points, world, &mut rng);
}

fn draw_craters(layer: &mut Graphics, points: &[(f32, f32)], world: &WorldConfig, rng: &mut StdRng) {
    use std::f32::consts::PI;
    for _ in 0..CRATER_COUNT {
        let cx = rng.random::<f32>() * world.width;
        let r = 12.0 + rng.random::<f32>() * 30.0;
        let depth = 4.0 + rng.random::<f32>() * 10.0;
        let cy = surface_y_at(points, cx, world.width) + depth + 10.0;

        // Raised outer rim.
        layer.stroke_arc(cx, cy - 2.0, r + 2.0, PI * 1.05, PI * 1.95, 1.5, 0x8a7a62, 0.55);
        // Depression, darker toward the center.
        layer.fill_ellipse(cx, cy, r, r * 0.45, 0x1a1610, 0.8);
        layer.fill_ellipse(cx + 1.0, cy + 2.0, r * 0.7, r * 0.275, 0x0e0c08, 0.7);
        layer.fill_ellipse(cx + 2.0, cy + 3.0, r * 0.4, r * 0.15, 0x060504, 0.5);
        // Sun-facing lit rim (top-left) and shadow rim (bottom-right).
        layer.stroke_arc(cx, cy - 1.0, r * 0.95, PI * 1.15, PI * 1.6, 1.0, 0xaa9a78, 0.4);
        layer.stroke_arc(cx, cy + 1.0, r * 0.9, PI * 0.2, PI * 0.8, 1.0, 0x1e1a14, 0.3);
    }
}

fn draw_boulders(layer: &mut Graphics, points: &[(f32, f32)], world: &WorldConfig, rng: &mut StdRng) {
    for _ in 0..BOULDER_COUNT {
        let x = rng.random::<f32>() * world.width;
        let y = surface_y_at(points, x, world.width) + 2.0 + rng.random::<f32>() * 20.0;
        let size = 1.5 + rng.random::<f32>() * 4.0;
        let shade = 0x45 + rng.random_range(0u32..0x25);
        let color = (shade << 16) | ((shade - 0x08) << 8) | (shade - 0x15);
        let alpha = 0.6 + rng.random::<f32>() * 0.3;
        layer.fill_rect(x, y, size, size * 0.7, color, alpha);
    }
}

fn draw_dust(layer: &mut Graphics, points: &[(f32, f32)], world: &WorldConfig, rng: &mut StdRng) {
    for _ in 0..DUST_COUNT {
        let x = rng.random::<f32>() * world.width;
        let y = surface_y_at(points, x, world.width) + 2.0 + rng.random::<f32>() * 30.0;
        let size = 1.0 + rng.random::<f32>();
        let alpha = 0.2 + rng.random::<f32>() * 0.3;
        layer.fill_point(x, y, size, 0x6a5a48, alpha);
    }
}

fn draw_cracks(layer: &mut Graphics, points: &[(f32, f32)], world: &WorldConfig, rng: &mut StdRng) {
    for _ in 0..CRACK_COUNT {
        let x = rng.random::<f32>() * world.width;
        let y = surface_y_at(points, x, world.width) + 4.0 + rng.random::<f32>() * 25.0;
        let len = 15.0 + rng.random::<f32>() * 40.0;
        let sag = (rng.random::<f32>() - 0.5) * 6.0;
        let alpha = 0.3 + rng.random::<f32>() * 0.2;
        layer.stroke_path(vec![(x, y), (x + len, y + sag)], 1.0, 0x2a2218, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetaria_core::graphics::DrawOp;

    fn world() -> WorldConfig {
        WorldConfig {
            width: 320.0,
            height: 800.0,
            tile_size: 32.0,
            ..WorldConfig::default()
        }
    }

    fn built() -> (Graphics, HeightMap, WorldConfig) {
        let world = world();
        let heights = HeightMap::generate(&world).unwrap();
        let mut layer = Graphics::new();
        draw_surface(&mut layer, &heights, &world);
        (layer, heights, world)
    }

    #[test]
    fn ridge_follows_column_tops_within_jitter() {
        let world = world();
        let heights = HeightMap::generate(&world).unwrap();
        let mut rng = StdRng::seed_from_u64(u64::from(world.seed));
        let points = ridge_points(&heights, &world, &mut rng);

        // One point per column plus two bookends.
        assert_eq!(points.len(), heights.cols() + 2);
        assert_eq!(points[0].0, 0.0);
        assert_eq!(points.last().unwrap().0, world.width);

        for (col, &(x, y)) in points[1..points.len() - 1].iter().enumerate() {
            assert_eq!(x, col as f32 * 32.0 + 16.0);
            assert!(
                (y - heights.top_y(col)).abs() <= 2.0,
                "jitter exceeds 2px at column {col}"
            );
        }
    }

    #[test]
    fn overlay_is_deterministic() {
        let (a, heights, world) = built();
        let mut b = Graphics::new();
        draw_surface(&mut b, &heights, &world);
        assert_eq!(a.ops(), b.ops());
    }

    #[test]
    fn overlay_records_every_feature_class() {
        let (layer, _, _) = built();
        let ops = layer.ops();

        let fills = ops.iter().filter(|op| matches!(op, DrawOp::FillPath { .. })).count();
        let ellipses = ops.iter().filter(|op| matches!(op, DrawOp::FillEllipse { .. })).count();
        let arcs = ops.iter().filter(|op| matches!(op, DrawOp::StrokeArc { .. })).count();
        let rects = ops.iter().filter(|op| matches!(op, DrawOp::FillRect { .. })).count();
        let points = ops.iter().filter(|op| matches!(op, DrawOp::FillPoint { .. })).count();
        let strokes = ops.iter().filter(|op| matches!(op, DrawOp::StrokePath { .. })).count();

        assert_eq!(fills, 3, "three crust layers");
        assert_eq!(ellipses, CRATER_COUNT * 3);
        assert_eq!(arcs, CRATER_COUNT * 3);
        assert_eq!(rects, BOULDER_COUNT);
        assert_eq!(points, DUST_COUNT);
        assert_eq!(strokes, 2 + CRACK_COUNT, "ridge highlights plus cracks");
    }

    #[test]
    fn scatter_stays_near_the_surface() {
        let (layer, heights, world) = built();
        let lowest_top = (0..heights.cols())
            .map(|c| heights.top_y(c))
            .fold(f32::MIN, f32::max);

        for op in layer.ops() {
            if let DrawOp::FillPoint { y, .. } = op {
                // Dust sits at most ~34px under the (jittered) ridge.
                assert!(*y <= lowest_top + 36.0);
                assert!(*y >= 0.0);
            }
        }
    }
}
