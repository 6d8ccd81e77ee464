//! World-bounded follow camera with smoothing and a dead-zone.

use crate::sprite::{SpriteId, SpriteStore};

/// A camera centered at `(x, y)` in world coordinates, optionally tracking
/// a sprite. The dead-zone is a centered box the target may move inside
/// without the camera reacting; outside it, the camera closes the gap by
/// `lerp` per update.
#[derive(Debug)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    view_w: f32,
    view_h: f32,
    bounds: Option<(f32, f32)>,
    follow: Option<SpriteId>,
    lerp: f32,
    deadzone_w: f32,
    deadzone_h: f32,
}

impl Camera {
    pub fn new(view_w: f32, view_h: f32) -> Self {
        Self {
            x: view_w / 2.0,
            y: view_h / 2.0,
            view_w,
            view_h,
            bounds: None,
            follow: None,
            lerp: 1.0,
            deadzone_w: 0.0,
            deadzone_h: 0.0,
        }
    }

    /// Constrain the camera so the viewport never leaves the world rect.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Some((width, height));
    }

    /// Start tracking a sprite, snapping onto it immediately.
    pub fn start_follow(&mut self, target: SpriteId, sprites: &SpriteStore) {
        let s = sprites.get(target);
        self.x = s.x;
        self.y = s.y;
        self.follow = Some(target);
        self.clamp_to_bounds();
    }

    pub fn set_lerp(&mut self, lerp: f32) {
        self.lerp = lerp.clamp(0.0, 1.0);
    }

    pub fn set_deadzone(&mut self, width: f32, height: f32) {
        self.deadzone_w = width;
        self.deadzone_h = height;
    }

    /// Move toward the follow target, honoring dead-zone, lerp, and bounds.
    pub fn update(&mut self, sprites: &SpriteStore) {
        let Some(target) = self.follow else {
            return;
        };
        let s = sprites.get(target);

        self.x += axis_step(s.x - self.x, self.deadzone_w / 2.0, self.lerp);
        self.y += axis_step(s.y - self.y, self.deadzone_h / 2.0, self.lerp);
        self.clamp_to_bounds();
    }

    fn clamp_to_bounds(&mut self) {
        let Some((w, h)) = self.bounds else {
            return;
        };
        let half_w = self.view_w / 2.0;
        let half_h = self.view_h / 2.0;
        if w > self.view_w {
            self.x = self.x.clamp(half_w, w - half_w);
        }
        if h > self.view_h {
            self.y = self.y.clamp(half_h, h - half_h);
        }
    }
}

/// Distance the camera moves along one axis this update.
fn axis_step(delta: f32, deadzone_half: f32, lerp: f32) -> f32 {
    if delta.abs() <= deadzone_half {
        return 0.0;
    }
    let excess = delta - deadzone_half.copysign(delta);
    excess * lerp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_inside_deadzone_does_not_move_camera() {
        let mut sprites = SpriteStore::new();
        let target = sprites.create(100.0, 100.0, "astronaut");
        let mut cam = Camera::new(640.0, 360.0);
        cam.set_deadzone(8.0, 8.0);
        cam.set_lerp(0.09);
        cam.start_follow(target, &sprites);

        sprites.set_position(target, 103.0, 98.0);
        cam.update(&sprites);
        assert_eq!((cam.x, cam.y), (100.0, 100.0));
    }

    #[test]
    fn camera_lerps_toward_distant_target() {
        let mut sprites = SpriteStore::new();
        let target = sprites.create(0.0, 0.0, "astronaut");
        let mut cam = Camera::new(640.0, 360.0);
        cam.set_lerp(0.5);
        cam.start_follow(target, &sprites);

        sprites.set_position(target, 100.0, 0.0);
        cam.update(&sprites);
        assert!(cam.x > 0.0 && cam.x < 100.0);

        let first = cam.x;
        cam.update(&sprites);
        assert!(cam.x > first, "camera keeps closing the gap");
    }

    #[test]
    fn bounds_stop_viewport_at_world_edge() {
        let mut sprites = SpriteStore::new();
        let target = sprites.create(10.0, 10.0, "astronaut");
        let mut cam = Camera::new(640.0, 360.0);
        cam.set_bounds(2048.0, 2048.0);
        cam.start_follow(target, &sprites);

        // Viewport half-extents are 320x180; camera can't center on (10,10).
        assert_eq!((cam.x, cam.y), (320.0, 180.0));
    }
}
