//! Arcade-style physics: dynamic AABB bodies against static tile groups.
//!
//! Coordinates are y-down (screen space): gravity is a positive `gravity_y`,
//! an upward jump impulse is a negative velocity. Bodies are positioned by
//! their sprite center; the collision box may be smaller than the sprite and
//! offset from its center (e.g. a feet-only hitbox).

/// Handle to a dynamic body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(u32);

/// Handle to a group of static, immovable collision rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaticGroupId(u32);

/// Per-direction contact flags, recomputed every step.
///
/// `down` set means the body pressed against something below it this step —
/// the "grounded" signal for platforming code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// A dynamic physics body attached to a sprite.
#[derive(Debug, Clone)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub box_w: f32,
    pub box_h: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub allow_gravity: bool,
    pub collide_world_bounds: bool,
    pub blocked: Blocked,
}

impl Body {
    fn box_center(&self) -> (f32, f32) {
        (self.x + self.offset_x, self.y + self.offset_y)
    }
}

/// A single static collision rectangle (center position + size).
#[derive(Debug, Clone, Copy)]
pub struct StaticRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// The physics world: fixed rectangular bounds, gravity, dynamic bodies,
/// static groups, and registered collider pairs.
#[derive(Debug)]
pub struct PhysicsWorld {
    width: f32,
    height: f32,
    pub gravity_y: f32,
    bodies: Vec<Body>,
    groups: Vec<Vec<StaticRect>>,
    colliders: Vec<(BodyId, StaticGroupId)>,
}

impl PhysicsWorld {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            gravity_y: 0.0,
            bodies: Vec::new(),
            groups: Vec::new(),
            colliders: Vec::new(),
        }
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Attach a new dynamic body at `(x, y)` with the given collision box.
    pub fn create_body(&mut self, x: f32, y: f32, box_w: f32, box_h: f32) -> BodyId {
        self.bodies.push(Body {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            box_w,
            box_h,
            offset_x: 0.0,
            offset_y: 0.0,
            allow_gravity: true,
            collide_world_bounds: false,
            blocked: Blocked::default(),
        });
        BodyId(self.bodies.len() as u32 - 1)
    }

    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.0 as usize]
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0 as usize]
    }

    pub fn set_velocity(&mut self, id: BodyId, vx: f32, vy: f32) {
        let body = self.body_mut(id);
        body.vx = vx;
        body.vy = vy;
    }

    pub fn set_velocity_x(&mut self, id: BodyId, vx: f32) {
        self.body_mut(id).vx = vx;
    }

    pub fn set_velocity_y(&mut self, id: BodyId, vy: f32) {
        self.body_mut(id).vy = vy;
    }

    pub fn blocked(&self, id: BodyId) -> Blocked {
        self.body(id).blocked
    }

    pub fn create_static_group(&mut self) -> StaticGroupId {
        self.groups.push(Vec::new());
        StaticGroupId(self.groups.len() as u32 - 1)
    }

    /// Add an immovable rectangle (center position + size) to a group.
    pub fn add_static_rect(&mut self, group: StaticGroupId, x: f32, y: f32, w: f32, h: f32) {
        self.groups[group.0 as usize].push(StaticRect { x, y, w, h });
    }

    pub fn group_len(&self, group: StaticGroupId) -> usize {
        self.groups[group.0 as usize].len()
    }

    /// Register a collider relationship: `body` is resolved against every
    /// rectangle in `group` each step.
    pub fn add_collider(&mut self, body: BodyId, group: StaticGroupId) {
        self.colliders.push((body, group));
    }

    /// Advance the simulation one frame: integrate, then resolve contacts.
    pub fn step(&mut self, dt: f32) {
        for body in &mut self.bodies {
            if body.allow_gravity {
                body.vy += self.gravity_y * dt;
            }
            body.x += body.vx * dt;
            body.y += body.vy * dt;
            body.blocked = Blocked::default();
        }

        for &(body_id, group_id) in &self.colliders {
            let body = &mut self.bodies[body_id.0 as usize];
            for rect in &self.groups[group_id.0 as usize] {
                resolve_static(body, rect);
            }
        }

        for body in &mut self.bodies {
            if body.collide_world_bounds {
                clamp_to_bounds(body, self.width, self.height);
            }
        }
    }
}

/// Separate a body from one static rectangle along the axis of minimum
/// penetration, zeroing the velocity component that drove the contact.
fn resolve_static(body: &mut Body, rect: &StaticRect) {
    let (bx, by) = body.box_center();
    let half_w = body.box_w / 2.0;
    let half_h = body.box_h / 2.0;

    let p_left = bx - half_w;
    let p_right = bx + half_w;
    let p_top = by - half_h;
    let p_bottom = by + half_h;

    let t_left = rect.x - rect.w / 2.0;
    let t_right = rect.x + rect.w / 2.0;
    let t_top = rect.y - rect.h / 2.0;
    let t_bottom = rect.y + rect.h / 2.0;

    if p_right <= t_left || p_left >= t_right || p_bottom <= t_top || p_top >= t_bottom {
        return;
    }

    let overlap_left = p_right - t_left;
    let overlap_right = t_right - p_left;
    let overlap_top = p_bottom - t_top;
    let overlap_bottom = t_bottom - p_top;

    let min_overlap = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    if min_overlap == overlap_top {
        // Body above the tile: push up, this is a landing.
        body.y = t_top - half_h - body.offset_y;
        if body.vy > 0.0 {
            body.vy = 0.0;
        }
        body.blocked.down = true;
    } else if min_overlap == overlap_bottom {
        // Body below the tile: push down, head bump.
        body.y = t_bottom + half_h - body.offset_y;
        if body.vy < 0.0 {
            body.vy = 0.0;
        }
        body.blocked.up = true;
    } else if min_overlap == overlap_left {
        body.x = t_left - half_w - body.offset_x;
        if body.vx > 0.0 {
            body.vx = 0.0;
        }
        body.blocked.right = true;
    } else {
        body.x = t_right + half_w - body.offset_x;
        if body.vx < 0.0 {
            body.vx = 0.0;
        }
        body.blocked.left = true;
    }
}

fn clamp_to_bounds(body: &mut Body, width: f32, height: f32) {
    let (bx, by) = body.box_center();
    let half_w = body.box_w / 2.0;
    let half_h = body.box_h / 2.0;

    if bx - half_w < 0.0 {
        body.x = half_w - body.offset_x;
        if body.vx < 0.0 {
            body.vx = 0.0;
        }
        body.blocked.left = true;
    } else if bx + half_w > width {
        body.x = width - half_w - body.offset_x;
        if body.vx > 0.0 {
            body.vx = 0.0;
        }
        body.blocked.right = true;
    }

    if by - half_h < 0.0 {
        body.y = half_h - body.offset_y;
        if body.vy < 0.0 {
            body.vy = 0.0;
        }
        body.blocked.up = true;
    } else if by + half_h > height {
        body.y = height - half_h - body.offset_y;
        if body.vy > 0.0 {
            body.vy = 0.0;
        }
        body.blocked.down = true;
    }
}
