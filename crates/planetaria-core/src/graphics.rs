//! Recorded immediate-mode drawing.
//!
//! A `Graphics` layer is a display list of primitive operations with the
//! style baked into each op. The renderer adapter replays the list; tests
//! read it back to check what decorative code actually drew.

/// One recorded drawing primitive. Colors are `0xRRGGBB`, alpha `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokePath {
        points: Vec<(f32, f32)>,
        width: f32,
        color: u32,
        alpha: f32,
    },
    FillPath {
        points: Vec<(f32, f32)>,
        color: u32,
        alpha: f32,
    },
    FillEllipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        color: u32,
        alpha: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: u32,
        alpha: f32,
    },
    FillPoint {
        x: f32,
        y: f32,
        size: f32,
        color: u32,
        alpha: f32,
    },
    StrokeArc {
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        width: f32,
        color: u32,
        alpha: f32,
    },
}

/// A depth-sorted display list.
#[derive(Debug, Default)]
pub struct Graphics {
    pub depth: i32,
    ops: Vec<DrawOp>,
}

impl Graphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    pub fn stroke_path(&mut self, points: Vec<(f32, f32)>, width: f32, color: u32, alpha: f32) {
        self.ops.push(DrawOp::StrokePath {
            points,
            width,
            color,
            alpha,
        });
    }

    pub fn fill_path(&mut self, points: Vec<(f32, f32)>, color: u32, alpha: f32) {
        self.ops.push(DrawOp::FillPath {
            points,
            color,
            alpha,
        });
    }

    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: u32, alpha: f32) {
        self.ops.push(DrawOp::FillEllipse {
            cx,
            cy,
            rx,
            ry,
            color,
            alpha,
        });
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32, alpha: f32) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            w,
            h,
            color,
            alpha,
        });
    }

    pub fn fill_point(&mut self, x: f32, y: f32, size: f32, color: u32, alpha: f32) {
        self.ops.push(DrawOp::FillPoint {
            x,
            y,
            size,
            color,
            alpha,
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroke_arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        width: f32,
        color: u32,
        alpha: f32,
    ) {
        self.ops.push(DrawOp::StrokeArc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
            width,
            color,
            alpha,
        });
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Handle to a graphics layer owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

#[derive(Debug, Default)]
pub struct GraphicsStore {
    layers: Vec<Graphics>,
}

impl GraphicsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_layer(&mut self) -> LayerId {
        self.layers.push(Graphics::new());
        LayerId(self.layers.len() as u32 - 1)
    }

    pub fn layer(&self, id: LayerId) -> &Graphics {
        &self.layers[id.0 as usize]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Graphics {
        &mut self.layers[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_are_recorded_in_order() {
        let mut gfx = Graphics::new();
        gfx.fill_rect(0.0, 0.0, 4.0, 4.0, 0x112233, 1.0);
        gfx.stroke_path(vec![(0.0, 0.0), (8.0, 8.0)], 2.0, 0x445566, 0.5);

        assert_eq!(gfx.ops().len(), 2);
        assert!(matches!(gfx.ops()[0], DrawOp::FillRect { .. }));
        assert!(matches!(gfx.ops()[1], DrawOp::StrokePath { .. }));
    }

    #[test]
    fn store_hands_out_independent_layers() {
        let mut store = GraphicsStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        store.layer_mut(a).fill_point(1.0, 1.0, 1.0, 0xffffff, 1.0);

        assert_eq!(store.layer(a).ops().len(), 1);
        assert!(store.layer(b).is_empty());
    }
}
