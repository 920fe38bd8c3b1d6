//! Test doubles shared by the layer tests.

use astral_engine::coords::Vec2;
use astral_engine::paint::Color;

use crate::schedule::FrameScheduler;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    Clear,
    Line { from: Vec2, to: Vec2, color: Color, width: f32 },
    Circle { center: Vec2, radius: f32, color: Color },
}

/// Surface that remembers every call in order.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }

    pub fn circles(&self) -> Vec<(Vec2, f32, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { center, radius, color } => Some((*center, *radius, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.ops.push(DrawOp::Line { from, to, color, width });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ops.push(DrawOp::Circle { center, radius, color });
    }
}

/// Scheduler that counts requests.
#[derive(Debug, Default)]
pub(crate) struct CountingScheduler {
    pub requests: usize,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}
