use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::QuadPipeline;

/// Renderer for `DrawCmd::Line`.
///
/// Each segment becomes one instanced quad oriented along the segment and padded
/// by one pixel for anti-aliasing. Degenerate (zero-length) segments and
/// non-positive widths are skipped.
pub struct LineRenderer {
    quads: QuadPipeline,
    instances: Vec<LineInstance>,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self {
            quads: QuadPipeline::new(
                "astral line",
                include_str!("shaders/line.wgsl"),
                LineInstance::layout(),
            ),
            instances: Vec::new(),
        }
    }
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        collect_instances(draw_list, &mut self.instances);
        self.quads.draw(ctx, target, &self.instances);
    }
}

fn collect_instances(draw_list: &mut DrawList, out: &mut Vec<LineInstance>) {
    out.clear();
    for item in draw_list.iter_in_paint_order() {
        let DrawCmd::Line(cmd) = &item.cmd else { continue };

        // NaN endpoints make the length NaN, which fails the comparison too.
        if cmd.width <= 0.0 || !(cmd.length() > f32::EPSILON) || !cmd.color.is_finite() {
            continue;
        }
        cmd.color.debug_assert_premul();

        out.push(LineInstance {
            from: [cmd.from.x, cmd.from.y],
            to: [cmd.to.x, cmd.to.y],
            half_width: cmd.width * 0.5,
            color: cmd.color.to_array(),
        });
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (36 bytes):
///
///  offset  0  from        [f32; 2]   loc 1
///  offset  8  to          [f32; 2]   loc 2
///  offset 16  half_width  f32        loc 3
///  offset 20  color       [f32; 4]   loc 4  (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable, PartialEq)]
struct LineInstance {
    from: [f32; 2],
    to: [f32; 2],
    half_width: f32,
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // from
        2 => Float32x2, // to
        3 => Float32,   // half_width
        4 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::ZIndex;

    #[test]
    fn skips_degenerate_segments() {
        let mut list = DrawList::new();
        let p = Vec2::new(10.0, 10.0);
        list.push_line(ZIndex(0), p, p, 1.0, Color::transparent());
        list.push_line(ZIndex(0), p, Vec2::new(20.0, 10.0), 0.0, Color::transparent());
        list.push_line(ZIndex(0), p, Vec2::new(20.0, 10.0), 2.0, Color::transparent());

        let mut out = Vec::new();
        collect_instances(&mut list, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].half_width, 1.0);
        assert_eq!(out[0].to, [20.0, 10.0]);
    }

    #[test]
    fn ignores_circles() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 3.0, Color::transparent());

        let mut out = Vec::new();
        collect_instances(&mut list, &mut out);
        assert!(out.is_empty());
    }
}
