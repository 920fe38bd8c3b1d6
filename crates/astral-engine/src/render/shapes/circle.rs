use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::QuadPipeline;

/// Renderer for `DrawCmd::Circle`.
///
/// Circles are drawn as instanced quads with an analytic one-pixel AA edge.
/// Zero or negative radii are skipped.
pub struct CircleRenderer {
    quads: QuadPipeline,
    instances: Vec<CircleInstance>,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            quads: QuadPipeline::new(
                "astral circle",
                include_str!("shaders/circle.wgsl"),
                CircleInstance::layout(),
            ),
            instances: Vec::new(),
        }
    }
}

impl CircleRenderer {
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

/// Refills `out` with one instance per drawable circle, in paint order.
fn collect_instances(draw_list: &mut DrawList, out: &mut Vec<CircleInstance>) {
    out.clear();
    for item in draw_list.iter_in_paint_order() {
        let DrawCmd::Circle(cmd) = &item.cmd else { continue };

        if cmd.radius <= 0.0 || !cmd.center.is_finite() || !cmd.color.is_finite() {
            continue;
        }
        cmd.color.debug_assert_premul();

        out.push(CircleInstance {
            center: [cmd.center.x, cmd.center.y],
            radius: cmd.radius,
            color: cmd.color.to_array(),
        });
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (28 bytes):
///
///  offset  0  center  [f32; 2]   loc 1
///  offset  8  radius  f32        loc 2
///  offset 12  color   [f32; 4]   loc 3  (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable, PartialEq)]
struct CircleInstance {
    center: [f32; 2],
    radius: f32,
    color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32,   // radius
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
