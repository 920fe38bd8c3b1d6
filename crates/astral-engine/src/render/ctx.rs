use crate::coords::Viewport;

/// What a renderer needs to upload and draw one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Logical pixels; the coordinate space of every draw command.
    pub viewport: Viewport,
    /// Physical pixels per logical pixel.
    pub scale_factor: f32,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
    ) -> Self {
        Self { device, queue, surface_format, viewport, scale_factor }
    }

    /// Size of one physical pixel in logical pixels.
    ///
    /// Shaders fade edges over this width so anti-aliasing stays one device
    /// pixel wide on HiDPI displays.
    #[inline]
    pub fn pixel(&self) -> f32 {
        pixel_size(self.scale_factor)
    }
}

fn pixel_size(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 { 1.0 / scale_factor } else { 1.0 }
}

/// Encoder and color attachment of the frame being recorded.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_shrinks_with_scale() {
        assert_eq!(pixel_size(1.0), 1.0);
        assert_eq!(pixel_size(2.0), 0.5);
    }

    #[test]
    fn bogus_scale_falls_back_to_one() {
        assert_eq!(pixel_size(0.0), 1.0);
        assert_eq!(pixel_size(f32::NAN), 1.0);
        assert_eq!(pixel_size(-1.5), 1.0);
    }
}
