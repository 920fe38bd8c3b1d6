use std::fmt;

use astral_engine::coords::Vec2;
use astral_engine::paint::Color;
use astral_engine::scene::{DrawList, ZIndex};

/// Minimal 2D drawing surface a layer paints into.
///
/// Coordinates are logical pixels, origin top-left. Drawing outside the
/// viewport is allowed and simply not visible.
pub trait Surface {
    /// Erases everything drawn since the previous clear.
    fn clear(&mut self);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// The backdrop's drawing layers, back to front.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Layer {
    Constellation,
    Particles,
}

impl Layer {
    /// Stacking position when layers are composed into one draw list.
    pub fn z_index(self) -> ZIndex {
        match self {
            Layer::Constellation => ZIndex::new(0),
            Layer::Particles => ZIndex::new(1),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layer::Constellation => "constellation",
            Layer::Particles => "particles",
        })
    }
}

/// Hands out one surface per layer at construction time.
///
/// Returning `None` means the layer cannot be drawn at all; the backdrop then
/// refuses to start.
pub trait SurfaceProvider {
    type Surface: Surface;

    fn acquire(&mut self, layer: Layer) -> Option<Self::Surface>;
}

impl<F, S> SurfaceProvider for F
where
    F: FnMut(Layer) -> Option<S>,
    S: Surface,
{
    type Surface = S;

    fn acquire(&mut self, layer: Layer) -> Option<S> {
        self(layer)
    }
}

/// [`Surface`] recording into an engine [`DrawList`] at a fixed z-index.
///
/// One `DrawLayer` per backdrop layer; the host appends them into the frame
/// list handed to the renderers.
#[derive(Debug, Default)]
pub struct DrawLayer {
    list: DrawList,
    z: ZIndex,
}

impl DrawLayer {
    pub fn new(z: ZIndex) -> Self {
        Self { list: DrawList::new(), z }
    }

    pub fn for_layer(layer: Layer) -> Self {
        Self::new(layer.z_index())
    }

    #[inline]
    pub fn list(&self) -> &DrawList {
        &self.list
    }

    #[inline]
    pub fn z(&self) -> ZIndex {
        self.z
    }
}

impl Surface for DrawLayer {
    fn clear(&mut self) {
        self.list.clear();
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.list.push_line(self.z, from, to, width, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.list.push_solid_circle(self.z, center, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astral_engine::scene::DrawCmd;

    #[test]
    fn draw_layer_records_at_its_z() {
        let mut layer = DrawLayer::for_layer(Layer::Particles);
        layer.draw_line(Vec2::zero(), Vec2::new(4.0, 0.0), Color::transparent(), 1.0);
        layer.fill_circle(Vec2::new(1.0, 2.0), 3.0, Color::transparent());

        let items = layer.list().items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.key.z == ZIndex::new(1)));
        assert!(matches!(items[0].cmd, DrawCmd::Line(_)));
        assert!(matches!(items[1].cmd, DrawCmd::Circle(_)));
    }

    #[test]
    fn draw_layer_clear_drops_previous_frame() {
        let mut layer = DrawLayer::for_layer(Layer::Constellation);
        layer.fill_circle(Vec2::zero(), 1.0, Color::transparent());
        layer.clear();
        assert!(layer.list().is_empty());
    }

    #[test]
    fn constellation_sits_below_particles() {
        assert!(Layer::Constellation.z_index() < Layer::Particles.z_index());
    }

    #[test]
    fn closures_act_as_providers() {
        let mut provider = |layer: Layer| (layer == Layer::Constellation).then(DrawLayer::default);
        assert!(provider.acquire(Layer::Constellation).is_some());
        assert!(provider.acquire(Layer::Particles).is_none());
    }
}
