/// Viewport size in logical pixels.
///
/// Renderers treat this as the coordinate basis for converting logical px
/// positions to NDC in shaders. Backdrop layers use it as their bounce and
/// spawn area.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Returns `true` if `x` lies in the closed range `[0, width]`.
    #[inline]
    pub fn contains_x(self, x: f32) -> bool {
        (0.0..=self.width).contains(&x)
    }

    /// Returns `true` if `y` lies in the closed range `[0, height]`.
    #[inline]
    pub fn contains_y(self, y: f32) -> bool {
        (0.0..=self.height).contains(&y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_is_invalid() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(800.0, 0.0).is_valid());
        assert!(Viewport::new(800.0, 600.0).is_valid());
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let vp = Viewport::new(400.0, 300.0);
        assert!(vp.contains_x(0.0));
        assert!(vp.contains_x(400.0));
        assert!(!vp.contains_x(400.5));
        assert!(!vp.contains_y(-0.1));
        assert!(vp.contains_y(300.0));
    }
}
