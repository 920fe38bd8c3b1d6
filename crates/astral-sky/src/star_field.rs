use astral_engine::coords::{Vec2, Viewport};
use astral_engine::paint::Color;

use crate::config::StarFieldConfig;
use crate::random::RandomSource;
use crate::schedule::FrameScheduler;
use crate::surface::Surface;
use crate::viewport::ViewportSignal;

/// A fixed decorative point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Star {
    pub position: Vec2,
    /// Radius in logical pixels.
    pub size: f32,
    /// Fill alpha in `[0, 1]`.
    pub brightness: f32,
}

impl Star {
    pub const fn new(position: Vec2, size: f32, brightness: f32) -> Self {
        Self { position, size, brightness }
    }
}

/// Unordered pair of star indices, stored with `a < b`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Edge {
    a: usize,
    b: usize,
}

impl Edge {
    /// Returns `None` for a self-pair.
    pub fn new(i: usize, j: usize) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
            std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn a(self) -> usize {
        self.a
    }

    #[inline]
    pub fn b(self) -> usize {
        self.b
    }
}

/// Links every pair of stars strictly closer than `max_distance`.
///
/// Quadratic in the number of stars. The result is sorted by `(a, b)`.
pub fn link_stars(stars: &[Star], max_distance: f32) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (i, si) in stars.iter().enumerate() {
        for (j, sj) in stars.iter().enumerate().skip(i + 1) {
            if si.position.distance(sj.position) < max_distance {
                edges.push(Edge { a: i, b: j });
            }
        }
    }
    edges
}

/// Static star field with precomputed proximity edges.
///
/// Stars and edges are fixed at construction. A resize only changes the
/// shared viewport; stars keep their positions (possibly outside the new
/// bounds) and the edge set is never recomputed.
#[derive(Debug)]
pub struct StarField {
    stars: Vec<Star>,
    edges: Vec<Edge>,
    config: StarFieldConfig,
    viewport: ViewportSignal,
    line_color: Color,
}

impl StarField {
    /// Spawns `config.count` stars uniformly over the current viewport and links them.
    pub fn generate(
        config: StarFieldConfig,
        viewport: ViewportSignal,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let Viewport { width, height } = viewport.get();

        let stars = (0..config.count)
            .map(|_| {
                let x = width * rng.next_unit();
                let y = height * rng.next_unit();
                let size = config.size.sample(rng);
                let brightness = config.brightness.sample(rng);
                Star::new(Vec2::new(x, y), size, brightness)
            })
            .collect();

        Self::from_stars(stars, config, viewport)
    }

    /// Builds a field from explicit stars. Edges are computed here.
    pub fn from_stars(stars: Vec<Star>, config: StarFieldConfig, viewport: ViewportSignal) -> Self {
        let edges = link_stars(&stars, config.link_distance);
        let vp = viewport.get();
        log::debug!(
            "star field: {} stars, {} edges in {}x{}",
            stars.len(),
            edges.len(),
            vp.width,
            vp.height
        );

        let line_color = config.line_color();
        Self { stars, edges, config, viewport, line_color }
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Current viewport as seen by this layer.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Whether stars `i` and `j` are joined. Symmetric; `false` for `i == j`.
    pub fn is_linked(&self, i: usize, j: usize) -> bool {
        Edge::new(i, j).is_some_and(|e| self.edges.binary_search(&e).is_ok())
    }

    /// Clears `surface`, draws every edge, then every star on top.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        for edge in &self.edges {
            let from = self.stars[edge.a].position;
            let to = self.stars[edge.b].position;
            surface.draw_line(from, to, self.line_color, self.config.line_width);
        }

        for star in &self.stars {
            surface.fill_circle(star.position, star.size, self.config.star_color(star.brightness));
        }
    }

    /// One frame: render, then ask for the next one.
    pub fn frame<S, F>(&self, surface: &mut S, scheduler: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        self.render(surface);
        scheduler.request_frame();
    }
}
