use astral_engine::coords::Viewport;

use crate::config::SkyConfig;
use crate::error::SkyError;
use crate::particles::ParticleField;
use crate::random::RandomSource;
use crate::schedule::FrameScheduler;
use crate::star_field::StarField;
use crate::surface::{Layer, Surface, SurfaceProvider};
use crate::viewport::ViewportSignal;

/// Both backdrop layers wired to their surfaces and a shared viewport.
///
/// The host calls [`init`](Self::init) once, [`frame`](Self::frame) whenever
/// the scheduler fires, and [`resize`](Self::resize) on every window resize.
pub struct Backdrop<S: Surface> {
    config: SkyConfig,
    viewport: ViewportSignal,
    stars: StarField,
    particles: ParticleField,
    constellation_surface: S,
    particle_surface: S,
}

impl<S: Surface> Backdrop<S> {
    /// [`init_with`](Self::init_with) using the default configuration.
    pub fn init<P, F>(
        provider: P,
        width: f32,
        height: f32,
        rng: &mut dyn RandomSource,
        scheduler: &mut F,
    ) -> Result<Self, SkyError>
    where
        P: SurfaceProvider<Surface = S>,
        F: FrameScheduler + ?Sized,
    {
        Self::init_with(SkyConfig::default(), provider, width, height, rng, scheduler)
    }

    /// Acquires one surface per layer, spawns both layers over a
    /// `width`×`height` viewport and requests the first frame.
    ///
    /// If any surface is unavailable nothing is spawned and no frame is
    /// requested.
    pub fn init_with<P, F>(
        config: SkyConfig,
        mut provider: P,
        width: f32,
        height: f32,
        rng: &mut dyn RandomSource,
        scheduler: &mut F,
    ) -> Result<Self, SkyError>
    where
        P: SurfaceProvider<Surface = S>,
        F: FrameScheduler + ?Sized,
    {
        for warning in config.validate() {
            log::warn!("sky config: {warning}");
        }

        let constellation_surface = acquire(&mut provider, Layer::Constellation)?;
        let particle_surface = acquire(&mut provider, Layer::Particles)?;

        let viewport = ViewportSignal::new(Viewport::new(width, height));
        if !viewport.get().is_valid() {
            log::debug!("empty viewport {width}x{height}; layers spawn on its edge");
        }
        let stars = StarField::generate(config.stars.clone(), viewport.clone(), rng);
        let particles = ParticleField::generate(config.particles.clone(), viewport.clone(), rng);

        log::debug!("backdrop started at {width}x{height}");
        scheduler.request_frame();

        Ok(Self {
            config,
            viewport,
            stars,
            particles,
            constellation_surface,
            particle_surface,
        })
    }

    /// Redraws the constellation, then steps and redraws the particles.
    ///
    /// Each layer requests its own next frame; hosts coalesce them.
    pub fn frame<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        self.stars.frame(&mut self.constellation_surface, scheduler);
        self.particles.frame(&mut self.particle_surface, scheduler);
    }

    /// Publishes a new viewport size to both layers.
    ///
    /// Stars and edges stay where they are; particles bounce against the new
    /// bounds from their next step on.
    pub fn resize(&mut self, width: f32, height: f32) {
        log::debug!("backdrop resized to {width}x{height}");
        self.viewport.set(Viewport::new(width, height));
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    #[inline]
    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    #[inline]
    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    #[inline]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Layer surfaces, back to front.
    pub fn surfaces(&self) -> [&S; 2] {
        [&self.constellation_surface, &self.particle_surface]
    }
}

fn acquire<P: SurfaceProvider>(provider: &mut P, layer: Layer) -> Result<P::Surface, SkyError> {
    provider.acquire(layer).ok_or_else(|| {
        log::warn!("no surface for the {layer} layer; backdrop not started");
        SkyError::SurfaceUnavailable { layer }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParticleConfig, StarFieldConfig};
    use crate::random::RngSource;
    use crate::surface::DrawLayer;
    use crate::testing::{CountingScheduler, DrawOp, RecordingSurface};
    use astral_engine::scene::ZIndex;

    fn recording(_: Layer) -> Option<RecordingSurface> {
        Some(RecordingSurface::default())
    }

    fn started() -> (Backdrop<RecordingSurface>, CountingScheduler) {
        let mut rng = RngSource::seeded(99);
        let mut scheduler = CountingScheduler::default();
        let backdrop = Backdrop::init(recording, 800.0, 600.0, &mut rng, &mut scheduler).unwrap();
        (backdrop, scheduler)
    }

    // ── init ──────────────────────────────────────────────────────────────

    #[test]
    fn init_spawns_both_layers_and_requests_first_frame() {
        let (backdrop, scheduler) = started();

        assert_eq!(scheduler.requests, 1);
        assert_eq!(backdrop.stars().stars().len(), 100);
        assert_eq!(backdrop.particles().particles().len(), 50);
        assert_eq!(backdrop.viewport(), Viewport::new(800.0, 600.0));
        assert!(backdrop.surfaces().iter().all(|s| s.ops.is_empty()));
    }

    #[test]
    fn missing_constellation_surface_fails_fast() {
        let mut rng = RngSource::seeded(1);
        let mut scheduler = CountingScheduler::default();
        let mut asked = Vec::new();
        let provider = |layer: Layer| {
            asked.push(layer);
            None::<RecordingSurface>
        };

        let err = Backdrop::init(provider, 800.0, 600.0, &mut rng, &mut scheduler).err();

        assert!(matches!(err, Some(SkyError::SurfaceUnavailable { layer: Layer::Constellation })));
        assert_eq!(scheduler.requests, 0);
        assert_eq!(asked, vec![Layer::Constellation]);
    }

    #[test]
    fn missing_particle_surface_fails_fast() {
        let mut rng = RngSource::seeded(1);
        let mut scheduler = CountingScheduler::default();
        let provider = |layer: Layer| (layer == Layer::Constellation).then(RecordingSurface::default);

        let err = Backdrop::init(provider, 800.0, 600.0, &mut rng, &mut scheduler).err();

        assert!(matches!(err, Some(SkyError::SurfaceUnavailable { layer: Layer::Particles })));
        assert_eq!(scheduler.requests, 0);
    }

    #[test]
    fn init_with_honors_custom_counts() {
        let config = SkyConfig {
            stars: StarFieldConfig { count: 12, ..StarFieldConfig::default() },
            particles: ParticleConfig { count: 3, ..ParticleConfig::default() },
        };
        let mut rng = RngSource::seeded(4);
        let mut scheduler = CountingScheduler::default();
        let backdrop =
            Backdrop::init_with(config, recording, 320.0, 240.0, &mut rng, &mut scheduler).unwrap();

        assert_eq!(backdrop.stars().stars().len(), 12);
        assert_eq!(backdrop.particles().particles().len(), 3);
        assert_eq!(backdrop.config().stars.count, 12);
    }

    #[test]
    fn zero_sized_init_does_not_fault() {
        let mut rng = RngSource::seeded(8);
        let mut scheduler = CountingScheduler::default();
        let mut backdrop = Backdrop::init(recording, 0.0, 0.0, &mut rng, &mut scheduler).unwrap();
        backdrop.frame(&mut scheduler);
        assert_eq!(scheduler.requests, 3);
    }

    // ── frame loop ────────────────────────────────────────────────────────

    #[test]
    fn frame_draws_each_layer_into_its_own_surface() {
        let (mut backdrop, mut scheduler) = started();
        backdrop.frame(&mut scheduler);

        let [constellation, particles] = backdrop.surfaces();
        assert_eq!(constellation.ops[0], DrawOp::Clear);
        assert_eq!(constellation.lines(), backdrop.stars().edges().len());
        assert_eq!(constellation.circles().len(), 100);

        assert_eq!(particles.ops[0], DrawOp::Clear);
        assert_eq!(particles.lines(), 0);
        assert_eq!(particles.circles().len(), 50);

        // one from init, one per layer
        assert_eq!(scheduler.requests, 3);
    }

    #[test]
    fn repeated_frames_move_particles_but_not_stars() {
        let (mut backdrop, mut scheduler) = started();
        let stars = backdrop.stars().stars().to_vec();
        let before = backdrop.particles().particles().to_vec();

        backdrop.frame(&mut scheduler);
        backdrop.frame(&mut scheduler);

        assert_eq!(backdrop.stars().stars(), stars.as_slice());
        let after = backdrop.particles().particles();
        let mut moved = 0;
        for (a, b) in before.iter().zip(after) {
            // No bounce in between: two plain steps.
            if a.velocity == b.velocity {
                assert_eq!(b.position, a.position + a.velocity + a.velocity);
            }
            if a.position != b.position {
                moved += 1;
            }
        }
        assert!(moved > 0);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_is_seen_by_both_layers() {
        let (mut backdrop, _) = started();
        let edges = backdrop.stars().edges().to_vec();

        backdrop.resize(1024.0, 768.0);

        assert_eq!(backdrop.viewport(), Viewport::new(1024.0, 768.0));
        assert_eq!(backdrop.stars().viewport(), Viewport::new(1024.0, 768.0));
        assert_eq!(backdrop.particles().viewport(), Viewport::new(1024.0, 768.0));
        assert_eq!(backdrop.stars().edges(), edges.as_slice());
    }

    // ── draw layers ───────────────────────────────────────────────────────

    #[test]
    fn draw_layers_compose_back_to_front() {
        let mut rng = RngSource::seeded(5);
        let mut scheduler = CountingScheduler::default();
        let provider = |layer: Layer| Some(DrawLayer::for_layer(layer));
        let mut backdrop = Backdrop::init(provider, 800.0, 600.0, &mut rng, &mut scheduler).unwrap();

        backdrop.frame(&mut scheduler);

        let [back, front] = backdrop.surfaces();
        assert_eq!(back.z(), ZIndex::new(0));
        assert_eq!(front.z(), ZIndex::new(1));
        assert_eq!(front.list().len(), 50);
        assert_eq!(back.list().len(), 100 + backdrop.stars().edges().len());
    }
}
