use astral_engine::coords::{Vec2, Viewport};
use astral_engine::paint::Color;

use crate::config::{ParticleConfig, accent};
use crate::random::RandomSource;
use crate::schedule::FrameScheduler;
use crate::surface::Surface;
use crate::viewport::ViewportSignal;

/// Fixed color tag of a particle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Accent {
    /// Drawn with [`ParticleConfig::primary`].
    Cyan,
    /// Drawn with [`ParticleConfig::secondary`].
    Violet,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Units per frame.
    pub velocity: Vec2,
    /// Radius in logical pixels.
    pub size: f32,
    pub accent: Accent,
}

impl Particle {
    pub const fn new(position: Vec2, velocity: Vec2, size: f32, accent: Accent) -> Self {
        Self { position, velocity, size, accent }
    }

    /// Advances one frame and reflects velocity off the viewport edges.
    ///
    /// The position is not clamped: a particle may sit past an edge for a
    /// frame (or longer, after a shrink) until the flipped velocity brings it
    /// back.
    #[inline]
    fn advance(&mut self, vp: Viewport) {
        self.position += self.velocity;

        if !vp.contains_x(self.position.x) {
            self.velocity.x = -self.velocity.x;
        }
        if !vp.contains_y(self.position.y) {
            self.velocity.y = -self.velocity.y;
        }
    }
}

/// Drifting particles bouncing inside the shared viewport.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    config: ParticleConfig,
    viewport: ViewportSignal,
    colors: [Color; 2],
}

impl ParticleField {
    /// Spawns `config.count` particles over the current viewport.
    pub fn generate(
        config: ParticleConfig,
        viewport: ViewportSignal,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let Viewport { width, height } = viewport.get();
        let speed = config.max_speed;

        let particles = (0..config.count)
            .map(|_| {
                let x = width * rng.next_unit();
                let y = height * rng.next_unit();
                let vx = (rng.next_unit() - 0.5) * 2.0 * speed;
                let vy = (rng.next_unit() - 0.5) * 2.0 * speed;
                let size = config.size.sample(rng);
                let accent = if rng.next_unit() > 0.5 { Accent::Cyan } else { Accent::Violet };
                Particle::new(Vec2::new(x, y), Vec2::new(vx, vy), size, accent)
            })
            .collect();

        Self::from_particles(particles, config, viewport)
    }

    pub fn from_particles(
        particles: Vec<Particle>,
        config: ParticleConfig,
        viewport: ViewportSignal,
    ) -> Self {
        let vp = viewport.get();
        log::debug!("particle field: {} particles in {}x{}", particles.len(), vp.width, vp.height);

        let colors = [accent(config.primary, config.alpha), accent(config.secondary, config.alpha)];
        Self { particles, config, viewport, colors }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    pub fn color_of(&self, accent: Accent) -> Color {
        match accent {
            Accent::Cyan => self.colors[0],
            Accent::Violet => self.colors[1],
        }
    }

    /// Moves every particle by its velocity. Bounds come from the viewport as
    /// it is right now, so a resize takes effect on the next step.
    pub fn step(&mut self) {
        let vp = self.viewport.get();
        for p in &mut self.particles {
            p.advance(vp);
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for p in &self.particles {
            surface.fill_circle(p.position, p.size, self.color_of(p.accent));
        }
    }

    pub fn step_and_render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.render(surface);
    }

    /// One animation frame: step, render, then ask for the next one.
    pub fn frame<S, F>(&mut self, surface: &mut S, scheduler: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        self.step_and_render(surface);
        scheduler.request_frame();
    }
}
