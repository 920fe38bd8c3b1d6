//! Animated backdrop layers.
//!
//! Two independent layers share a viewport signal and a frame scheduler:
//! - [`StarField`]: static stars joined by proximity edges
//! - [`ParticleField`]: drifting particles that bounce off the viewport edges
//!
//! [`Backdrop`] wires both to drawing surfaces and exposes the host-facing
//! `init` / `resize` entry points. Everything here is single-threaded and
//! frame-driven; the host decides when frames happen.

pub mod backdrop;
pub mod config;
pub mod error;
pub mod particles;
pub mod random;
pub mod schedule;
pub mod star_field;
pub mod surface;
pub mod viewport;

#[cfg(test)]
pub(crate) mod testing;

pub use backdrop::Backdrop;
pub use config::{ParticleConfig, SkyConfig, SpawnRange, StarFieldConfig};
pub use error::SkyError;
pub use particles::{Accent, Particle, ParticleField};
pub use random::{RandomSource, RngSource, SequenceSource};
pub use schedule::FrameScheduler;
pub use star_field::{Edge, Star, StarField};
pub use surface::{DrawLayer, Layer, Surface, SurfaceProvider};
pub use viewport::ViewportSignal;
