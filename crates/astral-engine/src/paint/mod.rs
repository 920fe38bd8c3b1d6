//! Paint model shared between backdrop layers and renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
