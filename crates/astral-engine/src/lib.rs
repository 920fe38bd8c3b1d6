//! Astral engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the backdrop layers.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
