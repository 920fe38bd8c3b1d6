//! Time subsystem.
//!
//! - one `FrameClock` per window
//! - `tick()` once per drawn frame yields a `FrameTime`
//!
//! Layers advance one fixed step per frame; the frame index is used for
//! diagnostics.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
