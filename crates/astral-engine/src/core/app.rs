use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::coords::Viewport;
use crate::window::RuntimeCtx;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Frames are demand-driven: the runtime draws a window only after
/// [`RuntimeCtx::request_redraw`] was called for it (or after a resize).
/// Apps that animate continuously request the next frame from every
/// `on_frame`.
pub trait App {
    /// Called once for the initial window, before its first frame.
    fn on_start(&mut self, window: &WindowCtx<'_>, runtime: &mut RuntimeCtx) -> AppControl {
        let _ = (window, runtime);
        AppControl::Continue
    }

    /// Called when a window's logical size changes (resize or DPI change).
    fn on_resize(&mut self, window_id: WindowId, viewport: Viewport) {
        let _ = (window_id, viewport);
    }

    /// Called for raw window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
