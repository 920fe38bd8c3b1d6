use astral_engine::window::RuntimeCtx;

/// Host hook for "call me again before the next repaint".
///
/// Layers call [`request_frame`](Self::request_frame) once at the end of every
/// frame to keep animating. Hosts are expected to coalesce requests made
/// during the same frame into one redraw.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

impl FrameScheduler for RuntimeCtx {
    #[inline]
    fn request_frame(&mut self) {
        self.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_ctx_records_a_redraw_request() {
        let mut ctx = RuntimeCtx::default();
        assert!(!ctx.redraw_requested());
        ctx.request_frame();
        ctx.request_frame();
        assert!(ctx.redraw_requested());
    }
}
