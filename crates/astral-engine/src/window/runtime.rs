use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "astral".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Requests an app can make from inside a callback.
///
/// Applied after the callback returns. Any number of redraw requests during
/// one callback schedule a single redraw.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    redraw_requested: bool,
    exit_requested: bool,
}

impl RuntimeCtx {
    /// Asks for the window to be drawn again before the next repaint.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Runs one window driven by an [`App`](crate::core::App) until it closes.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: CoreApp + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut host = Host {
            config,
            gpu_init,
            app,
            window: None,
            redraw_pending: false,
        };

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }
}

struct Host<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    window: Option<WindowEntry>,
    /// Set by app requests and resizes; flushed in `about_to_wait`.
    redraw_pending: bool,
}

impl<A: CoreApp> Host<A> {
    /// Folds a callback's requests into the host state.
    fn apply(&mut self, event_loop: &ActiveEventLoop, control: AppControl, ctx: RuntimeCtx) {
        self.redraw_pending |= ctx.redraw_requested;
        if control == AppControl::Exit || ctx.exit_requested {
            self.shutdown(event_loop);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        log::debug!("shutting down");
        self.window = None;
        event_loop.exit();
    }

    fn notify_resize(&mut self) {
        let Some(entry) = self.window.as_mut() else { return };

        let new_size = entry.with_window(|w| w.inner_size());
        entry.with_mut(|fields| fields.gpu.resize(new_size));

        let (id, viewport) = entry.with_window(|w| (w.id(), crate::core::logical_viewport(w)));
        log::debug!("window resized to {}x{}", viewport.width, viewport.height);

        self.app.on_resize(id, viewport);
        self.redraw_pending = true;
    }

    fn draw_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.window.as_mut() else { return };

        let mut runtime = RuntimeCtx::default();
        let app = &mut self.app;
        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
                time: fields.clock.tick(),
                runtime: &mut runtime,
            };
            app.on_frame(&mut ctx)
        });

        self.apply(event_loop, control, runtime);
    }
}

impl<A: CoreApp> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let entry = match WindowEntry::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("failed to open window: {e:#}");
                event_loop.exit();
                return;
            }
        };
        log::debug!("window {:?} opened", entry.id());

        let mut runtime = RuntimeCtx::default();
        let control = entry.with_window(|w| {
            let window = WindowCtx { id: w.id(), window: w };
            self.app.on_start(&window, &mut runtime)
        });

        self.window = Some(entry);
        self.apply(event_loop, control, runtime);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !std::mem::take(&mut self.redraw_pending) {
            return;
        }
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(WindowEntry::id) != Some(window_id) {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.notify_resize(),
            WindowEvent::RedrawRequested => self.draw_frame(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redraw_requests_coalesce() {
        let mut ctx = RuntimeCtx::default();
        ctx.request_redraw();
        ctx.request_redraw();
        assert!(ctx.redraw_requested());
        assert!(!ctx.exit_requested());
    }

    #[test]
    fn exit_is_recorded() {
        let mut ctx = RuntimeCtx::default();
        ctx.exit();
        assert!(ctx.exit_requested());
        assert!(!ctx.redraw_requested());
    }

    #[test]
    fn default_config_opens_a_720p_window() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size, LogicalSize::new(1280.0, 720.0));
    }
}
