use std::path::PathBuf;

use anyhow::Result;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use astral_engine::coords::Viewport;
use astral_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use astral_engine::device::GpuInit;
use astral_engine::logging::{LoggingConfig, init_logging};
use astral_engine::paint::Color;
use astral_engine::render::shapes::circle::CircleRenderer;
use astral_engine::render::shapes::line::LineRenderer;
use astral_engine::scene::DrawList;
use astral_engine::window::{Runtime, RuntimeConfig, RuntimeCtx};
use astral_sky::{Backdrop, DrawLayer, Layer, RngSource, SkyConfig, SkyError};

/// Overrides the config file location.
const CONFIG_ENV: &str = "ASTRAL_CONFIG";
const DEFAULT_CONFIG: &str = "astral.ron";

/// Deep navy behind both layers.
const NIGHT: Color = Color::from_premul(0.016, 0.02, 0.063, 1.0);

struct Studio {
    config: SkyConfig,
    backdrop: Option<Backdrop<DrawLayer>>,
    /// Both layers composed back to front, rebuilt every frame.
    frame: DrawList,
    lines: LineRenderer,
    circles: CircleRenderer,
}

impl Studio {
    fn new(config: SkyConfig) -> Self {
        Self {
            config,
            backdrop: None,
            frame: DrawList::new(),
            lines: LineRenderer::new(),
            circles: CircleRenderer::new(),
        }
    }
}

impl App for Studio {
    fn on_start(&mut self, window: &WindowCtx<'_>, runtime: &mut RuntimeCtx) -> AppControl {
        let Viewport { width, height } = window.viewport();
        let mut rng = RngSource::from_entropy();

        match Backdrop::init_with(
            self.config.clone(),
            |layer: Layer| Some(DrawLayer::for_layer(layer)),
            width,
            height,
            &mut rng,
            runtime,
        ) {
            Ok(backdrop) => {
                log::info!(
                    "backdrop ready: {} stars, {} edges, {} particles",
                    backdrop.stars().stars().len(),
                    backdrop.stars().edges().len(),
                    backdrop.particles().particles().len()
                );
                self.backdrop = Some(backdrop);
                AppControl::Continue
            }
            Err(e) => {
                log::error!("backdrop failed to start: {e}");
                AppControl::Exit
            }
        }
    }

    fn on_resize(&mut self, _window_id: WindowId, viewport: Viewport) {
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.resize(viewport.width, viewport.height);
        }
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self { backdrop, frame, lines, circles, .. } = self;
        let Some(backdrop) = backdrop.as_mut() else {
            return AppControl::Continue;
        };

        backdrop.frame(ctx.runtime);

        frame.clear();
        for layer in backdrop.surfaces() {
            frame.append(layer.list());
        }

        // Lines first: within a layer, edges sit under stars.
        ctx.render(NIGHT, |rctx, target| {
            lines.render(rctx, target, frame);
            circles.render(rctx, target, frame);
        })
    }
}

fn load_config() -> SkyConfig {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let path = explicit.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    match SkyConfig::load_or_default(&path) {
        (config, None) => {
            log::info!("loaded {}", path.display());
            config
        }
        (config, Some(SkyError::ConfigRead { .. })) if explicit.is_none() => {
            log::debug!("no {DEFAULT_CONFIG}; using built-in defaults");
            config
        }
        (config, Some(e)) => {
            log::warn!("{e}; using built-in defaults");
            config
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = load_config();

    Runtime::run(
        RuntimeConfig {
            title: "Astral".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit {
            prefer_srgb: false,
            ..GpuInit::default()
        },
        Studio::new(config),
    )
}
