use std::path::PathBuf;

use crate::display::Display;
use crate::input::InputEvent;
use crate::render::objects::GpuObjectFactory;
use crate::scene::{Scene, SceneState};
use crate::script::ScriptHost;

use super::app::{App, AppControl};
use super::ctx::FrameCtx;

/// Engine-level configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Scene name; resolves to `<resource_root>/<scene>/scene.json`.
    pub scene: String,

    /// Directory containing one subdirectory per scene.
    pub resource_root: PathBuf,

    pub clear_color: wgpu::Color,

    /// Upper bound on render chain slots; `None` grows on demand.
    pub chain_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scene: "main".to_owned(),
            resource_root: PathBuf::from("assets/scenes"),
            clear_color: wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.03,
                a: 1.0,
            },
            chain_limit: None,
        }
    }
}

/// The standard [`App`]: owns the display and one scene, loads the scene
/// once the GPU exists, and drives the tick order every frame: script hook,
/// chain render, key callbacks.
pub struct Engine {
    config: EngineConfig,
    display: Option<Display>,
    scene: Scene,
    factory: Option<GpuObjectFactory>,
}

impl Engine {
    pub fn new(config: EngineConfig, host: Box<dyn ScriptHost>) -> Self {
        let scene = match config.chain_limit {
            Some(limit) => Scene::bounded(&config.scene, &config.resource_root, host, limit),
            None => Scene::new(&config.scene, &config.resource_root, host),
        };

        Self {
            config,
            display: None,
            scene,
            factory: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl App for Engine {
    fn on_start(&mut self, width: u32, height: u32) {
        self.display = Some(Display::new(width, height));
    }

    fn on_input(&mut self, event: InputEvent) -> AppControl {
        if let Some(display) = self.display.as_mut() {
            display.apply_event(event);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let display = self.display.get_or_insert_with(|| {
            let (width, height) = ctx.window.size();
            Display::new(width, height)
        });

        // GPU-backed construction becomes possible on the first frame.
        let factory = self
            .factory
            .get_or_insert_with(|| GpuObjectFactory::new(ctx.gpu.render_device()));

        match self.scene.state() {
            SceneState::Uninitialized => {
                if let Err(err) = self.scene.load(factory) {
                    log::error!("scene {:?} failed to load: {err}", self.scene.name());
                    return AppControl::Exit;
                }
            }
            SceneState::Closed => return AppControl::Exit,
            _ => {}
        }
        if self.scene.state() == SceneState::Ready {
            if let Err(err) = self.scene.start(display) {
                log::error!("scene {:?} failed to start: {err}", self.scene.name());
                return AppControl::Exit;
            }
        }

        self.scene.begin_tick(display, ctx.time);

        let view_projection = display.view_projection();
        let frame_index = ctx.time.frame_index;
        let scene = &mut self.scene;
        let control = ctx.render(self.config.clear_color, view_projection, |draw| {
            let stats = scene.render(draw);
            if stats.failed > 0 || stats.expired > 0 {
                log::debug!(
                    "frame {frame_index}: {} rendered, {} failed, {} expired",
                    stats.rendered,
                    stats.failed,
                    stats.expired
                );
            }
        });

        self.scene.dispatch_input(display);
        display.end_tick();

        control
    }
}
