//! Demo scene for the engine: a spinning cube over a floor plane with axis
//! lines, driven by a Rust script host. Arrow keys slide the cube, space
//! resets it, escape quits.

use anyhow::Result;
use glam::{Quat, Vec3};

use ember_engine::core::{App, AppControl, Engine, EngineConfig, FrameCtx};
use ember_engine::device::GpuInit;
use ember_engine::display::Display;
use ember_engine::input::{InputEvent, Key, KeyCallback, KeyState};
use ember_engine::logging::{init_logging, LoggingConfig};
use ember_engine::render::{RenderObject, SceneObject};
use ember_engine::scene::Scene;
use ember_engine::script::ScriptHost;
use ember_engine::time::FrameTime;
use ember_engine::window::{Runtime, RuntimeConfig};

const SLIDE_STEP: f32 = 0.05;
const SPIN_RATE: f32 = 0.8;

/// Moves `object` by `delta` each time the bound key fires.
fn slide(object: SceneObject, delta: Vec3) -> KeyCallback {
    Box::new(move || {
        if let Some(transform) = object.borrow_mut().transform_mut() {
            transform.translate(delta);
        }
        Ok(())
    })
}

struct SandboxHost;

impl ScriptHost for SandboxHost {
    fn on_start(&mut self, scene: &mut Scene, display: &mut Display) -> Result<()> {
        display.camera_mut().set_eye(Vec3::new(3.0, 2.5, 6.0));
        display.camera_mut().look_at(Vec3::new(0.0, 0.5, 0.0));

        scene.set_ambient_color(Vec3::new(1.0, 0.97, 0.9));
        scene.set_ambient_intensity(0.3);

        let Some(spinner) = scene.entity("spinner") else {
            anyhow::bail!("demo scene has no 'spinner' entity");
        };
        let object = spinner.object();

        scene.bind_key(Key::ArrowLeft, true, slide(object.clone(), Vec3::NEG_X * SLIDE_STEP));
        scene.bind_key(Key::ArrowRight, true, slide(object.clone(), Vec3::X * SLIDE_STEP));
        scene.bind_key(Key::ArrowUp, true, slide(object.clone(), Vec3::NEG_Z * SLIDE_STEP));
        scene.bind_key(Key::ArrowDown, true, slide(object.clone(), Vec3::Z * SLIDE_STEP));

        scene.bind_key(
            Key::Space,
            false,
            Box::new(move || {
                if let Some(transform) = object.borrow_mut().transform_mut() {
                    transform.position = Vec3::new(0.0, 1.0, 0.0);
                }
                log::info!("spinner reset");
                Ok(())
            }),
        );

        Ok(())
    }

    fn on_tick(&mut self, scene: &mut Scene, _display: &mut Display, time: FrameTime) -> Result<()> {
        if let Some(spinner) = scene.entity("spinner") {
            spinner.update_transform(|t| t.rotate(Quat::from_rotation_y(SPIN_RATE * time.dt)));
        }
        Ok(())
    }

    fn on_close(&mut self, _scene: &mut Scene) -> Result<()> {
        log::info!("sandbox scene closing");
        Ok(())
    }
}

/// Thin wrapper over [`Engine`] adding the escape-to-quit binding at the app
/// level, outside any scene.
struct Sandbox {
    engine: Engine,
}

impl App for Sandbox {
    fn on_start(&mut self, width: u32, height: u32) {
        self.engine.on_start(width, height);
    }

    fn on_input(&mut self, event: InputEvent) -> AppControl {
        if let InputEvent::Key {
            key: Key::Escape,
            state: KeyState::Pressed,
            ..
        } = event
        {
            return AppControl::Exit;
        }
        self.engine.on_input(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.engine.on_frame(ctx)
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let engine = Engine::new(
        EngineConfig {
            scene: "demo".to_owned(),
            resource_root: "assets/scenes".into(),
            ..Default::default()
        },
        Box::new(SandboxHost),
    );

    Runtime::run(
        RuntimeConfig {
            title: "ember sandbox".to_owned(),
            ..Default::default()
        },
        GpuInit::default(),
        Sandbox { engine },
    )
}
