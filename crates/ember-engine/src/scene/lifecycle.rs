use std::path::PathBuf;
use std::rc::Rc;

use glam::{Quat, Vec3};

use crate::display::Display;
use crate::input::{Key, KeyBindings, KeyCallback};
use crate::render::objects::RenderObjectFactory;
use crate::render::{DrawCtx, PassStats, RenderChain, RenderObject, SceneObject, DEFAULT_AMBIENT};
use crate::resources::{ModelData, ResourceHandler};
use crate::script::ScriptHost;
use crate::space::Transform;
use crate::time::FrameTime;

use super::description::{DynamicObjectDecl, ResourceDecl, SceneDescription, StaticObjectDecl};
use super::entity::Entity;
use super::SceneError;

/// Lifecycle states of a scene. Transitions are one-way; a closed scene is
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Uninitialized,
    Loading,
    Ready,
    Running,
    Closing,
    Closed,
}

/// One loaded scene: its resources, render objects, entities, key bindings,
/// and script host.
///
/// Ownership layering: the scene holds the strong references to render
/// objects (directly or through entities); the render chain observes them
/// weakly. Field order matters for drop: the chain's references go away
/// before the objects they point at.
pub struct Scene {
    name: String,
    state: SceneState,
    chain: RenderChain<dyn RenderObject>,
    resources: ResourceHandler,
    objects: Vec<SceneObject>,
    entities: Vec<Entity>,
    bindings: KeyBindings,
    ambient: [f32; 4],
    host: Option<Box<dyn ScriptHost>>,
}

impl Scene {
    /// A scene with an unbounded render chain.
    pub fn new(
        name: impl Into<String>,
        resource_root: impl Into<PathBuf>,
        host: Box<dyn ScriptHost>,
    ) -> Self {
        Self::with_chain(name, resource_root, host, RenderChain::new())
    }

    /// A scene whose chain holds at most `limit` objects; attaches past the
    /// limit fail instead of growing the slot store.
    pub fn bounded(
        name: impl Into<String>,
        resource_root: impl Into<PathBuf>,
        host: Box<dyn ScriptHost>,
        limit: usize,
    ) -> Self {
        Self::with_chain(name, resource_root, host, RenderChain::bounded(limit))
    }

    fn with_chain(
        name: impl Into<String>,
        resource_root: impl Into<PathBuf>,
        host: Box<dyn ScriptHost>,
        chain: RenderChain<dyn RenderObject>,
    ) -> Self {
        Self {
            name: name.into(),
            state: SceneState::Uninitialized,
            chain,
            resources: ResourceHandler::new(resource_root),
            objects: Vec::new(),
            entities: Vec::new(),
            bindings: KeyBindings::default(),
            ambient: DEFAULT_AMBIENT,
            host: Some(host),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn resources(&self) -> &ResourceHandler {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceHandler {
        &mut self.resources
    }

    pub fn chain(&self) -> &RenderChain<dyn RenderObject> {
        &self.chain
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // ── loading ────────────────────────────────────────────────────────────

    /// Reads and instantiates the scene's description document.
    ///
    /// A missing or unparseable document aborts the load and leaves the scene
    /// uninitialized. Individual malformed or unresolvable items are logged
    /// and skipped; the rest of their section still loads.
    pub fn load(&mut self, factory: &dyn RenderObjectFactory) -> Result<(), SceneError> {
        if self.state != SceneState::Uninitialized {
            return Err(SceneError::InvalidState(self.state));
        }
        self.state = SceneState::Loading;

        match self.load_inner(factory) {
            Ok(()) => {
                self.state = SceneState::Ready;
                log::info!(
                    "scene {:?} loaded: {} objects, {} entities, {} resources",
                    self.name,
                    self.objects.len(),
                    self.entities.len(),
                    self.resources.model_count()
                );
                Ok(())
            }
            Err(err) => {
                self.state = SceneState::Uninitialized;
                Err(err)
            }
        }
    }

    fn load_inner(&mut self, factory: &dyn RenderObjectFactory) -> Result<(), SceneError> {
        let document = self.resources.read_description(&self.name)?;
        let description = SceneDescription::parse(&document)?;

        for value in description.resources {
            let ResourceDecl::Model3d { name, file } = match serde_json::from_value(value) {
                Ok(decl) => decl,
                Err(err) => {
                    log::warn!("scene {:?}: skipping malformed resource: {err}", self.name);
                    continue;
                }
            };
            match self.resources.load_model(&file) {
                Ok(model) => self.resources.add_model(&name, model),
                Err(err) => {
                    log::warn!("scene {:?}: resource {name:?} failed: {err}", self.name);
                }
            }
        }

        for value in description.static_objects {
            match serde_json::from_value::<StaticObjectDecl>(value) {
                Ok(decl) => self.instantiate_static(factory, decl),
                Err(err) => {
                    log::warn!("scene {:?}: skipping malformed object: {err}", self.name);
                }
            }
        }

        for value in description.dynamic_objects {
            match serde_json::from_value::<DynamicObjectDecl>(value) {
                Ok(decl) => self.instantiate_dynamic(factory, decl),
                Err(err) => {
                    log::warn!("scene {:?}: skipping malformed object: {err}", self.name);
                }
            }
        }

        Ok(())
    }

    fn instantiate_static(&mut self, factory: &dyn RenderObjectFactory, decl: StaticObjectDecl) {
        let built = match decl {
            StaticObjectDecl::Line {
                name,
                tail,
                head,
                color,
            } => {
                let name = label_or(name, "line");
                factory
                    .line(&name, Vec3::from(tail), Vec3::from(head), color)
                    .map(|object| (name, object))
            }

            StaticObjectDecl::StaticModel {
                name,
                resource,
                position,
                scale,
                color,
            } => {
                let name = label_or(name, &resource);
                let Some(model) = self.resources.model(&resource) else {
                    log::warn!(
                        "scene {:?}: object {name:?} references unknown resource {resource:?}",
                        self.name
                    );
                    return;
                };
                let transform = Transform::new(
                    Vec3::from(position),
                    Quat::IDENTITY,
                    Vec3::from(scale),
                );
                factory
                    .static_model(&name, &model, transform, color)
                    .map(|object| (name, object))
            }

            StaticObjectDecl::RawStaticModel {
                name,
                vertices,
                indices,
                position,
                color,
            } => {
                let name = label_or(name, "rawstaticmodel");
                let model = ModelData::from_raw(&name, vertices, indices);
                let transform = Transform::from_position(Vec3::from(position));
                factory
                    .static_model(&name, &model, transform, color)
                    .map(|object| (name, object))
            }
        };

        match built {
            Ok((name, object)) => self.keep_object(&name, object),
            Err(err) => log::warn!("scene {:?}: object skipped: {err}", self.name),
        }
    }

    fn instantiate_dynamic(&mut self, factory: &dyn RenderObjectFactory, decl: DynamicObjectDecl) {
        let DynamicObjectDecl {
            name,
            resource,
            position,
            scale,
            color,
        } = decl;

        let Some(model) = self.resources.model(&resource) else {
            log::warn!(
                "scene {:?}: object {name:?} references unknown resource {resource:?}",
                self.name
            );
            return;
        };
        let transform = Transform::new(Vec3::from(position), Quat::IDENTITY, Vec3::from(scale));

        match factory.dynamic_model(&name, &model, transform, color) {
            Ok(object) => {
                if let Err(err) = self.add_entity(Entity::new(name.clone(), object)) {
                    log::warn!("scene {:?}: object {name:?} skipped: {err}", self.name);
                }
            }
            Err(err) => log::warn!("scene {:?}: object {name:?} skipped: {err}", self.name),
        }
    }

    /// Keeps the strong reference alive in the scene and attaches it to the
    /// chain. An attach failure (bounded chain at capacity) leaves the object
    /// owned but undrawn rather than destroying it.
    fn keep_object(&mut self, name: &str, object: SceneObject) {
        if let Err(err) = self.chain.attach(Rc::downgrade(&object)) {
            log::warn!("scene {:?}: object {name:?} not attached: {err}", self.name);
        }
        self.objects.push(object);
    }

    // ── entities ───────────────────────────────────────────────────────────

    /// Registers an entity and attaches its object to the render chain.
    ///
    /// A duplicate name is an error and the original entity is preserved.
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), SceneError> {
        if self.entity(entity.name()).is_some() {
            return Err(SceneError::DuplicateEntity(entity.name().to_owned()));
        }
        self.chain.attach(Rc::downgrade(&entity.object()))?;
        self.entities.push(entity);
        Ok(())
    }

    /// Builds a dynamic model from a cached resource and registers it as a
    /// named entity.
    pub fn spawn(
        &mut self,
        name: &str,
        resource: &str,
        position: Vec3,
        factory: &dyn RenderObjectFactory,
    ) -> Result<SceneObject, SceneError> {
        if self.entity(name).is_some() {
            return Err(SceneError::DuplicateEntity(name.to_owned()));
        }
        let model = self
            .resources
            .model(resource)
            .ok_or_else(|| SceneError::UnknownResource(resource.to_owned()))?;

        let object = factory.dynamic_model(
            name,
            &model,
            Transform::from_position(position),
            [1.0, 1.0, 1.0, 1.0],
        )?;
        self.add_entity(Entity::new(name, Rc::clone(&object)))?;
        Ok(object)
    }

    /// Absence is an expected condition; scripts probe freely.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name() == name)
    }

    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name() == name)
    }

    // ── input ──────────────────────────────────────────────────────────────

    /// Binds `callback` to `key`. With `repeat` the callback fires every tick
    /// the key is held, otherwise once per press.
    pub fn bind_key(&mut self, key: Key, repeat: bool, callback: KeyCallback) {
        self.bindings.bind(key, repeat, callback);
    }

    // ── lighting ───────────────────────────────────────────────────────────

    /// Scene-wide ambient term fed to every model draw: rgb color, alpha
    /// intensity.
    pub fn ambient(&self) -> [f32; 4] {
        self.ambient
    }

    pub fn set_ambient_color(&mut self, color: Vec3) {
        self.ambient[0] = color.x;
        self.ambient[1] = color.y;
        self.ambient[2] = color.z;
    }

    pub fn set_ambient_intensity(&mut self, intensity: f32) {
        self.ambient[3] = intensity.clamp(0.0, 1.0);
    }

    // ── running ────────────────────────────────────────────────────────────

    /// Transitions a ready scene to running and gives the host its start
    /// hook. Host failures are logged, not propagated; a scene runs with or
    /// without a cooperative script.
    pub fn start(&mut self, display: &mut Display) -> Result<(), SceneError> {
        if self.state != SceneState::Ready {
            return Err(SceneError::InvalidState(self.state));
        }
        self.state = SceneState::Running;
        self.with_host("on_start", |host, scene| host.on_start(scene, display));
        Ok(())
    }

    /// Runs the host's per-frame hook. No-op unless running.
    pub fn begin_tick(&mut self, display: &mut Display, time: FrameTime) {
        if self.state != SceneState::Running {
            return;
        }
        self.with_host("on_tick", |host, scene| host.on_tick(scene, display, time));
    }

    /// Draws every live object into the pass. No-op unless running.
    pub fn render(&mut self, ctx: &mut DrawCtx<'_>) -> PassStats {
        if self.state != SceneState::Running {
            return PassStats::default();
        }
        ctx.ambient = self.ambient;
        self.chain.render(ctx)
    }

    /// Delivers queued key callbacks for this tick. No-op unless running.
    pub fn dispatch_input(&mut self, display: &Display) {
        if self.state != SceneState::Running {
            return;
        }
        self.bindings.dispatch(display.input_frame(), display.input());
    }

    // ── closing ────────────────────────────────────────────────────────────

    /// Tears the scene down: the chain releases its references first, then
    /// the host gets its close hook (objects still alive at that point), then
    /// objects, entities, and bindings go away. Idempotent.
    pub fn close(&mut self) {
        if matches!(self.state, SceneState::Closing | SceneState::Closed) {
            return;
        }
        self.state = SceneState::Closing;

        self.chain.clear();
        if let Some(mut host) = self.host.take() {
            if let Err(err) = host.on_close(self) {
                log::error!("script host on_close failed: {err:#}");
            }
        }
        self.objects.clear();
        self.entities.clear();
        self.bindings = KeyBindings::default();

        self.state = SceneState::Closed;
        log::info!("scene {:?} closed", self.name);
    }

    fn with_host(
        &mut self,
        hook: &str,
        f: impl FnOnce(&mut dyn ScriptHost, &mut Scene) -> anyhow::Result<()>,
    ) {
        if let Some(mut host) = self.host.take() {
            if let Err(err) = f(host.as_mut(), self) {
                log::error!("script host {hook} failed: {err:#}");
            }
            self.host = Some(host);
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.close();
    }
}

/// Static declarations may omit `name`; labels fall back to something
/// recognizable in logs.
fn label_or(name: String, fallback: &str) -> String {
    if name.is_empty() {
        fallback.to_owned()
    } else {
        name
    }
}

// ── tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::path::PathBuf;

    use glam::Mat4;

    use super::*;
    use crate::render::RenderError;
    use crate::script::NullHost;

    struct StubObject {
        label: String,
        transform: Option<Transform>,
    }

    impl RenderObject for StubObject {
        fn label(&self) -> &str {
            &self.label
        }
        fn model_matrix(&self) -> Mat4 {
            Mat4::IDENTITY
        }
        fn draw(&self, _ctx: &mut DrawCtx<'_>) -> Result<(), RenderError> {
            Ok(())
        }
        fn transform_mut(&mut self) -> Option<&mut Transform> {
            self.transform.as_mut()
        }
    }

    struct StubFactory;

    impl StubFactory {
        fn object(label: &str, transform: Option<Transform>) -> SceneObject {
            Rc::new(RefCell::new(StubObject {
                label: label.to_owned(),
                transform,
            }))
        }
    }

    impl RenderObjectFactory for StubFactory {
        fn line(
            &self,
            label: &str,
            _from: Vec3,
            _to: Vec3,
            _color: [f32; 4],
        ) -> Result<SceneObject, RenderError> {
            Ok(Self::object(label, None))
        }

        fn static_model(
            &self,
            label: &str,
            model: &ModelData,
            _transform: Transform,
            _color: [f32; 4],
        ) -> Result<SceneObject, RenderError> {
            if model.segments.is_empty() {
                return Err(RenderError::EmptyModel(model.name.clone()));
            }
            Ok(Self::object(label, None))
        }

        fn dynamic_model(
            &self,
            label: &str,
            model: &ModelData,
            transform: Transform,
            _color: [f32; 4],
        ) -> Result<SceneObject, RenderError> {
            if model.segments.is_empty() {
                return Err(RenderError::EmptyModel(model.name.clone()));
            }
            Ok(Self::object(label, Some(transform)))
        }
    }

    fn scene_root(tag: &str, document: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("ember-scene-test-{tag}"));
        let dir = root.join("demo");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("scene.json"), document).unwrap();
        root
    }

    fn triangle() -> ModelData {
        ModelData::from_raw(
            "tri",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn missing_document_aborts_load() {
        let mut scene = Scene::new("demo", "/nonexistent-root", Box::new(NullHost));
        assert!(scene.load(&StubFactory).is_err());
        assert_eq!(scene.state(), SceneState::Uninitialized);
    }

    #[test]
    fn invalid_document_aborts_load() {
        let root = scene_root("bad-doc", "not json at all");
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        assert!(matches!(
            scene.load(&StubFactory),
            Err(SceneError::BadDescription(_))
        ));
        assert_eq!(scene.state(), SceneState::Uninitialized);
    }

    #[test]
    fn malformed_items_are_skipped_not_fatal() {
        let root = scene_root(
            "skip-items",
            r#"{
                "staticObjects": [
                    {"type": "line", "name": "axis", "tail": [0,0,0], "head": [1,0,0]},
                    {"type": "hologram", "name": "nope"},
                    {"type": "rawstaticmodel", "name": "tri",
                     "vertices": [[0,0,0],[1,0,0],[0,1,0]], "indices": [0,1,2]}
                ]
            }"#,
        );
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        scene.load(&StubFactory).unwrap();

        assert_eq!(scene.state(), SceneState::Ready);
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.chain().attached(), 2);
    }

    #[test]
    fn unknown_resource_reference_is_skipped() {
        let root = scene_root(
            "unknown-res",
            r#"{"staticObjects": [
                {"type": "staticmodel", "name": "ghost", "resource": "missing"}
            ]}"#,
        );
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        scene.load(&StubFactory).unwrap();
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn load_is_single_shot() {
        let root = scene_root("single-shot", "{}");
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        scene.load(&StubFactory).unwrap();
        assert!(matches!(
            scene.load(&StubFactory),
            Err(SceneError::InvalidState(SceneState::Ready))
        ));
    }

    #[test]
    fn spawn_creates_a_movable_entity() {
        let root = scene_root("spawn", "{}");
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        scene.load(&StubFactory).unwrap();
        scene.resources_mut().add_model("cube", triangle());

        scene
            .spawn("player", "cube", Vec3::new(0.0, 1.0, 0.0), &StubFactory)
            .unwrap();

        assert_eq!(scene.entity_count(), 1);
        assert_eq!(scene.chain().attached(), 1);
        let moved = scene
            .entity("player")
            .unwrap()
            .update_transform(|t| t.translate(Vec3::X));
        assert!(moved);
    }

    #[test]
    fn duplicate_entity_is_rejected_and_original_kept() {
        let root = scene_root("dup-entity", "{}");
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        scene.load(&StubFactory).unwrap();
        scene.resources_mut().add_model("cube", triangle());

        scene.spawn("player", "cube", Vec3::ZERO, &StubFactory).unwrap();
        assert!(matches!(
            scene.spawn("player", "cube", Vec3::X, &StubFactory),
            Err(SceneError::DuplicateEntity(_))
        ));
        assert_eq!(scene.entity_count(), 1);
        assert_eq!(scene.chain().attached(), 1);
    }

    #[test]
    fn spawn_with_unknown_resource_fails() {
        let root = scene_root("spawn-missing", "{}");
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        scene.load(&StubFactory).unwrap();

        assert!(matches!(
            scene.spawn("player", "missing", Vec3::ZERO, &StubFactory),
            Err(SceneError::UnknownResource(_))
        ));
    }

    #[test]
    fn bounded_scene_rejects_objects_past_limit() {
        let root = scene_root("bounded", "{}");
        let mut scene = Scene::bounded("demo", root, Box::new(NullHost), 1);
        scene.load(&StubFactory).unwrap();
        scene.resources_mut().add_model("cube", triangle());

        scene.spawn("a", "cube", Vec3::ZERO, &StubFactory).unwrap();
        assert!(matches!(
            scene.spawn("b", "cube", Vec3::ZERO, &StubFactory),
            Err(SceneError::Chain(_))
        ));
        assert_eq!(scene.entity_count(), 1);
    }

    struct CloseProbe {
        chain_len_at_close: Rc<Cell<usize>>,
        entities_at_close: Rc<Cell<usize>>,
    }

    impl ScriptHost for CloseProbe {
        fn on_close(&mut self, scene: &mut Scene) -> anyhow::Result<()> {
            self.chain_len_at_close.set(scene.chain().attached());
            self.entities_at_close.set(scene.entity_count());
            Ok(())
        }
    }

    #[test]
    fn close_clears_chain_before_destroying_objects() {
        let chain_len = Rc::new(Cell::new(usize::MAX));
        let entities = Rc::new(Cell::new(usize::MAX));
        let probe = CloseProbe {
            chain_len_at_close: Rc::clone(&chain_len),
            entities_at_close: Rc::clone(&entities),
        };

        let root = scene_root("close-order", "{}");
        let mut scene = Scene::new("demo", root, Box::new(probe));
        scene.load(&StubFactory).unwrap();
        scene.resources_mut().add_model("cube", triangle());
        scene.spawn("player", "cube", Vec3::ZERO, &StubFactory).unwrap();

        scene.close();

        assert_eq!(scene.state(), SceneState::Closed);
        assert_eq!(chain_len.get(), 0);
        assert_eq!(entities.get(), 1);
        assert_eq!(scene.entity_count(), 0);
    }

    struct FailingHost;

    impl ScriptHost for FailingHost {
        fn on_start(&mut self, _scene: &mut Scene, _display: &mut Display) -> anyhow::Result<()> {
            anyhow::bail!("script blew up")
        }
    }

    #[test]
    fn host_start_failure_does_not_stop_the_scene() {
        let root = scene_root("bad-host", "{}");
        let mut scene = Scene::new("demo", root, Box::new(FailingHost));
        scene.load(&StubFactory).unwrap();

        let mut display = Display::new(640, 480);
        scene.start(&mut display).unwrap();
        assert_eq!(scene.state(), SceneState::Running);
    }

    struct TickCounter {
        ticks: Rc<Cell<usize>>,
    }

    impl ScriptHost for TickCounter {
        fn on_tick(
            &mut self,
            _scene: &mut Scene,
            _display: &mut Display,
            _time: FrameTime,
        ) -> anyhow::Result<()> {
            self.ticks.set(self.ticks.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn tick_hook_runs_only_while_running() {
        let ticks = Rc::new(Cell::new(0));
        let root = scene_root("tick-gate", "{}");
        let mut scene = Scene::new(
            "demo",
            root,
            Box::new(TickCounter {
                ticks: Rc::clone(&ticks),
            }),
        );
        let mut display = Display::new(640, 480);
        let time = FrameTime {
            dt: 1.0 / 60.0,
            frame_index: 0,
        };

        scene.begin_tick(&mut display, time);
        assert_eq!(ticks.get(), 0);

        scene.load(&StubFactory).unwrap();
        scene.start(&mut display).unwrap();
        scene.begin_tick(&mut display, time);
        assert_eq!(ticks.get(), 1);

        scene.close();
        scene.begin_tick(&mut display, time);
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn resource_declarations_with_missing_files_are_skipped() {
        let root = scene_root(
            "missing-file",
            r#"{"resources": [
                {"type": "model3d", "resourcename": "cube", "filename": "does-not-exist.obj"}
            ]}"#,
        );
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        scene.load(&StubFactory).unwrap();
        assert_eq!(scene.resources().model_count(), 0);
    }

    #[test]
    fn document_with_all_three_sections_loads() {
        let root = scene_root(
            "all-sections",
            r#"{
                "resources": [
                    {"type": "model3d", "resourcename": "tri", "filename": "tri.obj"}
                ],
                "staticObjects": [
                    {"type": "line", "tail": [0,0,0], "head": [1,0,0], "color": [1,0,0,1]},
                    {"type": "staticmodel", "resource": "tri"}
                ],
                "dynamicObjects": [
                    {"name": "player", "resource": "tri"}
                ]
            }"#,
        );
        std::fs::write(
            root.join("tri.obj"),
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();

        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        scene.load(&StubFactory).unwrap();

        assert_eq!(scene.state(), SceneState::Ready);
        assert_eq!(scene.resources().model_count(), 1);
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.entity_count(), 1);
        assert_eq!(scene.chain().attached(), 3);
    }

    #[test]
    fn statics_past_chain_capacity_stay_owned() {
        let root = scene_root(
            "bounded-statics",
            r#"{"staticObjects": [
                {"type": "line", "name": "a", "tail": [0,0,0], "head": [1,0,0]},
                {"type": "line", "name": "b", "tail": [0,0,0], "head": [0,1,0]}
            ]}"#,
        );
        let mut scene = Scene::bounded("demo", root, Box::new(NullHost), 1);
        scene.load(&StubFactory).unwrap();

        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.chain().attached(), 1);
    }

    #[test]
    fn ambient_settings_feed_the_draw_term() {
        let root = scene_root("ambient", "{}");
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        assert_eq!(scene.ambient(), DEFAULT_AMBIENT);

        scene.set_ambient_color(Vec3::new(0.2, 0.4, 0.6));
        scene.set_ambient_intensity(1.5);
        assert_eq!(scene.ambient(), [0.2, 0.4, 0.6, 1.0]);
    }

    struct CountingFactory {
        segment_counts: RefCell<Vec<usize>>,
    }

    impl RenderObjectFactory for CountingFactory {
        fn line(
            &self,
            label: &str,
            _from: Vec3,
            _to: Vec3,
            _color: [f32; 4],
        ) -> Result<SceneObject, RenderError> {
            Ok(StubFactory::object(label, None))
        }

        fn static_model(
            &self,
            label: &str,
            model: &ModelData,
            _transform: Transform,
            _color: [f32; 4],
        ) -> Result<SceneObject, RenderError> {
            self.segment_counts.borrow_mut().push(model.segments.len());
            Ok(StubFactory::object(label, None))
        }

        fn dynamic_model(
            &self,
            label: &str,
            model: &ModelData,
            transform: Transform,
            _color: [f32; 4],
        ) -> Result<SceneObject, RenderError> {
            self.segment_counts.borrow_mut().push(model.segments.len());
            Ok(StubFactory::object(label, Some(transform)))
        }
    }

    #[test]
    fn every_model_segment_reaches_the_factory() {
        let root = scene_root(
            "segments",
            r#"{"staticObjects": [
                {"type": "rawstaticmodel", "name": "tri",
                 "vertices": [[0,0,0],[1,0,0],[0,1,0]], "indices": [0,1,2]}
            ]}"#,
        );
        let factory = CountingFactory {
            segment_counts: RefCell::new(Vec::new()),
        };
        let mut scene = Scene::new("demo", root, Box::new(NullHost));
        scene.load(&factory).unwrap();

        let mut pair = triangle();
        pair.segments.push(pair.segments[0].clone());
        scene.resources_mut().add_model("pair", pair);
        scene.spawn("player", "pair", Vec3::ZERO, &factory).unwrap();

        assert_eq!(*factory.segment_counts.borrow(), vec![1, 2]);
    }
}
