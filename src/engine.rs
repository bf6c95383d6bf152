//! Frame driver tying strokes, input channels, style and renderer together.
//!
//! The host calls [`Engine::frame`] once per rendered frame with each
//! channel's position, and [`Engine::execute`] when the user issues a command.

use crate::draw::{Bounds, DrawingStyle};
use crate::error::DrawError;
use crate::input::{Channel, ChannelEvent, InputMode, InputRouter, NUM_CHANNELS};
use crate::render::Renderer;
use crate::session::{self, SceneId, StorageOptions};
use crate::store::ItemStore;
use glam::Vec2;
use log::{info, warn};
use std::path::Path;

/// Per-frame input from the host.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub elapsed: f32,
    /// World position of each channel, indexed by [`Channel::index`]
    pub positions: [Vec2; NUM_CHANNELS],
    /// Visible world area
    pub viewport: Bounds,
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub events: [ChannelEvent; NUM_CHANNELS],
    /// Strokes removed by the sweep (faded or erased)
    pub removed: usize,
    /// Strokes drawn after culling
    pub drawn: usize,
}

/// User-facing commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press (`true`) or release (`false`) the draw control
    ToggleDraw(bool),
    /// Press (`true`) or release (`false`) the erase control
    ToggleErase(bool),
    /// Remove every stroke
    Reset,
    /// Save to the named file, or the scene's default file
    Save(Option<String>),
    /// Load from the named file, or the scene's default file
    Load(Option<String>),
}

/// Result of a command, phrased for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub ok: bool,
    pub message: String,
}

impl CommandOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

pub struct Engine<R: Renderer> {
    store: ItemStore,
    router: InputRouter,
    renderer: R,
    storage: StorageOptions,
    scene: Option<SceneId>,
    style: DrawingStyle,
}

impl<R: Renderer> Engine<R> {
    pub fn new(style: DrawingStyle, storage: StorageOptions, renderer: R) -> Self {
        Self {
            store: ItemStore::new(style.max_items),
            router: InputRouter::new(),
            renderer,
            storage,
            scene: None,
            style,
        }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn style(&self) -> &DrawingStyle {
        &self.style
    }

    pub fn scene(&self) -> Option<&SceneId> {
        self.scene.as_ref()
    }

    /// Applies the style sampled for this frame. A lower stroke limit than the
    /// current count clears the store.
    pub fn set_style(&mut self, style: DrawingStyle) {
        self.store.set_capacity(style.max_items, &mut self.renderer);
        self.style = style;
    }

    /// Advances every channel, then ages and sweeps strokes, then draws the
    /// visible ones.
    pub fn frame(&mut self, input: &FrameInput) -> FrameReport {
        let mut events = [ChannelEvent::Idle; NUM_CHANNELS];
        for channel in Channel::ALL {
            events[channel.index()] = self.router.update(
                channel,
                input.positions[channel.index()],
                &self.style,
                &mut self.store,
                &mut self.renderer,
            );
        }
        let removed = self
            .store
            .sweep(input.elapsed, self.style.fade_time, &mut self.renderer);
        let drawn = self.store.render(&input.viewport, &mut self.renderer);
        FrameReport {
            events,
            removed,
            drawn,
        }
    }

    /// Drops every stroke and returns all channels to idle.
    pub fn reset(&mut self) {
        self.store.clear(&mut self.renderer);
        self.router.reset();
    }

    /// Switches to a new scene. Strokes belong to a scene, so they are dropped.
    pub fn on_scene_change(&mut self, scene: Option<SceneId>) {
        if let Some(scene) = &scene {
            info!("Scene changed to {}", scene.name);
        }
        self.scene = scene;
        self.reset();
    }

    /// Runs a command on the primary channel.
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        self.execute_on(Channel::Primary, command)
    }

    /// Runs a command; draw/erase toggles apply to `channel`.
    pub fn execute_on(&mut self, channel: Channel, command: Command) -> CommandOutcome {
        match command {
            Command::ToggleDraw(pressed) => self.toggle(channel, InputMode::Draw, pressed),
            Command::ToggleErase(pressed) => self.toggle(channel, InputMode::Erase, pressed),
            Command::Reset => {
                let count = self.store.len();
                self.reset();
                CommandOutcome::ok(format!("Cleared {count} strokes"))
            }
            Command::Save(name) => self.save(name.as_deref()),
            Command::Load(name) => self.load(name.as_deref()),
        }
    }

    fn toggle(&mut self, channel: Channel, mode: InputMode, pressed: bool) -> CommandOutcome {
        if pressed {
            self.router.set_mode(channel, mode);
        } else if self.router.mode(channel) == mode {
            self.router.set_mode(channel, InputMode::None);
        }
        CommandOutcome::ok(format!("{:?}: {:?}", channel, self.router.mode(channel)))
    }

    /// Saves every live stroke to the named file or the scene's default file.
    pub fn save(&mut self, name: Option<&str>) -> CommandOutcome {
        let path = match self.storage.resolve(name, self.scene.as_ref()) {
            Ok(path) => path,
            Err(err) => return CommandOutcome::failed(format!("Save failed: {err}")),
        };
        let items = self
            .store
            .iter()
            .filter(|(_, item)| !item.is_killed())
            .map(|(_, item)| item.points());
        match session::save_drawing(&path, items) {
            Ok(report) => {
                let mut message = format!(
                    "Saved {} strokes to {}",
                    report.items,
                    report.path.display()
                );
                if let Some(dir_err) = report.directory_error {
                    message.push_str(&format!(" (could not create folder: {dir_err})"));
                }
                CommandOutcome::ok(message)
            }
            Err(err) => {
                warn!("{err}");
                CommandOutcome::failed(format!("Save failed: {err}"))
            }
        }
    }

    /// Loads strokes from the named file or the scene's default file.
    pub fn load(&mut self, name: Option<&str>) -> CommandOutcome {
        match self.storage.resolve(name, self.scene.as_ref()) {
            Ok(path) => self.load_from_path(&path),
            Err(err) => CommandOutcome::failed(format!("Load failed: {err}")),
        }
    }

    /// Loads strokes from `path`, appending them after the existing ones.
    pub fn load_from_path(&mut self, path: &Path) -> CommandOutcome {
        match self.load_inner(path) {
            Ok(message) => CommandOutcome::ok(message),
            Err(err) => {
                warn!("{err}");
                CommandOutcome::failed(format!("Load failed: {err}"))
            }
        }
    }

    fn load_inner(&mut self, path: &Path) -> Result<String, DrawError> {
        let capacity = self.store.capacity();
        let loaded = session::load_drawing(path, capacity)?;
        let inserted = self.store.insert_loaded(loaded.items, &mut self.renderer);
        info!(
            "Loaded {} strokes from {} ({} read, {} discarded, {} lines skipped)",
            inserted,
            path.display(),
            loaded.read,
            loaded.discarded,
            loaded.skipped_lines
        );

        let mut message = format!("Loaded {} strokes from {}", inserted, path.display());
        if loaded.discarded > 0 {
            message.push_str(&format!(
                ", discarded {} over the limit of {}",
                loaded.discarded, capacity
            ));
        }
        if loaded.skipped_lines > 0 {
            message.push_str(&format!(", skipped {} bad lines", loaded.skipped_lines));
        }
        if loaded.truncated {
            message.push_str(&format!(
                ", stopped after {} strokes",
                session::MAX_ITEMS_PER_LOAD
            ));
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BatchKind, Point, color::WHITE};
    use crate::input::ERASE_RADIUS;
    use crate::render::RecordingRenderer;
    use std::path::PathBuf;

    fn viewport() -> Bounds {
        Bounds::from_min_max(Vec2::splat(-1000.0), Vec2::splat(1000.0))
    }

    fn engine_in(dir: PathBuf, max_items: usize, fade_time: f32) -> Engine<RecordingRenderer> {
        let style = DrawingStyle {
            width: 2.0,
            color: WHITE,
            fade_time,
            max_items,
        };
        Engine::new(style, StorageOptions::new(dir), RecordingRenderer::new())
    }

    fn engine(max_items: usize, fade_time: f32) -> Engine<RecordingRenderer> {
        engine_in(PathBuf::from("/nonexistent"), max_items, fade_time)
    }

    fn frame_at(
        engine: &mut Engine<RecordingRenderer>,
        elapsed: f32,
        primary: Vec2,
        secondary: Vec2,
    ) -> FrameReport {
        engine.frame(&FrameInput {
            elapsed,
            positions: [primary, secondary],
            viewport: viewport(),
        })
    }

    fn draw_stroke(engine: &mut Engine<RecordingRenderer>, from: Vec2, to: Vec2) {
        engine.execute(Command::ToggleDraw(true));
        frame_at(engine, 0.0, from, Vec2::ZERO);
        frame_at(engine, 0.0, to, Vec2::ZERO);
        engine.execute(Command::ToggleDraw(false));
        frame_at(engine, 0.0, to, Vec2::ZERO);
    }

    #[test]
    fn finished_stroke_fades_out() {
        let mut engine = engine(8, 2.0);
        draw_stroke(&mut engine, Vec2::ZERO, Vec2::new(50.0, 0.0));
        assert_eq!(engine.store().len(), 1);

        let report = frame_at(&mut engine, 2.1, Vec2::ZERO, Vec2::ZERO);
        assert_eq!(report.removed, 1);
        assert!(engine.store().is_empty());
        assert_eq!(engine.renderer().live_count(), 0);
    }

    #[test]
    fn stroke_being_drawn_never_fades() {
        let mut engine = engine(8, 1.0);
        engine.execute(Command::ToggleDraw(true));
        frame_at(&mut engine, 0.0, Vec2::ZERO, Vec2::ZERO);
        for _ in 0..5 {
            frame_at(&mut engine, 0.9, Vec2::ZERO, Vec2::ZERO);
        }
        assert_eq!(engine.store().len(), 1);
    }

    #[test]
    fn tap_draws_a_dot() {
        let mut engine = engine(8, 0.0);
        engine.execute(Command::ToggleDraw(true));
        frame_at(&mut engine, 0.0, Vec2::new(3.0, 3.0), Vec2::ZERO);
        engine.execute(Command::ToggleDraw(false));
        let report = frame_at(&mut engine, 0.0, Vec2::new(3.0, 3.0), Vec2::ZERO);
        assert_eq!(report.drawn, 1);

        let (_, item) = engine.store().iter().next().unwrap();
        assert_eq!(
            engine.renderer().batch_kinds(item.handle()),
            vec![BatchKind::Dot]
        );
    }

    #[test]
    fn erasing_across_a_stroke_removes_it_the_same_frame() {
        let mut engine = engine(8, 0.0);
        draw_stroke(&mut engine, Vec2::new(-50.0, 0.0), Vec2::new(50.0, 0.0));

        engine.execute_on(Channel::Secondary, Command::ToggleErase(true));
        frame_at(&mut engine, 0.0, Vec2::ZERO, Vec2::new(0.0, -40.0));
        assert_eq!(engine.store().len(), 1);
        let report = frame_at(&mut engine, 0.0, Vec2::ZERO, Vec2::new(0.0, 40.0));
        assert_eq!(report.events[Channel::Secondary.index()], ChannelEvent::Erased(1));
        assert_eq!(report.removed, 1);
        assert!(engine.store().is_empty());
    }

    #[test]
    fn first_erase_frame_hits_nearby_stroke() {
        let mut engine = engine(8, 0.0);
        draw_stroke(&mut engine, Vec2::ZERO, Vec2::new(50.0, 0.0));
        engine.execute(Command::ToggleErase(true));
        let report = frame_at(
            &mut engine,
            0.0,
            Vec2::new(25.0, ERASE_RADIUS),
            Vec2::ZERO,
        );
        assert_eq!(report.removed, 1);
    }

    #[test]
    fn releasing_a_different_control_keeps_mode() {
        let mut engine = engine(8, 0.0);
        engine.execute(Command::ToggleDraw(true));
        engine.execute(Command::ToggleErase(false));
        assert_eq!(engine.router().mode(Channel::Primary), InputMode::Draw);
        engine.execute(Command::ToggleDraw(false));
        assert_eq!(engine.router().mode(Channel::Primary), InputMode::None);
    }

    #[test]
    fn lowering_limit_below_count_clears() {
        let mut engine = engine(8, 0.0);
        for y in [0.0, 20.0, 40.0] {
            draw_stroke(&mut engine, Vec2::new(0.0, y), Vec2::new(30.0, y));
        }
        let mut style = *engine.style();
        style.max_items = 2;
        engine.set_style(style);
        assert!(engine.store().is_empty());
        assert_eq!(engine.store().capacity(), 2);
    }

    #[test]
    fn offscreen_strokes_are_culled() {
        let mut engine = engine(8, 0.0);
        draw_stroke(&mut engine, Vec2::ZERO, Vec2::new(30.0, 0.0));
        draw_stroke(&mut engine, Vec2::splat(5000.0), Vec2::splat(5100.0));
        engine.renderer_mut().take_draw_calls();
        let report = frame_at(&mut engine, 0.0, Vec2::ZERO, Vec2::ZERO);
        assert_eq!(report.drawn, 1);
        assert_eq!(engine.renderer_mut().take_draw_calls().len(), 1);
    }

    #[test]
    fn reset_command_clears_everything() {
        let mut engine = engine(8, 0.0);
        draw_stroke(&mut engine, Vec2::ZERO, Vec2::new(30.0, 0.0));
        engine.execute(Command::ToggleErase(true));
        let outcome = engine.execute(Command::Reset);
        assert!(outcome.ok);
        assert_eq!(outcome.message, "Cleared 1 strokes");
        assert!(engine.store().is_empty());
        assert_eq!(engine.router().mode(Channel::Primary), InputMode::None);
    }

    #[test]
    fn save_and_load_through_scene_default_file() {
        let temp = tempfile::tempdir().unwrap();
        let mut engine = engine_in(temp.path().to_path_buf(), 8, 0.0);
        engine.on_scene_change(Some(SceneId::from_contents("Dune Hollow", b"scene data")));
        draw_stroke(&mut engine, Vec2::ZERO, Vec2::new(30.0, 0.0));
        draw_stroke(&mut engine, Vec2::new(0.0, 50.0), Vec2::new(30.0, 50.0));

        let saved = engine.execute(Command::Save(None));
        assert!(saved.ok, "{}", saved.message);
        let expected = temp.path().join(format!(
            "{}.txt",
            engine.scene().unwrap().file_stem()
        ));
        assert!(expected.exists());
        let points_before: Vec<Vec<Point>> = engine
            .store()
            .iter()
            .map(|(_, item)| item.points().to_vec())
            .collect();

        engine.execute(Command::Reset);
        let loaded = engine.execute(Command::Load(None));
        assert!(loaded.ok, "{}", loaded.message);
        assert_eq!(engine.store().len(), 2);
        assert!(engine.store().iter().all(|(_, item)| !item.is_drawing()));
        let points_after: Vec<Vec<Point>> = engine
            .store()
            .iter()
            .map(|(_, item)| item.points().to_vec())
            .collect();
        assert_eq!(points_after, points_before);
    }

    #[test]
    fn load_over_capacity_keeps_latest() {
        let temp = tempfile::tempdir().unwrap();
        let mut writer = engine_in(temp.path().to_path_buf(), 16, 0.0);
        for i in 0..8 {
            let y = i as f32 * 20.0;
            draw_stroke(&mut writer, Vec2::new(0.0, y), Vec2::new(30.0, y));
        }
        assert!(writer.execute(Command::Save(Some("eight".into()))).ok);

        let mut reader = engine_in(temp.path().to_path_buf(), 5, 0.0);
        let outcome = reader.execute(Command::Load(Some("eight".into())));
        assert!(outcome.ok);
        assert!(outcome.message.contains("discarded 3"), "{}", outcome.message);
        assert_eq!(reader.store().len(), 5);
        let ys: Vec<f32> = reader
            .store()
            .iter()
            .map(|(_, item)| item.points()[0].pos.y)
            .collect();
        assert_eq!(ys, vec![60.0, 80.0, 100.0, 120.0, 140.0]);
    }

    #[test]
    fn save_without_scene_or_name_fails() {
        let mut engine = engine(8, 0.0);
        let outcome = engine.execute(Command::Save(None));
        assert!(!outcome.ok);
        assert!(outcome.message.contains("no scene"));
    }

    #[test]
    fn load_of_missing_file_reports_failure() {
        let temp = tempfile::tempdir().unwrap();
        let mut engine = engine_in(temp.path().to_path_buf(), 8, 0.0);
        let outcome = engine.execute(Command::Load(Some("missing".into())));
        assert!(!outcome.ok);
        assert!(outcome.message.starts_with("Load failed"));
    }

    #[test]
    fn scene_change_drops_strokes() {
        let mut engine = engine(8, 0.0);
        draw_stroke(&mut engine, Vec2::ZERO, Vec2::new(30.0, 0.0));
        engine.on_scene_change(Some(SceneId::new("other", "00")));
        assert!(engine.store().is_empty());
        assert_eq!(engine.renderer().live_count(), 0);
    }
}
