//! The GPU-free heart of the backdrop: page scroll in, one frame of geometry out.
//!
//! [`Engine`] owns every piece of mutable state (frame context, scroll
//! position, morph, HUD, background colour). Input handlers call its scroll
//! and resize methods between frames; [`Engine::advance`] then produces a
//! [`Frame`] snapshot that a renderer can draw without touching the engine.

use glam::Mat4;

use crate::camera::CameraState;
use crate::config::EngineConfig;
use crate::hud::HudState;
use crate::input::PageCommand;
use crate::math::lerp3;
use crate::scene::{GeometryBatch, MorphController, MorphEvent, MorphState, Scene, generate};
use crate::scroll::{PageLayout, ScrollMapper, ScrollState, scroll_fraction};

/// Timing and page geometry for the current frame.
///
/// Only the engine writes these fields; input handlers go through the
/// engine's scroll and resize methods.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Seconds since the first frame.
    pub time: f32,
    /// Frames advanced so far.
    pub frame: u64,
    scroll_offset: f32,
    viewport: (f32, f32),
    document_height: f32,
}

impl FrameContext {
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    /// 0 at the top of the document, 1 at the bottom.
    pub fn scroll_fraction(&self) -> f32 {
        scroll_fraction(self.scroll_offset, self.document_height, self.viewport.1)
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.0 / self.viewport.1.max(1.0)
    }
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug)]
pub struct Frame {
    pub time: f32,
    pub frame: u64,
    pub viewport: (f32, f32),
    pub morph: MorphState,
    /// Scene whose geometry is in `batch`.
    pub drawn: Scene,
    pub batch: GeometryBatch,
    /// Smoothed clear colour, linear RGB.
    pub background: [f32; 3],
    pub camera: CameraState,
    pub mvp: Mat4,
    pub hud: HudState,
}

pub struct Engine {
    config: EngineConfig,
    context: FrameContext,
    layout: PageLayout,
    scroll: ScrollState,
    mapper: ScrollMapper,
    morph: MorphController,
    hud: HudState,
    background: [f32; 3],
}

impl Engine {
    pub fn new(config: EngineConfig, mut layout: PageLayout, width: f32, height: f32) -> Self {
        let (width, height) = (width.max(1.0), height.max(1.0));
        layout.layout(height);
        let initial = config.initial_scene;

        let mut engine = Self {
            context: FrameContext {
                time: 0.0,
                frame: 0,
                scroll_offset: 0.0,
                viewport: (width, height),
                document_height: layout.document_height(),
            },
            layout,
            scroll: ScrollState::default(),
            mapper: ScrollMapper::new(initial),
            morph: MorphController::new(initial, config.morph_timing, config.morph_easing),
            hud: HudState::new(config.hud_ttl_frames, config.hud_fade_frames),
            background: initial.background(),
            config,
        };
        // The page may open on a section other than the initial scene's.
        engine.on_scroll();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn context(&self) -> &FrameContext {
        &self.context
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn morph(&self) -> MorphState {
        self.morph.state()
    }

    pub fn hud(&self) -> &HudState {
        &self.hud
    }

    pub fn background(&self) -> [f32; 3] {
        self.background
    }

    fn max_offset(&self) -> f32 {
        self.context.document_height - self.context.viewport.1
    }

    /// The viewport changed size: lay the page out again and keep the offset valid.
    ///
    /// Empty viewports (a minimised window) are ignored so the page keeps its
    /// layout and scroll position until the window comes back.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width >= 1.0 && height >= 1.0) {
            log::debug!("ignoring resize to {width}x{height}");
            return;
        }
        if (width, height) == self.context.viewport {
            return;
        }
        self.context.viewport = (width, height);
        self.layout.layout(height);
        self.context.document_height = self.layout.document_height();
        self.scroll.clamp(self.max_offset());
        self.on_scroll();
    }

    pub fn scroll_by(&mut self, pixels: f32) {
        self.scroll.scroll_by(pixels, self.max_offset());
        self.on_scroll();
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.scroll.scroll_to(offset, self.max_offset());
        self.on_scroll();
    }

    /// Start a smooth scroll to the top of the section at `index`.
    ///
    /// Returns `false` for an index past the last section.
    pub fn jump_to_section(&mut self, index: usize) -> bool {
        let Some(top) = self.layout.sections().get(index).map(|s| s.top) else {
            return false;
        };
        self.scroll.smooth_scroll_to(top, self.max_offset());
        true
    }

    pub fn apply(&mut self, command: PageCommand) {
        match command {
            PageCommand::ScrollBy(pixels) => self.scroll_by(pixels),
            PageCommand::ScrollPages(pages) => self.scroll_by(pages * self.context.viewport.1),
            PageCommand::Top => self.scroll_to(0.0),
            PageCommand::Bottom => self.scroll_to(self.max_offset()),
            PageCommand::JumpTo(index) => {
                if !self.jump_to_section(index) {
                    log::debug!("no section {index} to jump to");
                }
            }
        }
    }

    /// A scroll notification: resolve the section under the viewport midpoint
    /// and retarget the morph if it changed.
    fn on_scroll(&mut self) -> Option<MorphEvent> {
        self.context.scroll_offset = self.scroll.offset();
        let scene = self.mapper.resolve(
            &self.layout,
            self.context.scroll_offset,
            self.context.viewport.1,
        );
        let event = self.morph.request(scene);
        if let Some(MorphEvent::Started { to, .. }) = event {
            self.hud.announce(to);
        }
        event
    }

    /// Advance time by `dt` seconds and build the next frame.
    pub fn advance(&mut self, dt: f32) -> Frame {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.context.time += dt;
        self.context.frame += 1;

        if self.scroll.step() {
            self.on_scroll();
        }

        if let Some(MorphEvent::Completed { scene }) = self.morph.advance(dt) {
            log::debug!("now showing {scene}");
        }
        self.hud.tick();

        let morph = self.morph.state();
        let target = morph.target.background();
        self.background = lerp3(self.background, target, self.config.background_smoothing);

        let time = self.context.time;
        let drawn = morph.drawn_scene();
        let camera = CameraState::at(
            time,
            self.context.scroll_fraction(),
            self.morph.eased(),
            &self.config,
        );

        Frame {
            time,
            frame: self.context.frame,
            viewport: self.context.viewport,
            morph,
            drawn,
            batch: generate(drawn, time),
            background: self.background,
            camera,
            mvp: camera.model_view_projection(&self.config, self.context.aspect()),
            hud: self.hud.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MorphPhase;

    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 800.0;
    const DT: f32 = 1.0 / 60.0;

    fn engine() -> Engine {
        Engine::new(EngineConfig::default(), PageLayout::portfolio(), WIDTH, HEIGHT)
    }

    fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
        a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f32>().sqrt()
    }

    #[test]
    fn starts_on_hero_with_dna() {
        let engine = engine();
        assert_eq!(engine.morph(), MorphState::settled(Scene::Dna));
        assert!(engine.hud().is_idle());
        assert_eq!(engine.context().document_height(), 7.5 * HEIGHT);
        assert_eq!(engine.background(), Scene::Dna.background());
    }

    #[test]
    fn scrolling_into_about_morphs_to_brain() {
        let mut engine = engine();
        engine.scroll_to(500.0);

        let state = engine.morph();
        assert_eq!(state.target, Scene::Brain);
        assert_eq!(state.progress, 0.0);
        assert_eq!(engine.hud().label, "NEURAL NET");
        assert_eq!(engine.hud().alpha, 1.0);

        let start = distance(engine.background(), Scene::Brain.background());
        let mut last_progress = 0.0;
        let mut last_gap = start;
        for _ in 0..50 {
            let frame = engine.advance(DT);
            assert!(frame.morph.progress >= last_progress);
            last_progress = frame.morph.progress;
            let gap = distance(frame.background, Scene::Brain.background());
            assert!(gap <= last_gap);
            last_gap = gap;
        }
        assert_eq!(engine.morph(), MorphState::settled(Scene::Brain));
        assert!(last_gap < start);

        for _ in 0..300 {
            engine.advance(DT);
        }
        assert!(distance(engine.background(), Scene::Brain.background()) < 1e-3);
    }

    #[test]
    fn scrolls_resolving_to_current_scene_change_nothing() {
        let mut engine = engine();
        let before = engine.morph();
        engine.scroll_by(100.0);
        engine.scroll_by(150.0);
        assert_eq!(engine.morph(), before);
        assert!(engine.hud().is_idle());
    }

    #[test]
    fn geometry_switches_at_transition_midpoint() {
        let mut engine = engine();
        engine.scroll_to(500.0);
        loop {
            let frame = engine.advance(DT);
            if frame.morph.phase() == MorphPhase::Stable {
                break;
            }
            let expected = if frame.morph.progress < 0.5 {
                Scene::Dna
            } else {
                Scene::Brain
            };
            assert_eq!(frame.drawn, expected);
            assert_eq!(frame.batch, generate(expected, frame.time));
        }
    }

    #[test]
    fn retarget_mid_transition_restarts() {
        let mut engine = engine();
        engine.scroll_to(500.0);
        for _ in 0..30 {
            engine.advance(DT);
        }
        let about_to_contact = engine.context().document_height() - HEIGHT;
        engine.scroll_to(about_to_contact);
        let state = engine.morph();
        assert_eq!(state.target, Scene::Wormhole);
        assert_eq!(state.current, Scene::Dna);
        assert_eq!(state.progress, 0.0);
        assert_eq!(engine.hud().label, "WORMHOLE");
    }

    #[test]
    fn jump_to_section_scrolls_smoothly() {
        let mut engine = engine();
        assert!(engine.jump_to_section(3));
        assert!(!engine.jump_to_section(6));

        let goal = engine.layout().sections()[3].top;
        let mut offsets = Vec::new();
        for _ in 0..200 {
            engine.advance(DT);
            offsets.push(engine.context().scroll_offset());
        }
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(engine.context().scroll_offset(), goal);
        assert_eq!(engine.morph().target, Scene::Orbit);
    }

    #[test]
    fn wheel_cancels_smooth_scroll() {
        let mut engine = engine();
        engine.apply(PageCommand::JumpTo(5));
        engine.advance(DT);
        engine.apply(PageCommand::ScrollBy(-10_000.0));
        for _ in 0..20 {
            engine.advance(DT);
        }
        assert_eq!(engine.context().scroll_offset(), 0.0);
    }

    #[test]
    fn page_commands_clamp_to_document() {
        let mut engine = engine();
        engine.apply(PageCommand::Bottom);
        assert_eq!(engine.context().scroll_offset(), 6.5 * HEIGHT);
        assert_eq!(engine.context().scroll_fraction(), 1.0);
        engine.apply(PageCommand::ScrollPages(1.0));
        assert_eq!(engine.context().scroll_offset(), 6.5 * HEIGHT);
        engine.apply(PageCommand::Top);
        assert_eq!(engine.context().scroll_fraction(), 0.0);
    }

    #[test]
    fn resize_relays_out_and_clamps() {
        let mut engine = engine();
        engine.apply(PageCommand::Bottom);
        engine.resize(WIDTH, 400.0);
        assert_eq!(engine.context().document_height(), 7.5 * 400.0);
        assert!(engine.context().scroll_offset() <= 6.5 * 400.0);
        assert_eq!(engine.morph().target, Scene::Wormhole);

        engine.resize(0.0, 0.0);
        assert_eq!(engine.context().viewport(), (WIDTH, 400.0));
    }

    #[test]
    fn minimise_and_restore_keeps_scroll_and_scene() {
        let mut engine = engine();
        engine.scroll_to(2600.0);
        for _ in 0..60 {
            engine.advance(DT);
        }
        let offset = engine.context().scroll_offset();
        let morph = engine.morph();
        let label = engine.hud().label.clone();

        engine.resize(0.0, 0.0);
        assert_eq!(engine.context().viewport(), (WIDTH, HEIGHT));
        assert_eq!(engine.context().scroll_offset(), offset);
        assert_eq!(engine.morph(), morph);

        engine.resize(WIDTH, HEIGHT);
        assert_eq!(engine.context().scroll_offset(), offset);
        assert_eq!(engine.morph(), morph);
        assert_eq!(engine.hud().label, label);

        let frame = engine.advance(DT);
        assert_eq!(frame.morph.target, morph.target);
        assert_eq!(frame.morph.phase(), MorphPhase::Stable);
    }

    #[test]
    fn frames_count_and_accumulate_time() {
        let mut engine = engine();
        let a = engine.advance(0.5);
        let b = engine.advance(0.25);
        assert_eq!((a.frame, b.frame), (1, 2));
        assert_eq!(b.time, 0.75);
        let c = engine.advance(f32::NAN);
        assert_eq!(c.time, 0.75);
    }

    #[test]
    fn hud_snapshot_fades_with_frames() {
        let mut engine = engine();
        engine.scroll_to(500.0);
        let mut last = 1.0;
        for _ in 0..200 {
            let frame = engine.advance(DT);
            assert!(frame.hud.alpha <= last);
            last = frame.hud.alpha;
        }
        assert_eq!(last, 0.0);
    }
}
