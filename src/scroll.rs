//! The virtual page: section layout, scroll position and section-to-scene mapping.

use crate::scene::{SECTION_ORDER, Scene};

/// Fraction of the remaining distance covered per frame by smooth scrolling.
const SMOOTH_SCROLL_RATE: f32 = 0.18;
/// Smooth scrolling snaps to its goal once this close, in pixels.
const SMOOTH_SCROLL_SNAP: f32 = 0.5;

/// Heights of the portfolio sections, in viewport heights, in [`SECTION_ORDER`] order.
pub const SECTION_HEIGHTS: [f32; 6] = [1.0, 1.25, 1.5, 1.5, 1.25, 1.0];

/// A named block of the page.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub name: String,
    /// Distance from the top of the document, in pixels.
    pub top: f32,
    pub height: f32,
}

impl Section {
    /// Top and bottom edges relative to the viewport, like a DOM bounding rect.
    pub fn bounds(&self, scroll_offset: f32) -> (f32, f32) {
        let top = self.top - scroll_offset;
        (top, top + self.height)
    }

    fn straddles(&self, scroll_offset: f32, y: f32) -> bool {
        let (top, bottom) = self.bounds(scroll_offset);
        top <= y && y < bottom
    }
}

/// Ordered page sections, each sized in multiples of the viewport height.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    heights: Vec<(String, f32)>,
    sections: Vec<Section>,
}

impl PageLayout {
    /// Build a layout from `(name, viewport heights)` pairs in document order.
    pub fn new<S: Into<String>>(heights: impl IntoIterator<Item = (S, f32)>) -> Self {
        Self {
            heights: heights
                .into_iter()
                .map(|(name, h)| (name.into(), h.max(0.0)))
                .collect(),
            sections: Vec::new(),
        }
    }

    /// The portfolio page: every scene section, in order.
    pub fn portfolio() -> Self {
        Self::new(SECTION_ORDER.iter().zip(SECTION_HEIGHTS).map(|(n, h)| (*n, h)))
    }

    /// Recompute pixel positions for a viewport of the given height.
    pub fn layout(&mut self, viewport_height: f32) {
        let mut top = 0.0;
        self.sections = self
            .heights
            .iter()
            .map(|(name, h)| {
                let section = Section {
                    name: name.clone(),
                    top,
                    height: h * viewport_height,
                };
                top += section.height;
                section
            })
            .collect();
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn document_height(&self) -> f32 {
        self.sections.last().map(|s| s.top + s.height).unwrap_or(0.0)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

/// Vertical scroll position of the page, with optional smooth scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    offset: f32,
    goal: Option<f32>,
}

impl ScrollState {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.goal.is_some()
    }

    /// Scroll by `delta` pixels, cancelling any smooth scroll.
    pub fn scroll_by(&mut self, delta: f32, max_offset: f32) {
        self.goal = None;
        self.offset = (self.offset + delta).clamp(0.0, max_offset.max(0.0));
    }

    /// Jump straight to `offset`, cancelling any smooth scroll.
    pub fn scroll_to(&mut self, offset: f32, max_offset: f32) {
        self.goal = None;
        self.offset = offset.clamp(0.0, max_offset.max(0.0));
    }

    /// Start easing towards `offset` over the next frames.
    pub fn smooth_scroll_to(&mut self, offset: f32, max_offset: f32) {
        self.goal = Some(offset.clamp(0.0, max_offset.max(0.0)));
    }

    /// Advance smooth scrolling by one frame. Returns `true` if the offset moved.
    pub fn step(&mut self) -> bool {
        let Some(goal) = self.goal else {
            return false;
        };

        let remaining = goal - self.offset;
        if remaining.abs() <= SMOOTH_SCROLL_SNAP {
            self.offset = goal;
            self.goal = None;
        } else {
            self.offset += remaining * SMOOTH_SCROLL_RATE;
        }
        remaining != 0.0
    }

    /// Keep the offset valid after the document or viewport changed size.
    pub fn clamp(&mut self, max_offset: f32) {
        let max_offset = max_offset.max(0.0);
        self.offset = self.offset.clamp(0.0, max_offset);
        if let Some(goal) = self.goal.as_mut() {
            *goal = goal.clamp(0.0, max_offset);
        }
    }
}

/// Normalised scroll position: 0 at the top of the document, 1 at the bottom.
///
/// A document no taller than the viewport cannot scroll and reports 0.
pub fn scroll_fraction(offset: f32, document_height: f32, viewport_height: f32) -> f32 {
    let max_offset = document_height - viewport_height;
    if max_offset <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / max_offset).clamp(0.0, 1.0)
}

/// Maps the section under the viewport midpoint to a scene.
///
/// When no known section straddles the midpoint the previous result is kept,
/// so gaps never flicker back to a default scene.
#[derive(Clone, Copy, Debug)]
pub struct ScrollMapper {
    resolved: Scene,
}

impl ScrollMapper {
    pub fn new(initial: Scene) -> Self {
        Self { resolved: initial }
    }

    /// The scene resolved by the last call to [`resolve`](Self::resolve).
    pub fn resolved(&self) -> Scene {
        self.resolved
    }

    pub fn resolve(&mut self, layout: &PageLayout, scroll_offset: f32, viewport_height: f32) -> Scene {
        let midpoint = viewport_height * 0.5;
        if let Some(scene) = layout
            .sections()
            .iter()
            .find(|s| s.straddles(scroll_offset, midpoint))
            .and_then(|s| Scene::for_section(&s.name))
        {
            self.resolved = scene;
        }
        self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: f32 = 800.0;

    fn portfolio() -> PageLayout {
        let mut layout = PageLayout::portfolio();
        layout.layout(VIEWPORT);
        layout
    }

    #[test]
    fn layout_stacks_sections() {
        let layout = portfolio();
        assert_eq!(layout.sections().len(), 6);
        assert_eq!(layout.sections()[0].top, 0.0);
        assert_eq!(layout.sections()[1].top, 800.0);
        assert_eq!(layout.sections()[2].top, 1800.0);
        assert_eq!(layout.document_height(), 7.5 * VIEWPORT);
        assert_eq!(layout.section("Skills").map(|s| s.height), Some(1000.0));
    }

    #[test]
    fn relayout_follows_viewport() {
        let mut layout = portfolio();
        layout.layout(400.0);
        assert_eq!(layout.sections()[1].top, 400.0);
    }

    #[test]
    fn bounds_are_viewport_relative() {
        let layout = portfolio();
        let about = layout.section("about").unwrap();
        assert_eq!(about.bounds(500.0), (300.0, 1300.0));
    }

    #[test]
    fn midpoint_in_about_resolves_brain() {
        let layout = portfolio();
        let mut mapper = ScrollMapper::new(Scene::Dna);
        assert_eq!(mapper.resolve(&layout, 0.0, VIEWPORT), Scene::Dna);
        // Midpoint sits at document y = 500 + 400 = 900, inside "about".
        assert_eq!(mapper.resolve(&layout, 500.0, VIEWPORT), Scene::Brain);
    }

    #[test]
    fn resolve_is_idempotent() {
        let layout = portfolio();
        let mut mapper = ScrollMapper::new(Scene::Dna);
        let first = mapper.resolve(&layout, 3000.0, VIEWPORT);
        for _ in 0..5 {
            assert_eq!(mapper.resolve(&layout, 3000.0, VIEWPORT), first);
        }
    }

    #[test]
    fn every_section_reaches_its_scene() {
        let layout = portfolio();
        let mut mapper = ScrollMapper::new(Scene::Dna);
        for section in layout.sections() {
            let offset = section.top + section.height * 0.5 - VIEWPORT * 0.5;
            let scene = mapper.resolve(&layout, offset, VIEWPORT);
            assert_eq!(Some(scene), Scene::for_section(&section.name));
        }
    }

    #[test]
    fn gaps_keep_previous_scene() {
        let mut layout = PageLayout::new([("hero", 1.0), ("spacer", 1.0), ("contact", 1.0)]);
        layout.layout(VIEWPORT);
        let mut mapper = ScrollMapper::new(Scene::Dna);
        assert_eq!(mapper.resolve(&layout, 1600.0, VIEWPORT), Scene::Wormhole);
        assert_eq!(mapper.resolve(&layout, 800.0, VIEWPORT), Scene::Wormhole);

        let empty = PageLayout::default();
        assert_eq!(mapper.resolve(&empty, 0.0, VIEWPORT), Scene::Wormhole);
    }

    #[test]
    fn scroll_fraction_is_clamped() {
        assert_eq!(scroll_fraction(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(500.0, 2000.0, 1000.0), 0.5);
        assert_eq!(scroll_fraction(5000.0, 2000.0, 1000.0), 1.0);
        assert_eq!(scroll_fraction(100.0, 800.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(f32::NAN, 2000.0, 1000.0), 0.0);
    }

    #[test]
    fn scroll_by_clamps_and_cancels_smooth_scroll() {
        let mut scroll = ScrollState::default();
        scroll.smooth_scroll_to(900.0, 1000.0);
        scroll.scroll_by(-50.0, 1000.0);
        assert_eq!(scroll.offset(), 0.0);
        assert!(!scroll.is_smooth_scrolling());
        scroll.scroll_by(5000.0, 1000.0);
        assert_eq!(scroll.offset(), 1000.0);
    }

    #[test]
    fn smooth_scroll_converges_and_stops() {
        let mut scroll = ScrollState::default();
        scroll.smooth_scroll_to(1200.0, 5000.0);
        let mut frames = 0;
        let mut last = 0.0;
        while scroll.step() {
            assert!(scroll.offset() >= last);
            last = scroll.offset();
            frames += 1;
            assert!(frames < 200);
        }
        assert_eq!(scroll.offset(), 1200.0);
        assert!(!scroll.is_smooth_scrolling());
        assert!(!scroll.step());
    }
}
