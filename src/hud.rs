//! Scene-name announcement and decorative overlay drawn over the scene.

use crate::draw2d::{Batch2d, Color};
use crate::font::GlyphTable;
use crate::scene::Scene;

const LABEL_COLOR: Color = Color::rgb(0.55, 0.95, 1.0);
const SCAN_COLOR: Color = Color::rgba(0.4, 0.9, 1.0, 0.12);
const BRACKET_COLOR: Color = Color::rgba(0.6, 0.9, 1.0, 0.25);
const BRACKET_MARGIN: f32 = 24.0;
const BRACKET_LENGTH: f32 = 36.0;
const BRACKET_THICKNESS: f32 = 2.0;
const SCAN_HEIGHT: f32 = 3.0;
/// Seconds for the scan band to sweep the screen once.
const SCAN_PERIOD: f32 = 6.0;

/// The announcement currently on screen, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct HudState {
    pub label: String,
    pub alpha: f32,
    pub ttl: u32,
    ttl_frames: u32,
    fade_frames: u32,
}

impl HudState {
    pub fn new(ttl_frames: u32, fade_frames: u32) -> Self {
        Self {
            label: String::new(),
            alpha: 0.0,
            ttl: 0,
            ttl_frames,
            fade_frames: fade_frames.max(1),
        }
    }

    /// Announce `scene`, replacing whatever was showing.
    pub fn announce(&mut self, scene: Scene) {
        self.label = scene.label().to_string();
        self.alpha = 1.0;
        self.ttl = self.ttl_frames;
    }

    /// Count down one frame, fading out over the last `fade_frames`.
    pub fn tick(&mut self) {
        if self.ttl == 0 {
            self.alpha = 0.0;
            return;
        }
        self.ttl -= 1;
        if self.ttl < self.fade_frames {
            self.alpha = self.ttl as f32 / self.fade_frames as f32;
        }
    }

    /// Nothing left to show until the next announcement.
    pub fn is_idle(&self) -> bool {
        self.ttl == 0
    }

    /// Record the overlay for this frame.
    ///
    /// Label and scan band follow the announcement's alpha; the corner
    /// brackets always draw. Text is skipped when no font is available.
    pub fn draw(&self, out: &mut Batch2d, glyphs: Option<&GlyphTable>, time: f32, width: f32, height: f32) {
        if self.alpha > 0.0 {
            let sweep = (time / SCAN_PERIOD).rem_euclid(1.0);
            out.rect(0.0, sweep * height, width, SCAN_HEIGHT, SCAN_COLOR.fade(self.alpha));

            if let Some(glyphs) = glyphs {
                let x = (width - glyphs.measure(&self.label)) * 0.5;
                let y = height * 0.12;
                out.text(glyphs, x, y, &self.label, LABEL_COLOR.fade(self.alpha));
            }
        }

        draw_brackets(out, width, height);
    }
}

fn draw_brackets(out: &mut Batch2d, width: f32, height: f32) {
    let (m, l, t) = (BRACKET_MARGIN, BRACKET_LENGTH, BRACKET_THICKNESS);
    let corners = [
        (m, m, 1.0, 1.0),
        (width - m, m, -1.0, 1.0),
        (m, height - m, 1.0, -1.0),
        (width - m, height - m, -1.0, -1.0),
    ];
    for (x, y, dx, dy) in corners {
        // horizontal arm, then vertical arm, both growing inwards
        let hx = if dx > 0.0 { x } else { x - l };
        let hy = if dy > 0.0 { y } else { y - t };
        out.rect(hx, hy, l, t, BRACKET_COLOR);
        let vx = if dx > 0.0 { x } else { x - t };
        let vy = if dy > 0.0 { y } else { y - l };
        out.rect(vx, vy, t, l, BRACKET_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announce_shows_label_at_full_alpha() {
        let mut hud = HudState::new(150, 45);
        assert!(hud.is_idle());
        hud.announce(Scene::Brain);
        assert_eq!(hud.label, "NEURAL NET");
        assert_eq!(hud.alpha, 1.0);
        assert_eq!(hud.ttl, 150);
    }

    #[test]
    fn alpha_holds_then_fades_monotonically() {
        let mut hud = HudState::new(150, 45);
        hud.announce(Scene::Orbit);

        let mut last = hud.alpha;
        let mut frames = 0;
        while !hud.is_idle() {
            hud.tick();
            frames += 1;
            if hud.ttl >= 45 {
                assert_eq!(hud.alpha, 1.0);
            }
            assert!(hud.alpha <= last);
            last = hud.alpha;
        }
        assert_eq!(frames, 150);
        assert_eq!(hud.alpha, 0.0);

        hud.tick();
        assert_eq!(hud.alpha, 0.0);
        assert!(hud.is_idle());
    }

    #[test]
    fn reannounce_restarts_countdown() {
        let mut hud = HudState::new(150, 45);
        hud.announce(Scene::Dna);
        for _ in 0..140 {
            hud.tick();
        }
        assert!(hud.alpha < 1.0);
        hud.announce(Scene::Wormhole);
        assert_eq!((hud.label.as_str(), hud.alpha, hud.ttl), ("WORMHOLE", 1.0, 150));
    }

    #[test]
    fn brackets_draw_even_when_idle() {
        let hud = HudState::new(150, 45);
        let mut out = Batch2d::default();
        hud.draw(&mut out, None, 1.0, 800.0, 600.0);
        // four corners, two arms each, six vertices per arm
        assert_eq!(out.colored.len(), 4 * 2 * 6);
        assert!(out.colored.iter().all(|v| v.color[3] == 0.25));
        for v in &out.colored {
            assert!((0.0..=800.0).contains(&v.position[0]));
            assert!((0.0..=600.0).contains(&v.position[1]));
        }
    }

    #[test]
    fn scan_band_follows_alpha() {
        let mut hud = HudState::new(150, 45);
        hud.announce(Scene::Circuit);
        let mut out = Batch2d::default();
        hud.draw(&mut out, None, 3.0, 800.0, 600.0);
        assert_eq!(out.colored.len(), 6 + 4 * 2 * 6);
        // Halfway through the sweep period the band sits mid-screen.
        assert_eq!(out.colored[0].position[1], 300.0);
        assert!(out.glyphs.is_empty());
    }
}
