use std::path::PathBuf;

use crate::scene::{Easing, MorphTiming, SECTION_ORDER, Scene};
use crate::scroll::SECTION_HEIGHTS;

/// Tunable constants of the scene engine.
///
/// The defaults are the values the backdrop is designed around; change them
/// for experiments, not for normal use.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Scene shown before the first scroll notification.
    pub initial_scene: Scene,
    /// How fast a morph progresses.
    pub morph_timing: MorphTiming,
    /// Curve applied to morph progress for the camera pull-back.
    pub morph_easing: Easing,
    /// Fraction of the gap to the target background closed per frame.
    pub background_smoothing: f32,
    /// Camera distance with the page scrolled to the top.
    pub camera_distance_top: f32,
    /// Camera distance with the page scrolled to the bottom.
    pub camera_distance_bottom: f32,
    /// Extra distance the camera backs off at the middle of a morph.
    pub transition_pull: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Frames a HUD announcement stays up.
    pub hud_ttl_frames: u32,
    /// Frames over which a HUD announcement fades out.
    pub hud_fade_frames: u32,
    /// Freeze idle camera rotation, bob and pitch sway.
    pub reduced_motion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_scene: Scene::Dna,
            morph_timing: MorphTiming::default(),
            morph_easing: Easing::EaseInOut,
            background_smoothing: 0.05,
            camera_distance_top: 9.0,
            camera_distance_bottom: 7.0,
            transition_pull: 0.8,
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            hud_ttl_frames: 150,
            hud_fade_frames: 45,
            reduced_motion: false,
        }
    }
}

/// Configuration for the app window and the page it hosts.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Page sections in document order, sized in viewport heights.
    pub sections: Vec<(String, f32)>,
    /// TTF/OTF font for the HUD label. `None` searches common system fonts.
    pub font: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Scrollscape".to_string(),
            width: 1280,
            height: 800,
            sections: SECTION_ORDER
                .iter()
                .zip(SECTION_HEIGHTS)
                .map(|(name, h)| (name.to_string(), h))
                .collect(),
            font: None,
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the page sections.
    pub fn sections<S: Into<String>>(mut self, sections: impl IntoIterator<Item = (S, f32)>) -> Self {
        self.sections = sections.into_iter().map(|(n, h)| (n.into(), h)).collect();
        self
    }

    pub fn font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font = Some(path.into());
        self
    }

    pub fn reduced_motion(mut self, reduced: bool) -> Self {
        self.engine.reduced_motion = reduced;
        self
    }

    pub fn morph_timing(mut self, timing: MorphTiming) -> Self {
        self.engine.morph_timing = timing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::PageLayout;

    #[test]
    fn default_page_has_every_scene_section() {
        let config = AppConfig::default();
        let names: Vec<_> = config.sections.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, SECTION_ORDER);
    }

    #[test]
    fn default_page_matches_portfolio_layout() {
        let config = AppConfig::default();
        let mut page = PageLayout::new(config.sections.iter().map(|(n, h)| (n.as_str(), *h)));
        let mut portfolio = PageLayout::portfolio();
        page.layout(800.0);
        portfolio.layout(800.0);
        assert_eq!(page.sections(), portfolio.sections());
        assert_eq!(page.document_height(), 7.5 * 800.0);
    }

    #[test]
    fn builder_overrides() {
        let config = AppConfig::new()
            .title("Portfolio")
            .size(640, 480)
            .sections([("hero", 2.0)])
            .font("fonts/mono.ttf")
            .reduced_motion(true)
            .morph_timing(MorphTiming::PerSecond(1.2));

        assert_eq!(config.title, "Portfolio");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.sections, vec![("hero".to_string(), 2.0)]);
        assert_eq!(config.font, Some(PathBuf::from("fonts/mono.ttf")));
        assert!(config.engine.reduced_motion);
        assert_eq!(config.engine.morph_timing, MorphTiming::PerSecond(1.2));
    }
}
