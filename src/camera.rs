use std::f32::consts::PI;

use glam::Mat4;

use crate::config::EngineConfig;
use crate::math::{lerp, multiply, perspective, rotation_x, rotation_y, translation};

/// Camera and model pose for one frame.
///
/// Nothing here is stored between frames: the pose is a function of elapsed
/// time, scroll fraction and the eased morph factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Distance from the origin along the view axis.
    pub distance: f32,
    /// Vertical camera offset.
    pub height: f32,
    /// Slow idle orbit of the camera around the Y axis, in radians.
    pub orbit: f32,
    /// Continuous model yaw, in radians.
    pub model_yaw: f32,
    /// Small model pitch sway, in radians.
    pub model_pitch: f32,
}

impl CameraState {
    /// Pose at `time` seconds with the page scrolled to `scroll_fraction`.
    ///
    /// `morph_eased` is the eased morph factor; the camera backs off briefly
    /// while a transition is half done.
    pub fn at(time: f32, scroll_fraction: f32, morph_eased: f32, config: &EngineConfig) -> Self {
        let scroll = if scroll_fraction.is_finite() {
            scroll_fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let pull = (PI * morph_eased.clamp(0.0, 1.0)).sin() * config.transition_pull;
        let distance =
            lerp(config.camera_distance_top, config.camera_distance_bottom, scroll) + pull;

        let (orbit, bob, pitch) = if config.reduced_motion {
            (0.0, 0.0, 0.0)
        } else {
            (
                time * 0.05,
                0.15 * (time * 0.5).sin(),
                0.15 * (time * 0.3).sin(),
            )
        };

        Self {
            distance,
            height: 0.4 - 0.8 * scroll + bob,
            orbit,
            model_yaw: time * 0.1,
            model_pitch: pitch,
        }
    }

    pub fn view(&self) -> Mat4 {
        multiply(
            translation(0.0, -self.height, -self.distance),
            rotation_y(self.orbit),
        )
    }

    pub fn model(&self) -> Mat4 {
        multiply(rotation_y(self.model_yaw), rotation_x(self.model_pitch))
    }

    pub fn projection(config: &EngineConfig, aspect: f32) -> Mat4 {
        perspective(config.fov_degrees.to_radians(), aspect, config.near, config.far)
    }

    /// `projection * view * model`.
    pub fn model_view_projection(&self, config: &EngineConfig, aspect: f32) -> Mat4 {
        multiply(
            Self::projection(config, aspect),
            multiply(self.view(), self.model()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn distance_contracts_with_scroll() {
        let config = EngineConfig::default();
        let top = CameraState::at(0.0, 0.0, 1.0, &config);
        let bottom = CameraState::at(0.0, 1.0, 1.0, &config);
        assert!((top.distance - 9.0).abs() < 1e-4);
        assert!((bottom.distance - 7.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_scroll_is_clamped() {
        let config = EngineConfig::default();
        let nan = CameraState::at(1.0, f32::NAN, 1.0, &config);
        let zero = CameraState::at(1.0, 0.0, 1.0, &config);
        assert_eq!(nan, zero);
        let beyond = CameraState::at(1.0, 3.0, 1.0, &config);
        assert_eq!(beyond, CameraState::at(1.0, 1.0, 1.0, &config));
    }

    #[test]
    fn camera_backs_off_mid_morph() {
        let config = EngineConfig::default();
        let settled = CameraState::at(0.0, 0.0, 1.0, &config);
        let halfway = CameraState::at(0.0, 0.0, 0.5, &config);
        assert!((halfway.distance - settled.distance - config.transition_pull).abs() < 1e-4);
    }

    #[test]
    fn reduced_motion_freezes_idle_motion() {
        let config = EngineConfig {
            reduced_motion: true,
            ..EngineConfig::default()
        };
        let a = CameraState::at(1.0, 0.3, 1.0, &config);
        let b = CameraState::at(9.0, 0.3, 1.0, &config);
        assert_eq!(a.orbit, b.orbit);
        assert_eq!(a.height, b.height);
        assert_eq!(a.model_pitch, 0.0);
        assert_ne!(a.model_yaw, b.model_yaw);
    }

    #[test]
    fn origin_lands_in_front_of_camera() {
        let config = EngineConfig::default();
        let mvp = CameraState::at(2.0, 0.5, 1.0, &config).model_view_projection(&config, 16.0 / 9.0);
        let clip = mvp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }
}
