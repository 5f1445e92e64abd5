//! Scene morphs: easing curves and the transition state machine.

use super::scene::Scene;

/// Easing functions for smooth transitions.
///
/// These control the acceleration curve of the morph blend factor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed throughout.
    Linear,
    /// Start slow, accelerate.
    EaseIn,
    /// Start fast, decelerate.
    EaseOut,
    /// Start slow, speed up, then slow down.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a linear progress value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

const SNAP_EPSILON: f32 = 1e-4;

/// How fast morph progress advances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MorphTiming {
    /// Fixed increment per rendered frame, whatever the frame took.
    PerFrame(f32),
    /// Increment per second, scaled by the frame's delta time.
    PerSecond(f32),
}

impl Default for MorphTiming {
    fn default() -> Self {
        Self::PerFrame(0.02)
    }
}

impl MorphTiming {
    fn step(&self, dt: f32) -> f32 {
        match *self {
            MorphTiming::PerFrame(increment) => increment,
            MorphTiming::PerSecond(rate) => rate * dt.max(0.0),
        }
    }
}

/// Whether a morph is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphPhase {
    Stable,
    Transitioning,
}

/// Snapshot of the morph: where we are coming from, going to, and how far along.
///
/// `progress` only ever grows within a transition and is reset to zero when the
/// target changes. At `progress == 1` the transition is over and
/// `current == target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphState {
    pub current: Scene,
    pub target: Scene,
    pub progress: f32,
}

impl MorphState {
    /// A settled state showing `scene`.
    pub fn settled(scene: Scene) -> Self {
        Self {
            current: scene,
            target: scene,
            progress: 1.0,
        }
    }

    pub fn phase(&self) -> MorphPhase {
        if self.progress >= 1.0 {
            MorphPhase::Stable
        } else {
            MorphPhase::Transitioning
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase() == MorphPhase::Transitioning
    }

    /// The scene whose geometry is drawn this frame.
    ///
    /// Geometry hard-switches halfway through: the outgoing scene below 0.5,
    /// the incoming one from 0.5 on.
    pub fn drawn_scene(&self) -> Scene {
        if self.progress < 0.5 {
            self.current
        } else {
            self.target
        }
    }
}

/// Emitted by [`MorphController`] when the morph changes phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphEvent {
    /// A new target was accepted; the HUD announces `to`.
    Started { from: Scene, to: Scene },
    /// The transition reached the end; `scene` is now current.
    Completed { scene: Scene },
}

/// The two-state morph machine: `Stable` or `Transitioning`.
///
/// Only one transition is ever in flight. Requesting a new target mid-way
/// abandons the partial blend and restarts from zero.
#[derive(Clone, Debug)]
pub struct MorphController {
    state: MorphState,
    timing: MorphTiming,
    easing: Easing,
}

impl MorphController {
    pub fn new(initial: Scene, timing: MorphTiming, easing: Easing) -> Self {
        Self {
            state: MorphState::settled(initial),
            timing,
            easing,
        }
    }

    /// Read-only copy of the current state.
    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn target(&self) -> Scene {
        self.state.target
    }

    /// Eased blend factor in `[0, 1]` for the in-flight transition.
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.state.progress)
    }

    /// Ask for `scene` to become the target.
    ///
    /// A request for the scene that is already the target changes nothing.
    /// Requesting the current scene mid-transition settles on it at once, since
    /// there is nothing left to morph towards.
    pub fn request(&mut self, scene: Scene) -> Option<MorphEvent> {
        if scene == self.state.target {
            return None;
        }

        let from = self.state.current;
        self.state.target = scene;
        self.state.progress = if scene == from { 1.0 } else { 0.0 };

        log::debug!("morph retargeted: {from} -> {scene}");
        Some(MorphEvent::Started { from, to: scene })
    }

    /// Advance the in-flight transition by one frame.
    pub fn advance(&mut self, dt: f32) -> Option<MorphEvent> {
        if !self.state.is_transitioning() {
            return None;
        }

        let progress = self.state.progress + self.timing.step(dt);
        // Snap so accumulated float error cannot add a stray extra frame.
        self.state.progress = if progress >= 1.0 - SNAP_EPSILON {
            1.0
        } else {
            progress
        };
        if self.state.progress >= 1.0 {
            self.state.current = self.state.target;
            log::debug!("morph settled on {}", self.state.current);
            return Some(MorphEvent::Completed {
                scene: self.state.current,
            });
        }

        None
    }
}

impl Default for MorphController {
    fn default() -> Self {
        Self::new(Scene::default(), MorphTiming::default(), Easing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_invariants(state: MorphState) {
        assert!((0.0..=1.0).contains(&state.progress));
        if state.current == state.target {
            assert_eq!(state.phase(), MorphPhase::Stable);
        }
        if state.phase() == MorphPhase::Stable {
            assert_eq!(state.current, state.target);
        }
    }

    #[test]
    fn easing_curves_hit_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
            assert_eq!(easing.apply(-3.0), 0.0);
        }
        assert!(Easing::EaseIn.apply(0.3) < 0.3);
        assert!(Easing::EaseOut.apply(0.3) > 0.3);
    }

    #[test]
    fn starts_stable() {
        let morph = MorphController::default();
        assert_eq!(morph.state(), MorphState::settled(Scene::Dna));
        check_invariants(morph.state());
    }

    #[test]
    fn transition_runs_to_completion() {
        let mut morph = MorphController::default();
        assert_eq!(
            morph.request(Scene::Brain),
            Some(MorphEvent::Started {
                from: Scene::Dna,
                to: Scene::Brain
            })
        );
        assert_eq!(morph.state().progress, 0.0);

        let mut last = 0.0;
        let mut frames = 0;
        loop {
            let event = morph.advance(1.0 / 60.0);
            frames += 1;
            let state = morph.state();
            check_invariants(state);
            assert!(state.progress >= last);
            last = state.progress;
            if let Some(event) = event {
                assert_eq!(event, MorphEvent::Completed { scene: Scene::Brain });
                break;
            }
            assert!(frames < 1000);
        }
        assert_eq!(frames, 50);
        assert_eq!(morph.state(), MorphState::settled(Scene::Brain));
        assert_eq!(morph.advance(1.0 / 60.0), None);
    }

    #[test]
    fn same_target_is_ignored() {
        let mut morph = MorphController::default();
        assert_eq!(morph.request(Scene::Dna), None);
        morph.request(Scene::Circuit);
        morph.advance(0.0);
        let before = morph.state();
        assert_eq!(morph.request(Scene::Circuit), None);
        assert_eq!(morph.state(), before);
    }

    #[test]
    fn retarget_mid_transition_restarts_progress() {
        let mut morph = MorphController::default();
        morph.request(Scene::Brain);
        for _ in 0..30 {
            morph.advance(0.016);
        }
        assert!(morph.state().progress > 0.5);

        morph.request(Scene::Orbit);
        let state = morph.state();
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.target, Scene::Orbit);
        assert_eq!(state.current, Scene::Dna);
        check_invariants(state);
    }

    #[test]
    fn retarget_back_to_current_settles() {
        let mut morph = MorphController::default();
        morph.request(Scene::Wormhole);
        morph.advance(0.016);
        let event = morph.request(Scene::Dna);
        assert_eq!(
            event,
            Some(MorphEvent::Started {
                from: Scene::Dna,
                to: Scene::Dna
            })
        );
        assert_eq!(morph.state(), MorphState::settled(Scene::Dna));
    }

    #[test]
    fn invariants_hold_for_arbitrary_request_sequences() {
        let mut morph = MorphController::default();
        let mut seed = 7u32;
        for _ in 0..2000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if seed % 7 == 0 {
                let scene = Scene::ALL[(seed / 7) as usize % Scene::ALL.len()];
                morph.request(scene);
            } else {
                morph.advance(0.016);
            }
            check_invariants(morph.state());
        }
    }

    #[test]
    fn drawn_scene_switches_at_midpoint() {
        let state = MorphState {
            current: Scene::Dna,
            target: Scene::Brain,
            progress: 0.49,
        };
        assert_eq!(state.drawn_scene(), Scene::Dna);
        let state = MorphState {
            progress: 0.51,
            ..state
        };
        assert_eq!(state.drawn_scene(), Scene::Brain);
    }

    #[test]
    fn per_second_timing_scales_with_delta() {
        let mut morph =
            MorphController::new(Scene::Dna, MorphTiming::PerSecond(2.0), Easing::Linear);
        morph.request(Scene::Brain);
        morph.advance(0.25);
        assert!((morph.state().progress - 0.5).abs() < 1e-6);
        assert!((morph.eased() - 0.5).abs() < 1e-6);
        morph.advance(0.25);
        assert_eq!(morph.state(), MorphState::settled(Scene::Brain));
    }
}
