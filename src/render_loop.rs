use crate::engine::{Engine, Frame};
use crate::error::EngineError;
use crate::hud::HudState;
use crate::input::PageCommand;

/// Something that can put a [`Frame`] on screen.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame) -> Result<(), EngineError>;

    /// The drawing surface changed size.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Called after a recoverable present error, before the next frame.
    fn recover(&mut self) {}

    /// The display scale factor changed, e.g. the window moved to another monitor.
    fn rescale(&mut self, _scale_factor: f64) {}
}

struct Running<S> {
    engine: Engine,
    sink: S,
}

/// Drives the engine one frame at a time and hands each frame to a sink.
///
/// Started without a sink the loop is inert: it never asks for another
/// frame, holds no HUD state and ignores page input.
pub struct RenderLoop<S> {
    running: Option<Running<S>>,
}

impl<S: FrameSink> RenderLoop<S> {
    pub fn start(engine: Engine, sink: Option<S>) -> Self {
        let running = match sink {
            Some(sink) => Some(Running { engine, sink }),
            None => {
                log::warn!("no drawing context; scene engine disabled");
                None
            }
        };
        Self { running }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.running.as_ref().map(|r| &r.engine)
    }

    pub fn sink(&self) -> Option<&S> {
        self.running.as_ref().map(|r| &r.sink)
    }

    pub fn hud(&self) -> Option<&HudState> {
        self.engine().map(Engine::hud)
    }

    pub fn apply(&mut self, command: PageCommand) {
        if let Some(running) = &mut self.running {
            running.engine.apply(command);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(running) = &mut self.running {
            running.engine.resize(width as f32, height as f32);
            running.sink.resize(width, height);
        }
    }

    pub fn rescale(&mut self, scale_factor: f64) {
        if let Some(running) = &mut self.running {
            running.sink.rescale(scale_factor);
        }
    }

    /// Advance and present one frame.
    ///
    /// Returns whether another frame should be scheduled. A fatal sink error
    /// stops the loop for good.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(running) = &mut self.running else {
            return false;
        };

        let frame = running.engine.advance(dt);
        match running.sink.present(&frame) {
            Ok(()) => true,
            Err(err) if err.is_recoverable() => {
                log::warn!("frame {} dropped: {err}", frame.frame);
                running.sink.recover();
                true
            }
            Err(err) => {
                log::error!("rendering disabled: {err}");
                self.running = None;
                false
            }
        }
    }
}
