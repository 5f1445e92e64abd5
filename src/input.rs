use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels scrolled per wheel line or arrow key press.
pub const LINE_HEIGHT: f32 = 40.0;

/// What a key or wheel event asks the page to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageCommand {
    /// Scroll by a signed number of pixels; positive moves down the page.
    ScrollBy(f32),
    /// Scroll by a signed number of viewport heights.
    ScrollPages(f32),
    Top,
    Bottom,
    /// Smooth-scroll to the section at this index.
    JumpTo(usize),
}

/// Key bindings of the page.
pub fn command_for_key(key: KeyCode) -> Option<PageCommand> {
    let command = match key {
        KeyCode::ArrowDown => PageCommand::ScrollBy(LINE_HEIGHT),
        KeyCode::ArrowUp => PageCommand::ScrollBy(-LINE_HEIGHT),
        KeyCode::PageDown | KeyCode::Space => PageCommand::ScrollPages(1.0),
        KeyCode::PageUp => PageCommand::ScrollPages(-1.0),
        KeyCode::Home => PageCommand::Top,
        KeyCode::End => PageCommand::Bottom,
        KeyCode::Digit1 => PageCommand::JumpTo(0),
        KeyCode::Digit2 => PageCommand::JumpTo(1),
        KeyCode::Digit3 => PageCommand::JumpTo(2),
        KeyCode::Digit4 => PageCommand::JumpTo(3),
        KeyCode::Digit5 => PageCommand::JumpTo(4),
        KeyCode::Digit6 => PageCommand::JumpTo(5),
        _ => return None,
    };
    Some(command)
}

/// Wheel movement in page pixels; positive scrolls down.
///
/// Winit reports wheel-up as positive, so the sign flips.
pub fn wheel_pixels(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    }
}

/// Translates window events into page commands.
///
/// Key repeats are honoured for scrolling keys, matching a browser page.
#[derive(Debug, Default)]
pub struct Input {
    pending_scroll: f32,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event. Wheel movement accumulates until [`take_scroll`](Self::take_scroll).
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<PageCommand> {
        match event {
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(key) => command_for_key(key),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.pending_scroll += wheel_pixels(*delta);
                None
            }
            _ => None,
        }
    }

    /// Wheel movement since the last call, as a single command.
    pub fn take_scroll(&mut self) -> Option<PageCommand> {
        let pixels = std::mem::take(&mut self.pending_scroll);
        (pixels != 0.0).then_some(PageCommand::ScrollBy(pixels))
    }
}
