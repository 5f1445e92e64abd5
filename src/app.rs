use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::AppConfig;
use crate::engine::Engine;
use crate::input::Input;
use crate::render_loop::RenderLoop;
use crate::renderer::Renderer;
use crate::scroll::PageLayout;

/// Open a window and run the scroll-driven backdrop until it is closed.
///
/// If the GPU cannot be brought up the window stays open but nothing is
/// drawn and no frames are scheduled.
pub fn run(config: AppConfig) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ScrollscapeApp::Pending { config };
    event_loop.run_app(&mut app)
}

enum ScrollscapeApp {
    Pending {
        config: AppConfig,
    },
    Running {
        window: Arc<Window>,
        render_loop: RenderLoop<Renderer>,
        input: Input,
        last_frame: Instant,
    },
    Closed,
}

impl ScrollscapeApp {
    fn start(config: &AppConfig, event_loop: &ActiveEventLoop) -> Option<Self> {
        let attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                return None;
            }
        };

        let size = window.inner_size();
        let engine = Engine::new(
            config.engine.clone(),
            PageLayout::new(config.sections.iter().map(|(n, h)| (n.as_str(), *h))),
            size.width as f32,
            size.height as f32,
        );

        let renderer = match Renderer::new(window.clone(), config.font.as_deref()) {
            Ok(renderer) => Some(renderer),
            Err(err) => {
                log::error!("rendering disabled: {err}");
                None
            }
        };
        let render_loop = RenderLoop::start(engine, renderer);
        if render_loop.is_running() {
            log::info!("scene engine running at {}x{}", size.width, size.height);
            window.request_redraw();
        }

        Some(Self::Running {
            window,
            render_loop,
            input: Input::new(),
            last_frame: Instant::now(),
        })
    }
}

impl ApplicationHandler for ScrollscapeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Self::Pending { config } = self {
            match Self::start(config, event_loop) {
                Some(running) => *self = running,
                None => {
                    *self = Self::Closed;
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Self::Running {
            window,
            render_loop,
            input,
            last_frame,
        } = self
        else {
            return;
        };

        if let Some(command) = input.handle_event(&event) {
            render_loop.apply(command);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                render_loop.resize(size.width, size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                render_loop.rescale(scale_factor);
            }
            WindowEvent::RedrawRequested => {
                if let Some(command) = input.take_scroll() {
                    render_loop.apply(command);
                }

                let now = Instant::now();
                let dt = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;

                if render_loop.tick(dt) {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
