//! # Scrollscape
//!
//! A scroll-driven procedural 3D backdrop. A virtual page of named sections
//! scrolls in front of six generated scenes (a DNA helix, a neural net, a
//! circuit board, orbiting cards, a constellation and a wormhole); whichever
//! section sits under the middle of the viewport picks the scene, and the
//! backdrop morphs to it.
//!
//! Every frame is rebuilt from scratch: [`scene::generate`] turns a scene
//! and a time into a batch of point sprites and line segments, and
//! [`Engine`] decides which scene, camera and background colour to draw.
//! The engine never touches the GPU, so everything up to the final draw can
//! be exercised headless:
//!
//! ```
//! use scrollscape::{Engine, EngineConfig, PageLayout, Scene};
//!
//! let mut engine = Engine::new(EngineConfig::default(), PageLayout::portfolio(), 1280.0, 800.0);
//! engine.scroll_to(500.0);
//! let frame = engine.advance(1.0 / 60.0);
//!
//! assert_eq!(frame.morph.target, Scene::Brain);
//! assert_eq!(frame.hud.label, "NEURAL NET");
//! ```
//!
//! [`run`] opens a window and drives the engine with wgpu.

mod app;
mod camera;
mod config;
mod draw2d;
mod engine;
mod error;
mod font;
mod gpu;
mod hud;
mod input;
pub mod math;
mod render_loop;
mod renderer;
pub mod scene;
mod scene_pass;
pub mod scroll;

pub use app::run;
pub use camera::CameraState;
pub use config::{AppConfig, EngineConfig};
pub use draw2d::{Batch2d, Color};
pub use engine::{Engine, Frame, FrameContext};
pub use error::EngineError;
pub use font::{FontAtlas, GlyphTable};
pub use gpu::GpuContext;
pub use hud::HudState;
pub use input::{Input, PageCommand};
pub use render_loop::{FrameSink, RenderLoop};
pub use renderer::Renderer;
pub use scene::{Easing, GeometryBatch, MorphController, MorphPhase, MorphState, MorphTiming, Scene};
pub use scroll::{PageLayout, ScrollMapper, ScrollState};

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec3};
