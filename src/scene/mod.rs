//! The six procedural scenes and the morph between them.
//!
//! # Overview
//!
//! A [`Scene`] is a fixed procedural mode tied to a page section. Its geometry
//! is regenerated from scratch every frame by [`generate`], a pure function of
//! elapsed time returning a [`GeometryBatch`] of point sprites and line
//! segments. Nothing persists between frames.
//!
//! The [`MorphController`] decides which scene is drawn. While a transition is
//! in flight, the outgoing scene is drawn until the halfway mark and the
//! incoming one after it; only the background and camera blend continuously.
//!
//! # Example
//!
//! ```
//! use scrollscape::scene::{generate, MorphController, Scene};
//!
//! let mut morph = MorphController::default();
//! morph.request(Scene::Brain);
//! morph.advance(1.0 / 60.0);
//!
//! let batch = generate(morph.state().drawn_scene(), 1.5);
//! assert!(batch.point_count() > 0);
//! ```

mod batch;
mod generators;
pub mod scene;
mod transition;

pub use batch::{GeometryBatch, LineVertex, PointVertex};
pub use generators::generate;
pub use scene::{SECTION_ORDER, Scene};
pub use transition::{Easing, MorphController, MorphEvent, MorphPhase, MorphState, MorphTiming};
