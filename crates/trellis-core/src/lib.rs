//! # Trellis core
//!
//! Trellis is a retained-mode widget toolkit. Widgets are plain structs that
//! own their children, negotiate layout with their parent every frame, and
//! talk to the GPU only through a [`Renderer`] collaborator.
//!
//! This crate holds the pieces every widget needs:
//!
//! - pixel geometry ([`PixelSize`], [`PixelBBox`]) and the widget-local to
//!   device [`Transform`];
//! - the per-frame [`InputState`] snapshot built from host [`InputEvent`]s;
//! - the [`Widget`] trait and the [`InputResponse`] that bubbles out of input
//!   routing;
//! - the render API ([`RenderContext`], scoped [`ClipGuard`], recording
//!   [`Scene`]);
//! - the text measurement interface ([`TextShaper`]);
//! - the [`UiError`] type returned from `update`.
//!
//! Containers, overlays and the frame driver live in `trellis-ui` and
//! `trellis-platform`.

pub mod adapters;
pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render_api;
pub mod style;
pub mod text;
pub mod widget;

pub use adapters::*;
pub use color::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use render_api::*;
pub use style::*;
pub use text::*;
pub use widget::*;
