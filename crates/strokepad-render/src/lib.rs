//! StrokePad Render Library
//!
//! Canvas painter for StrokePad scenes and a Vello backend for it.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, paint_scene};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
