//! # Rendering collaborator
//!
//! Widgets never talk to the GPU. They hand a widget-local to device
//! [`Transform`] plus draw parameters to a [`Renderer`] through a
//! [`RenderContext`], which also owns the current clip rectangle.
//!
//! Clipping is scoped: [`RenderContext::push_clip`] intersects the requested
//! rectangle with whatever is already active and returns a [`ClipGuard`] that
//! restores the previous rectangle when dropped, on every exit path.
//!
//! ```rust
//! use trellis_core::*;
//!
//! let mut scene = Scene::default();
//! let mut ctx = RenderContext::new(&mut scene);
//! {
//!     let clipped = ctx.push_clip(PixelBBox::new(0, 50, 0, 50));
//!     assert_eq!(clipped.clip(), Some(PixelBBox::new(0, 50, 0, 50)));
//! }
//! assert_eq!(ctx.clip(), None);
//! ```

use std::fmt::Write as _;
use std::ops::{Deref, DerefMut};

use crate::{Color, PixelBBox, Transform, widget_to_clip_transform};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawParams {
    pub color: Color,
    pub corner_radius: f32,
    pub texture: Option<TextureHandle>,
}

impl DrawParams {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            corner_radius: 0.0,
            texture: None,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextParams {
    pub color: Color,
    pub size_px: f32,
}

pub trait Renderer {
    fn draw_quad(&mut self, transform: &Transform, params: &DrawParams);
    fn draw_text(&mut self, transform: &Transform, text: &str, params: &TextParams);
    /// `None` disables scissoring.
    fn set_scissor(&mut self, rect: Option<PixelBBox>);
}

pub struct RenderContext<'r> {
    renderer: &'r mut dyn Renderer,
    clip: Option<PixelBBox>,
}

impl<'r> RenderContext<'r> {
    pub fn new(renderer: &'r mut dyn Renderer) -> Self {
        Self {
            renderer,
            clip: None,
        }
    }

    /// Currently active clip rectangle, if any.
    pub fn clip(&self) -> Option<PixelBBox> {
        self.clip
    }

    pub fn push_clip(&mut self, rect: PixelBBox) -> ClipGuard<'_, 'r> {
        let previous = self.clip;
        let next = match previous {
            Some(active) => active.intersect(&rect),
            None => rect,
        };
        self.clip = Some(next);
        self.renderer.set_scissor(Some(next));
        ClipGuard {
            ctx: self,
            previous,
        }
    }

    /// True when nothing inside `bounds` could survive the active clip.
    pub fn is_clipped_out(&self, bounds: &PixelBBox) -> bool {
        bounds.is_empty() || self.clip.is_some_and(|c| c.intersect(bounds).is_empty())
    }

    pub fn fill(&mut self, bounds: PixelBBox, window: PixelBBox, params: &DrawParams) {
        if self.is_clipped_out(&bounds) {
            return;
        }
        let transform = widget_to_clip_transform(bounds, window);
        self.renderer.draw_quad(&transform, params);
    }

    pub fn text(&mut self, bounds: PixelBBox, window: PixelBBox, text: &str, params: &TextParams) {
        if self.is_clipped_out(&bounds) {
            return;
        }
        let transform = widget_to_clip_transform(bounds, window);
        self.renderer.draw_text(&transform, text, params);
    }

    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }
}

/// Restores the previous clip rectangle on drop.
pub struct ClipGuard<'a, 'r> {
    ctx: &'a mut RenderContext<'r>,
    previous: Option<PixelBBox>,
}

impl<'r> Deref for ClipGuard<'_, 'r> {
    type Target = RenderContext<'r>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl<'r> DerefMut for ClipGuard<'_, 'r> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ClipGuard<'_, '_> {
    fn drop(&mut self) {
        self.ctx.clip = self.previous;
        self.ctx.renderer.set_scissor(self.previous);
    }
}

/// Recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Quad {
        transform: Transform,
        params: DrawParams,
    },
    Text {
        transform: Transform,
        text: String,
        params: TextParams,
    },
    Scissor(Option<PixelBBox>),
}

/// A renderer that only records what it was asked to draw.
///
/// Used by headless hosts and by tests.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn quads(&self) -> impl Iterator<Item = (&Transform, &DrawParams)> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Quad { transform, params } => Some((transform, params)),
            _ => None,
        })
    }

    /// Stable one-line-per-node text form.
    pub fn dump(&self) -> String {
        fn t(tr: &Transform) -> String {
            // + 0.0 folds -0.0 into 0.0
            format!(
                "sx={:.3} sy={:.3} tx={:.3} ty={:.3}",
                tr.scale_x + 0.0,
                tr.scale_y + 0.0,
                tr.translate_x + 0.0,
                tr.translate_y + 0.0
            )
        }
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                SceneNode::Quad { transform, params } => {
                    let _ = write!(out, "quad {} {}", t(transform), params.color);
                    if params.corner_radius > 0.0 {
                        let _ = write!(out, " r={}", params.corner_radius);
                    }
                    if let Some(tex) = params.texture {
                        let _ = write!(out, " tex={}", tex.0);
                    }
                }
                SceneNode::Text {
                    transform,
                    text,
                    params,
                } => {
                    let _ = write!(out, "text {:?} {} {}", text, t(transform), params.color);
                }
                SceneNode::Scissor(Some(r)) => {
                    let _ = write!(out, "scissor {},{} {}x{}", r.left, r.top, r.width(), r.height());
                }
                SceneNode::Scissor(None) => out.push_str("scissor off"),
            }
            out.push('\n');
        }
        out
    }
}

impl Renderer for Scene {
    fn draw_quad(&mut self, transform: &Transform, params: &DrawParams) {
        self.nodes.push(SceneNode::Quad {
            transform: *transform,
            params: *params,
        });
    }

    fn draw_text(&mut self, transform: &Transform, text: &str, params: &TextParams) {
        self.nodes.push(SceneNode::Text {
            transform: *transform,
            text: text.to_string(),
            params: *params,
        });
    }

    fn set_scissor(&mut self, rect: Option<PixelBBox>) {
        self.nodes.push(SceneNode::Scissor(rect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_clips_intersect_and_restore() {
        let mut scene = Scene::default();
        let mut ctx = RenderContext::new(&mut scene);
        {
            let mut outer = ctx.push_clip(PixelBBox::new(0, 100, 0, 100));
            {
                let inner = outer.push_clip(PixelBBox::new(50, 200, -10, 40));
                assert_eq!(inner.clip(), Some(PixelBBox::new(50, 100, 0, 40)));
            }
            assert_eq!(outer.clip(), Some(PixelBBox::new(0, 100, 0, 100)));
        }
        assert_eq!(ctx.clip(), None);
        drop(ctx);

        assert_eq!(
            scene.nodes,
            vec![
                SceneNode::Scissor(Some(PixelBBox::new(0, 100, 0, 100))),
                SceneNode::Scissor(Some(PixelBBox::new(50, 100, 0, 40))),
                SceneNode::Scissor(Some(PixelBBox::new(0, 100, 0, 100))),
                SceneNode::Scissor(None),
            ]
        );
    }

    #[test]
    fn guard_restores_on_early_return() {
        fn draw_until(ctx: &mut RenderContext<'_>, stop: bool) -> Option<()> {
            let clipped = ctx.push_clip(PixelBBox::new(0, 10, 0, 10));
            if stop {
                return None;
            }
            let _ = clipped.clip();
            Some(())
        }
        let mut scene = Scene::default();
        let mut ctx = RenderContext::new(&mut scene);
        assert!(draw_until(&mut ctx, true).is_none());
        assert_eq!(ctx.clip(), None);
    }

    #[test]
    fn fully_clipped_quads_are_culled() {
        let window = PixelBBox::new(0, 100, 0, 100);
        let mut scene = Scene::default();
        let mut ctx = RenderContext::new(&mut scene);
        {
            let mut clipped = ctx.push_clip(PixelBBox::new(0, 10, 0, 10));
            clipped.fill(
                PixelBBox::new(20, 30, 20, 30),
                window,
                &DrawParams::solid(Color::WHITE),
            );
            clipped.fill(
                PixelBBox::new(5, 15, 5, 15),
                window,
                &DrawParams::solid(Color::WHITE),
            );
        }
        drop(ctx);
        assert_eq!(scene.quads().count(), 1);
    }
}
