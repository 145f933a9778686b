//! # The widget contract
//!
//! Every element of the tree implements [`Widget`]. A frame drives three
//! phases, always in this order and always top-down:
//!
//! 1. `update(available, dt)`: the parent offers a size, the widget lays
//!    itself out and afterwards reports what it actually used via `size()`.
//! 2. `set_input_state(widget_bounds, input_bounds, input)`: hit testing and
//!    interaction. The returned [`InputResponse`] bubbles back up.
//! 3. `render(ctx, widget_bounds, window_bounds)`: draw calls.
//!
//! `size()` must stay stable between two `update` calls; containers read it
//! several times while placing siblings.
//!
//! `A` is the application's action payload. The toolkit never inspects it; it
//! only carries it from the widget that produced it to the host.

use crate::{InputState, PixelBBox, PixelSize, RenderContext, Result};

/// Pointer shape hint returned alongside input responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
    Text,
    Grab,
    Grabbing,
    ResizeVertical,
}

/// Result of one `set_input_state` call.
#[derive(Clone, Debug, PartialEq)]
pub struct InputResponse<A> {
    pub wants_focus: bool,
    pub action: Option<A>,
    pub cursor: Option<CursorStyle>,
}

impl<A> Default for InputResponse<A> {
    fn default() -> Self {
        Self {
            wants_focus: false,
            action: None,
            cursor: None,
        }
    }
}

impl<A> InputResponse<A> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(action: A) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn focus() -> Self {
        Self {
            wants_focus: true,
            ..Self::default()
        }
    }

    pub fn with_cursor(mut self, cursor: CursorStyle) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Folds a child's response into this one.
    ///
    /// Focus requests are OR'd; `action` and `cursor` are replaced by the
    /// child's when it has one, so the last responder in traversal order wins.
    pub fn merge(&mut self, child: InputResponse<A>) {
        self.wants_focus |= child.wants_focus;
        if child.action.is_some() {
            self.action = child.action;
        }
        if child.cursor.is_some() {
            self.cursor = child.cursor;
        }
    }
}

pub trait Widget<A> {
    /// Size consumed during the last `update`.
    fn size(&self) -> PixelSize;

    fn update(&mut self, _available: PixelSize, _dt: f32) -> Result<()> {
        Ok(())
    }

    /// Issues draw calls. Infallible; renderers log their own failures.
    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox);

    /// `input_bounds` is `widget_bounds` clipped by every ancestor.
    fn set_input_state(
        &mut self,
        _widget_bounds: PixelBBox,
        _input_bounds: PixelBBox,
        _input: &InputState,
    ) -> InputResponse<A> {
        InputResponse::default()
    }

    fn set_focused(&mut self, _focused: bool) {}

    /// Drops transient interaction state (hover, press, drag).
    fn reset(&mut self) {}

    /// The part of `widget_bounds` that can take pointer input.
    ///
    /// Floating layers cover the whole window but only own the area of what
    /// they currently show; they override this so that the rest of the window
    /// stays reachable underneath them.
    fn input_region(&self, widget_bounds: PixelBBox) -> PixelBBox {
        widget_bounds
    }

    fn debug_name(&self) -> Option<&str> {
        None
    }
}

pub type BoxedWidget<A> = Box<dyn Widget<A>>;

impl<A, W: Widget<A> + ?Sized> Widget<A> for Box<W> {
    fn size(&self) -> PixelSize {
        (**self).size()
    }
    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        (**self).update(available, dt)
    }
    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        (**self).render(ctx, widget_bounds, window_bounds)
    }
    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        (**self).set_input_state(widget_bounds, input_bounds, input)
    }
    fn set_focused(&mut self, focused: bool) {
        (**self).set_focused(focused)
    }
    fn reset(&mut self) {
        (**self).reset()
    }
    fn input_region(&self, widget_bounds: PixelBBox) -> PixelBBox {
        (**self).input_region(widget_bounds)
    }
    fn debug_name(&self) -> Option<&str> {
        (**self).debug_name()
    }
}
