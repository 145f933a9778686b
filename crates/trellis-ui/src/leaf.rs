//! Structural leaves: nothing, a solid rectangle, and a sized/padded box.

use trellis_core::*;

/// Takes no space and draws nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Null;

impl<A> Widget<A> for Null {
    fn size(&self) -> PixelSize {
        PixelSize::ZERO
    }

    fn render(&self, _ctx: &mut RenderContext<'_>, _bounds: PixelBBox, _window: PixelBBox) {}

    fn debug_name(&self) -> Option<&str> {
        Some("null")
    }
}

/// Solid (optionally rounded or textured) rectangle.
///
/// Without a fixed size it takes everything it is offered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRect {
    pub params: DrawParams,
    fixed: Option<PixelSize>,
    size: PixelSize,
}

impl ColorRect {
    pub fn new(color: Color) -> Self {
        Self {
            params: DrawParams::solid(color),
            fixed: None,
            size: PixelSize::ZERO,
        }
    }

    pub fn fixed(color: Color, size: PixelSize) -> Self {
        Self {
            fixed: Some(size),
            size,
            ..Self::new(color)
        }
    }

    pub fn with_params(mut self, params: DrawParams) -> Self {
        self.params = params;
        self
    }
}

impl<A> Widget<A> for ColorRect {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, _dt: f32) -> Result<()> {
        self.size = self.fixed.unwrap_or(available);
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        if self.params.color.3 == 0 && self.params.texture.is_none() {
            return;
        }
        ctx.fill(widget_bounds, window_bounds, &self.params);
    }

    fn debug_name(&self) -> Option<&str> {
        Some("rect")
    }
}

/// Pins a child to a fixed width and/or height and adds uniform padding.
///
/// Unset dimensions follow the child. The child is centered in the box.
pub struct SizedBox<A> {
    child: Option<BoxedWidget<A>>,
    width: Option<u32>,
    height: Option<u32>,
    padding: u32,
    size: PixelSize,
}

impl<A> Default for SizedBox<A> {
    fn default() -> Self {
        Self {
            child: None,
            width: None,
            height: None,
            padding: 0,
            size: PixelSize::ZERO,
        }
    }
}

impl<A> SizedBox<A> {
    /// An empty box, useful as a fixed-size spacer.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(child: impl Widget<A> + 'static) -> Self {
        Self {
            child: Some(Box::new(child)),
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    fn child_bounds(padding: u32, bounds: PixelBBox, child_size: PixelSize) -> PixelBBox {
        let p = padding.min(i32::MAX as u32) as i32;
        let inner = PixelBBox::new(
            bounds.left.saturating_add(p),
            bounds.right.saturating_sub(p),
            bounds.top.saturating_add(p),
            bounds.bottom.saturating_sub(p),
        );
        inner.centered(child_size)
    }
}

impl<A> Widget<A> for SizedBox<A> {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        let pad = self.padding.saturating_mul(2);
        let outer = PixelSize::new(
            self.width.unwrap_or(available.width).min(available.width),
            self.height.unwrap_or(available.height).min(available.height),
        );
        let inner_avail = PixelSize::new(
            outer.width.saturating_sub(pad),
            outer.height.saturating_sub(pad),
        );
        let child_size = match &mut self.child {
            Some(child) => {
                child.update(inner_avail, dt)?;
                child.size()
            }
            None => PixelSize::ZERO,
        };
        self.size = PixelSize::new(
            self.width
                .unwrap_or_else(|| child_size.width.saturating_add(pad)),
            self.height
                .unwrap_or_else(|| child_size.height.saturating_add(pad)),
        );
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        if let Some(child) = &self.child {
            let b = Self::child_bounds(self.padding, widget_bounds, child.size());
            child.render(ctx, b, window_bounds);
        }
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        let Some(child) = &mut self.child else {
            return InputResponse::default();
        };
        let b = Self::child_bounds(self.padding, widget_bounds, child.size());
        let child_input = child.input_region(b).intersect(&input_bounds);
        child.set_input_state(b, child_input, input)
    }

    fn set_focused(&mut self, focused: bool) {
        if let Some(child) = &mut self.child {
            child.set_focused(focused);
        }
    }

    fn reset(&mut self) {
        if let Some(child) = &mut self.child {
            child.reset();
        }
    }

    fn debug_name(&self) -> Option<&str> {
        Some("box")
    }
}
