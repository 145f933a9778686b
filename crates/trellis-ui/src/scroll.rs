//! # Scroll view
//!
//! Clips one inner widget to a viewport and scrolls it vertically.
//!
//! Whether a scrollbar is needed depends on the content height, and the
//! content height can depend on the width the scrollbar takes away. Layout
//! therefore runs optimistically without a scrollbar and, if the content
//! turns out to overflow, runs exactly once more with the scrollbar's width
//! taken off. The second pass is self-consistent: narrowing never makes
//! content shorter than the viewport it already overflowed.
//!
//! The inner widget is offered the viewport height as an advisory height;
//! it may report more, which is what makes it scroll.
//!
//! Wheel input scrolls while the pointer is over the viewport. Nested scroll
//! views each apply the wheel delta independently. Dragging the scrollbar
//! handle sets the offset directly and suppresses the wheel for that frame.

use trellis_core::*;

use crate::scrollbar::Scrollbar;

pub struct ScrollView<A> {
    inner: BoxedWidget<A>,
    scrollbar: Scrollbar,
    scroll_offs: f32,
    show_bar: bool,
    viewport: PixelSize,
    size: PixelSize,
    on_scroll: Option<Box<dyn Generator<f32, A>>>,
}

impl<A> ScrollView<A> {
    pub fn new(inner: impl Widget<A> + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            scrollbar: Scrollbar::new(Theme::default().scrollbar),
            scroll_offs: 0.0,
            show_bar: false,
            viewport: PixelSize::ZERO,
            size: PixelSize::ZERO,
            on_scroll: None,
        }
    }

    /// Emits an action carrying the new offset whenever input moves it.
    ///
    /// An action from the inner widget in the same frame takes precedence.
    pub fn with_on_scroll(mut self, on_scroll: impl Generator<f32, A> + 'static) -> Self {
        self.on_scroll = Some(Box::new(on_scroll));
        self
    }

    pub fn with_style(mut self, style: ScrollbarStyle) -> Self {
        self.scrollbar = Scrollbar::new(style);
        self
    }

    pub fn with_theme(self, theme: &Theme) -> Self {
        self.with_style(theme.scrollbar)
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offs
    }

    /// Takes effect immediately, clamped to the last known content height.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offs = offset.clamp(0.0, self.max_offset());
        self.sync_scrollbar();
    }

    pub fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    pub fn has_scrollbar(&self) -> bool {
        self.show_bar
    }

    pub fn content_size(&self) -> PixelSize {
        self.inner.size()
    }

    pub fn viewport_size(&self) -> PixelSize {
        self.viewport
    }

    pub fn viewport_bounds(&self, widget_bounds: PixelBBox) -> PixelBBox {
        PixelBBox::at(widget_bounds.origin(), self.viewport)
    }

    /// Where the inner widget sits once the scroll offset is applied.
    pub fn content_bounds(&self, widget_bounds: PixelBBox) -> PixelBBox {
        let origin = widget_bounds.origin();
        let dy = self.scroll_offs.round() as i32;
        PixelBBox::at(
            PixelPoint::new(origin.x, origin.y.saturating_sub(dy)),
            self.inner.size(),
        )
    }

    pub fn track_bounds(&self, widget_bounds: PixelBBox) -> Option<PixelBBox> {
        if !self.show_bar {
            return None;
        }
        let origin = widget_bounds.origin();
        let x = origin
            .x
            .saturating_add(self.viewport.width.min(i32::MAX as u32) as i32);
        Some(PixelBBox::at(
            PixelPoint::new(x, origin.y),
            PixelSize::new(self.bar_width(self.size.width), self.viewport.height),
        ))
    }

    fn bar_width(&self, available_width: u32) -> u32 {
        self.scrollbar.style().width.min(available_width)
    }

    fn max_offset(&self) -> f32 {
        self.inner
            .size()
            .height
            .saturating_sub(self.viewport.height) as f32
    }

    fn sync_scrollbar(&mut self) {
        let content_h = self.inner.size().height;
        if content_h == 0 {
            self.scrollbar.handle_ratio = 1.0;
            self.scrollbar.top_ratio = 0.0;
            return;
        }
        let content_h = content_h as f32;
        self.scrollbar.handle_ratio = (self.viewport.height as f32 / content_h).min(1.0);
        self.scrollbar.top_ratio = self.scroll_offs / content_h;
    }

    fn layout_pass(&mut self, available: PixelSize, with_bar: bool, dt: f32) -> Result<u32> {
        let width = if with_bar {
            available.width - self.bar_width(available.width)
        } else {
            available.width
        };
        self.inner
            .update(PixelSize::new(width, available.height), dt)?;
        Ok(width)
    }
}

impl<A> Widget<A> for ScrollView<A> {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        let mut width = self.layout_pass(available, false, dt)?;
        let with_bar = self.inner.size().height > available.height;
        if with_bar {
            log::debug!("scroll content overflows {available:?}, laying out again with a scrollbar");
            width = self.layout_pass(available, true, 0.0)?;
        }

        self.show_bar = with_bar;
        let content = self.inner.size();
        self.viewport = PixelSize::new(width, content.height.min(available.height));
        self.size = PixelSize::new(available.width, self.viewport.height);
        self.scroll_offs = self.scroll_offs.clamp(0.0, self.max_offset());
        self.sync_scrollbar();
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        let viewport = self.viewport_bounds(widget_bounds);
        let content = self.content_bounds(widget_bounds);
        {
            let mut clipped = ctx.push_clip(content.intersect(&viewport));
            self.inner.render(&mut clipped, content, window_bounds);
        }
        if let Some(track) = self.track_bounds(widget_bounds) {
            self.scrollbar.render(ctx, track, window_bounds);
        }
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        let before = self.scroll_offs;
        if let Some(track) = self.track_bounds(widget_bounds) {
            let track_input = track.intersect(&input_bounds);
            if self.scrollbar.is_dragging() || input.is_consumed_by(&track_input) {
                if let Some(ratio) = self.scrollbar.handle_input(input, track) {
                    let content_h = self.inner.size().height as f32;
                    self.set_scroll_offset(ratio * content_h);
                }
            } else {
                self.scrollbar.reset();
            }
        }

        let view_input = self.viewport_bounds(widget_bounds).intersect(&input_bounds);
        if !self.scrollbar.is_dragging()
            && input.scroll != 0.0
            && view_input.contains(input.mouse_pos)
        {
            self.set_scroll_offset(self.scroll_offs + input.scroll);
        }

        let content = self.content_bounds(widget_bounds);
        let child_input = self.inner.input_region(content).intersect(&view_input);
        let mut response = self.inner.set_input_state(content, child_input, input);
        if let Some(cursor) = self.scrollbar.cursor() {
            response.cursor = Some(cursor);
        }
        if self.scroll_offs != before
            && response.action.is_none()
            && let Some(on_scroll) = &self.on_scroll
        {
            response.action = Some(on_scroll.generate(self.scroll_offs));
        }
        response
    }

    fn set_focused(&mut self, focused: bool) {
        self.inner.set_focused(focused);
    }

    fn reset(&mut self) {
        self.scrollbar.reset();
        self.inner.reset();
    }

    fn debug_name(&self) -> Option<&str> {
        Some("scroll_view")
    }
}
