//! # Stack
//!
//! Children overlap; later pushes draw on top. Each child carries its own
//! placement:
//!
//! - `Centered`: the child's center sits on the stack's center.
//! - `Offset { x, y }`: the child's top-left corner sits at the stack's
//!   top-left plus a fixed delta.
//! - `Fill`: the child is laid out last and offered the aggregate size of the
//!   other children, capped at the available size (or the whole available
//!   size if there are none), then spans the full stack bounds. Backgrounds and overlay layers use this.
//!
//! Input is routed topmost first. Routing stops at the first child that
//! claims focus or whose input region holds the pointer or the mouse-down
//! anchor, so a click on overlapping children reaches only the top one.

use trellis_core::*;

use crate::focus::{FocusTracker, Slot};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackLayout {
    #[default]
    Centered,
    Offset {
        x: i32,
        y: i32,
    },
    Fill,
}

struct StackItem<A> {
    widget: BoxedWidget<A>,
    layout: StackLayout,
}

impl<A> Slot<A> for StackItem<A> {
    fn widget_mut(&mut self) -> &mut dyn Widget<A> {
        &mut *self.widget
    }
}

impl<A> StackItem<A> {
    fn bounds(&self, stack_bounds: PixelBBox) -> PixelBBox {
        match self.layout {
            StackLayout::Centered => stack_bounds.centered(self.widget.size()),
            StackLayout::Offset { x, y } => {
                let origin = stack_bounds.origin();
                PixelBBox::at(
                    PixelPoint::new(origin.x.saturating_add(x), origin.y.saturating_add(y)),
                    self.widget.size(),
                )
            }
            StackLayout::Fill => stack_bounds,
        }
    }
}

pub struct Stack<A> {
    items: Vec<StackItem<A>>,
    size: PixelSize,
    focus: FocusTracker,
    name: Option<&'static str>,
}

impl<A> Default for Stack<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Stack<A> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            size: PixelSize::ZERO,
            focus: FocusTracker::default(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Adds a child on top of the existing ones and returns its index.
    pub fn push(&mut self, widget: impl Widget<A> + 'static, layout: StackLayout) -> usize {
        self.items.push(StackItem {
            widget: Box::new(widget),
            layout,
        });
        self.items.len() - 1
    }

    pub fn with(mut self, widget: impl Widget<A> + 'static, layout: StackLayout) -> Self {
        self.push(widget, layout);
        self
    }

    /// Removes and returns the child at `index`.
    pub fn remove(&mut self, index: usize) -> Option<BoxedWidget<A>> {
        if index >= self.items.len() {
            return None;
        }
        self.focus.removed(index);
        Some(self.items.remove(index).widget)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus.focused()
    }

    /// Bounds the child at `index` gets when the stack occupies `bounds`.
    pub fn child_bounds(&self, index: usize, bounds: PixelBBox) -> Option<PixelBBox> {
        self.items.get(index).map(|item| item.bounds(bounds))
    }
}

fn extent(layout: StackLayout, size: PixelSize) -> PixelSize {
    match layout {
        StackLayout::Offset { x, y } => PixelSize::new(
            size.width.saturating_add(x.max(0) as u32),
            size.height.saturating_add(y.max(0) as u32),
        ),
        _ => size,
    }
}

impl<A> Widget<A> for Stack<A> {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        let mut aggregate = PixelSize::ZERO;
        let mut sized_any = false;
        for item in self
            .items
            .iter_mut()
            .filter(|i| i.layout != StackLayout::Fill)
        {
            item.widget.update(available, dt)?;
            aggregate = aggregate.max(extent(item.layout, item.widget.size()));
            sized_any = true;
        }

        let fill_size = if sized_any {
            aggregate.min(available)
        } else {
            available
        };
        for item in self
            .items
            .iter_mut()
            .filter(|i| i.layout == StackLayout::Fill)
        {
            item.widget.update(fill_size, dt)?;
            aggregate = aggregate.max(item.widget.size());
        }

        self.size = aggregate;
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        for item in &self.items {
            item.widget
                .render(ctx, item.bounds(widget_bounds), window_bounds);
        }
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        let mut response = InputResponse::default();
        for index in (0..self.items.len()).rev() {
            let item = &mut self.items[index];
            let child_bounds = item.bounds(widget_bounds);
            let child_input = item
                .widget
                .input_region(child_bounds)
                .intersect(&input_bounds);
            let child_response = item
                .widget
                .set_input_state(child_bounds, child_input, input);
            let claims_focus = child_response.wants_focus;
            response.merge(child_response);

            if claims_focus {
                self.focus.claim(index, &mut self.items);
                break;
            }
            if input.is_consumed_by(&child_input) {
                break;
            }
        }
        response
    }

    fn set_focused(&mut self, focused: bool) {
        self.focus.forward(focused, &mut self.items);
    }

    fn reset(&mut self) {
        for item in &mut self.items {
            item.widget.reset();
        }
    }

    fn debug_name(&self) -> Option<&str> {
        self.name.or(Some("stack"))
    }
}
