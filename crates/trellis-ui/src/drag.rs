//! Drag layer: draws a widget owned elsewhere under the pointer.
//!
//! The dragged widget stays in its original parent. The layer only holds a
//! [`WidgetRef`], never updates or resets it, and shows nothing once the
//! owner has dropped it. It never takes input either: its input region is
//! always empty, so drops land on whatever is underneath.

use trellis_core::*;

use crate::shared::WidgetRef;

pub struct DragLayer<A> {
    dragged: Option<WidgetRef<A>>,
    grab_offset: PixelPoint,
    pointer: PixelPoint,
    size: PixelSize,
}

impl<A> Default for DragLayer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> DragLayer<A> {
    pub fn new() -> Self {
        Self {
            dragged: None,
            grab_offset: PixelPoint::default(),
            pointer: PixelPoint::default(),
            size: PixelSize::ZERO,
        }
    }

    /// `grab_offset` is where inside the widget the pointer picked it up.
    pub fn start(&mut self, widget: WidgetRef<A>, grab_offset: PixelPoint) {
        log::debug!("drag started, grabbed at {grab_offset:?}");
        self.dragged = Some(widget);
        self.grab_offset = grab_offset;
    }

    /// Returns whether a drag was in progress.
    pub fn stop(&mut self) -> bool {
        let was_dragging = self.dragged.take().is_some();
        if was_dragging {
            log::debug!("drag stopped at {:?}", self.pointer);
        }
        was_dragging
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.as_ref().is_some_and(WidgetRef::is_alive)
    }

    /// Last pointer position seen by the layer.
    pub fn pointer(&self) -> PixelPoint {
        self.pointer
    }

    /// Where the dragged widget is drawn, given its size.
    pub fn drag_bounds(&self, size: PixelSize) -> PixelBBox {
        PixelBBox::at(
            PixelPoint::new(
                self.pointer.x.saturating_sub(self.grab_offset.x),
                self.pointer.y.saturating_sub(self.grab_offset.y),
            ),
            size,
        )
    }
}

impl<A> Widget<A> for DragLayer<A> {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, _dt: f32) -> Result<()> {
        self.size = available;
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, _widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        let Some(dragged) = &self.dragged else {
            return;
        };
        dragged.with(|widget| {
            let bounds = self.drag_bounds(widget.size());
            widget.render(ctx, bounds, window_bounds);
        });
    }

    fn set_input_state(
        &mut self,
        _widget_bounds: PixelBBox,
        _input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        self.pointer = input.mouse_pos;
        InputResponse::default()
    }

    fn input_region(&self, _widget_bounds: PixelBBox) -> PixelBBox {
        PixelBBox::EMPTY
    }

    fn debug_name(&self) -> Option<&str> {
        Some("drag_layer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::*;
    use crate::shared::Shared;

    const WINDOW: PixelBBox = PixelBBox::new(0, 100, 0, 100);

    #[test]
    fn renders_borrowed_widget_under_pointer() {
        let (p, state) = Probe::new("card", 20, 10);
        let owner = Shared::new(p);
        let mut layer: DragLayer<u32> = DragLayer::new();
        layer.start(owner.widget_ref(), PixelPoint::new(5, 5));
        assert!(layer.is_dragging());

        layer.update(PixelSize::new(100, 100), 0.0).unwrap();
        layer.set_input_state(WINDOW, WINDOW, &hover(40, 30));
        assert_eq!(layer.pointer(), PixelPoint::new(40, 30));

        let mut scene = Scene::default();
        layer.render(&mut RenderContext::new(&mut scene), WINDOW, WINDOW);
        assert_eq!(state.borrow().renders, vec![PixelBBox::new(35, 55, 25, 35)]);
        // never laid out, reset or routed input by the layer
        assert!(state.borrow().updates.is_empty());
        assert_eq!(state.borrow().inputs, 0);
        assert_eq!(layer.input_region(WINDOW), PixelBBox::EMPTY);
    }

    #[test]
    fn dropped_owner_ends_the_drag_visual() {
        let (p, _) = Probe::new("card", 20, 10);
        let owner = Shared::new(p);
        let mut layer: DragLayer<u32> = DragLayer::new();
        layer.start(owner.widget_ref(), PixelPoint::default());
        drop(owner);

        assert!(!layer.is_dragging());
        let mut scene = Scene::default();
        layer.render(&mut RenderContext::new(&mut scene), WINDOW, WINDOW);
        assert!(scene.nodes.is_empty());
        assert!(layer.stop());
        assert!(!layer.stop());
    }
}
