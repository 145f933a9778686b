use trellis_core::*;

/// Shows exactly one of its children, picked by a retriever every frame.
///
/// Only the selected child is laid out, drawn and routed input. When the
/// selection changes, the previously selected child loses focus (if it had
/// it) and is reset so it doesn't come back mid-press or mid-drag.
pub struct OneOf<A> {
    children: Vec<BoxedWidget<A>>,
    selector: Box<dyn Retriever<usize>>,
    selected: Option<usize>,
    focused: bool,
    size: PixelSize,
}

impl<A> OneOf<A> {
    pub fn new(selector: impl Retriever<usize> + 'static) -> Self {
        Self {
            children: Vec::new(),
            selector: Box::new(selector),
            selected: None,
            focused: false,
            size: PixelSize::ZERO,
        }
    }

    pub fn push(&mut self, widget: impl Widget<A> + 'static) -> usize {
        self.children.push(Box::new(widget));
        self.children.len() - 1
    }

    pub fn with(mut self, widget: impl Widget<A> + 'static) -> Self {
        self.push(widget);
        self
    }

    /// Selection used by the last `update`.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn current(&mut self) -> Option<&mut BoxedWidget<A>> {
        self.selected.and_then(|i| self.children.get_mut(i))
    }
}

impl<A> Widget<A> for OneOf<A> {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        let index = self.selector.get();
        let len = self.children.len();
        if index >= len {
            return Err(UiError::SelectionOutOfRange { index, len });
        }

        if self.selected != Some(index) {
            if let Some(prev) = self.selected
                && let Some(child) = self.children.get_mut(prev)
            {
                if self.focused {
                    child.set_focused(false);
                }
                child.reset();
            }
            log::trace!("selection {:?} -> {index}", self.selected);
            self.focused = false;
            self.selected = Some(index);
        }

        let child = &mut self.children[index];
        child.update(available, dt)?;
        self.size = child.size();
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        if let Some(child) = self.selected.and_then(|i| self.children.get(i)) {
            child.render(ctx, widget_bounds, window_bounds);
        }
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        match self.current() {
            Some(child) => child.set_input_state(widget_bounds, input_bounds, input),
            None => InputResponse::default(),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if let Some(child) = self.current() {
            child.set_focused(focused);
        }
    }

    fn reset(&mut self) {
        if let Some(child) = self.current() {
            child.reset();
        }
    }

    fn input_region(&self, widget_bounds: PixelBBox) -> PixelBBox {
        match self.selected.and_then(|i| self.children.get(i)) {
            Some(child) => child.input_region(widget_bounds),
            None => widget_bounds,
        }
    }

    fn debug_name(&self) -> Option<&str> {
        Some("one_of")
    }
}
