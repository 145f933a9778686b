//! Linear flow containers.
//!
//! [`Layout`] advances a cursor along one axis by each child's size plus a
//! fixed padding. [`EvenVertLayout`] splits its height into equal slots.

use trellis_core::*;

use crate::focus::{FocusTracker, Slot};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    TopToBottom,
    LeftToRight,
    /// Laid out left-to-right, then mirrored against the offered width.
    RightToLeft,
}

impl Direction {
    fn is_horizontal(self) -> bool {
        !matches!(self, Direction::TopToBottom)
    }
}

/// Placement on the cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
}

impl Justify {
    pub(crate) fn offset(self, extent: u32, item: u32) -> u32 {
        let slack = extent.saturating_sub(item);
        match self {
            Justify::Start => 0,
            Justify::Center => slack / 2,
            Justify::End => slack,
        }
    }
}

/// A child plus its bounds relative to the container's top-left corner.
pub(crate) struct Placed<A> {
    pub(crate) widget: BoxedWidget<A>,
    pub(crate) local: PixelBBox,
}

impl<A> Placed<A> {
    pub(crate) fn new(widget: BoxedWidget<A>) -> Self {
        Placed {
            widget,
            local: PixelBBox::EMPTY,
        }
    }

    pub(crate) fn bounds(&self, container: PixelBBox) -> PixelBBox {
        self.local.offset(container.left, container.top)
    }
}

impl<A> Slot<A> for Placed<A> {
    fn widget_mut(&mut self) -> &mut dyn Widget<A> {
        &mut *self.widget
    }
}

/// Routes input to every child in order. Children don't overlap, so nothing
/// short-circuits; the last child producing an action wins.
pub(crate) fn route_all<A>(
    items: &mut [Placed<A>],
    focus: &mut FocusTracker,
    widget_bounds: PixelBBox,
    input_bounds: PixelBBox,
    input: &InputState,
) -> InputResponse<A> {
    let mut response = InputResponse::default();
    for index in 0..items.len() {
        let item = &mut items[index];
        let b = item.bounds(widget_bounds);
        let child_input = item.widget.input_region(b).intersect(&input_bounds);
        let child_response = item.widget.set_input_state(b, child_input, input);
        if child_response.wants_focus {
            focus.claim(index, items);
        }
        response.merge(child_response);
    }
    response
}

pub(crate) fn render_all<A>(
    items: &[Placed<A>],
    ctx: &mut RenderContext<'_>,
    widget_bounds: PixelBBox,
    window_bounds: PixelBBox,
) {
    for item in items {
        item.widget
            .render(ctx, item.bounds(widget_bounds), window_bounds);
    }
}

pub struct Layout<A> {
    items: Vec<Placed<A>>,
    direction: Direction,
    padding: u32,
    justify: Justify,
    size: PixelSize,
    focus: FocusTracker,
    name: Option<&'static str>,
}

impl<A> Layout<A> {
    pub fn new(direction: Direction) -> Self {
        Self {
            items: Vec::new(),
            direction,
            padding: 0,
            justify: Justify::Start,
            size: PixelSize::ZERO,
            focus: FocusTracker::default(),
            name: None,
        }
    }

    pub fn vertical() -> Self {
        Self::new(Direction::TopToBottom)
    }

    pub fn horizontal() -> Self {
        Self::new(Direction::LeftToRight)
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn push(&mut self, widget: impl Widget<A> + 'static) -> usize {
        self.items.push(Placed::new(Box::new(widget)));
        self.items.len() - 1
    }

    pub fn with(mut self, widget: impl Widget<A> + 'static) -> Self {
        self.push(widget);
        self
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

    pub fn child_bounds(&self, index: usize, bounds: PixelBBox) -> Option<PixelBBox> {
        self.items.get(index).map(|item| item.bounds(bounds))
    }
}

impl<A> Widget<A> for Layout<A> {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        let horizontal = self.direction.is_horizontal();
        let (main_avail, cross_avail) = if horizontal {
            (available.width, available.height)
        } else {
            (available.height, available.width)
        };

        let mut cursor = 0u32;
        let mut cross_max = 0u32;
        for item in &mut self.items {
            let remaining = main_avail.saturating_sub(cursor);
            let offer = if horizontal {
                PixelSize::new(remaining, cross_avail)
            } else {
                PixelSize::new(cross_avail, remaining)
            };
            item.widget.update(offer, dt)?;

            let s = item.widget.size();
            let (main, cross) = if horizontal {
                (s.width, s.height)
            } else {
                (s.height, s.width)
            };
            let at = cursor.min(i32::MAX as u32) as i32;
            item.local = if horizontal {
                PixelBBox::at(PixelPoint::new(at, 0), s)
            } else {
                PixelBBox::at(PixelPoint::new(0, at), s)
            };
            cursor = cursor.saturating_add(main).saturating_add(self.padding);
            cross_max = cross_max.max(cross);
        }
        let used = if self.items.is_empty() {
            0
        } else {
            cursor.saturating_sub(self.padding)
        };

        for item in &mut self.items {
            let s = item.local.size();
            if horizontal {
                let dy = self.justify.offset(cross_max, s.height) as i32;
                item.local = item.local.offset(0, dy);
            } else {
                let dx = self.justify.offset(cross_max, s.width) as i32;
                item.local = item.local.offset(dx, 0);
            }
        }

        self.size = match self.direction {
            Direction::TopToBottom => PixelSize::new(cross_max, used),
            Direction::LeftToRight => PixelSize::new(used, cross_max),
            Direction::RightToLeft => {
                let width = available.width.min(i32::MAX as u32) as i32;
                for item in &mut self.items {
                    let l = item.local;
                    item.local = PixelBBox::new(
                        width.saturating_sub(l.right),
                        width.saturating_sub(l.left),
                        l.top,
                        l.bottom,
                    );
                }
                PixelSize::new(available.width, cross_max)
            }
        };
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        render_all(&self.items, ctx, widget_bounds, window_bounds);
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        route_all(&mut self.items, &mut self.focus, widget_bounds, input_bounds, input)
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
        self.name.or(Some("layout"))
    }
}

/// Stacks children top to bottom, each in an equal share of the height.
///
/// Slot edges are rounded down, so with a height that doesn't divide evenly
/// the later slots absorb the remainder one pixel at a time.
pub struct EvenVertLayout<A> {
    items: Vec<Placed<A>>,
    size: PixelSize,
    focus: FocusTracker,
}

impl<A> Default for EvenVertLayout<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> EvenVertLayout<A> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            size: PixelSize::ZERO,
            focus: FocusTracker::default(),
        }
    }

    pub fn push(&mut self, widget: impl Widget<A> + 'static) -> usize {
        self.items.push(Placed::new(Box::new(widget)));
        self.items.len() - 1
    }

    pub fn with(mut self, widget: impl Widget<A> + 'static) -> Self {
        self.push(widget);
        self
    }

    pub fn child_bounds(&self, index: usize, bounds: PixelBBox) -> Option<PixelBBox> {
        self.items.get(index).map(|item| item.bounds(bounds))
    }
}

impl<A> Widget<A> for EvenVertLayout<A> {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        let n = self.items.len() as u64;
        let h = u64::from(available.height);
        let mut width = 0;
        for (i, item) in self.items.iter_mut().enumerate() {
            let i = i as u64;
            let top = (h * i / n) as u32;
            let bottom = (h * (i + 1) / n) as u32;
            let slot = PixelSize::new(available.width, bottom - top);
            item.widget.update(slot, dt)?;
            let child_width = item.widget.size().width;
            width = width.max(child_width);
            item.local = PixelBBox::at(
                PixelPoint::new(0, top.min(i32::MAX as u32) as i32),
                PixelSize::new(child_width, slot.height),
            );
        }
        self.size = PixelSize::new(width, available.height);
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        render_all(&self.items, ctx, widget_bounds, window_bounds);
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        route_all(&mut self.items, &mut self.focus, widget_bounds, input_bounds, input)
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
        Some("even_vert_layout")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::*;

    fn bounds(w: u32, h: u32) -> PixelBBox {
        PixelBBox::from_size(PixelSize::new(w, h))
    }

    #[test]
    fn vertical_flow_with_padding() {
        let (a, _) = Probe::new("a", 30, 10);
        let (b, _) = Probe::new("b", 50, 20);
        let mut layout: Layout<u32> = Layout::vertical().with_padding(4).with(a).with(b);
        layout.update(PixelSize::new(100, 100), 0.0).unwrap();

        // trailing padding is not counted
        assert_eq!(layout.size(), PixelSize::new(50, 34));
        let b0 = bounds(100, 100);
        assert_eq!(layout.child_bounds(0, b0), Some(PixelBBox::new(0, 30, 0, 10)));
        assert_eq!(layout.child_bounds(1, b0), Some(PixelBBox::new(0, 50, 14, 34)));
    }

    #[test]
    fn children_are_offered_only_the_remaining_space() {
        let (a, a_state) = Probe::new("a", 10, 60);
        let (b, b_state) = Probe::filling("b");
        let mut layout: Layout<u32> = Layout::vertical().with_padding(5).with(a).with(b);
        layout.update(PixelSize::new(40, 100), 0.0).unwrap();

        assert_eq!(a_state.borrow().updates, vec![PixelSize::new(40, 100)]);
        assert_eq!(b_state.borrow().updates, vec![PixelSize::new(40, 35)]);
        assert_eq!(layout.size(), PixelSize::new(40, 100));
    }

    #[test]
    fn right_to_left_mirrors_and_keeps_order() {
        let (w1, _) = Probe::new("w1", 10, 5);
        let (w2, _) = Probe::new("w2", 20, 5);
        let mut layout: Layout<u32> = Layout::new(Direction::RightToLeft).with(w1).with(w2);
        layout.update(PixelSize::new(100, 30), 0.0).unwrap();

        assert_eq!(layout.size(), PixelSize::new(100, 5));
        let b0 = bounds(100, 30);
        assert_eq!(layout.child_bounds(0, b0), Some(PixelBBox::new(90, 100, 0, 5)));
        assert_eq!(layout.child_bounds(1, b0), Some(PixelBBox::new(70, 90, 0, 5)));
    }

    #[test]
    fn right_to_left_padding_stays_between_children() {
        let (w1, _) = Probe::new("w1", 10, 5);
        let (w2, _) = Probe::new("w2", 20, 5);
        let mut layout: Layout<u32> = Layout::new(Direction::RightToLeft)
            .with_padding(3)
            .with(w1)
            .with(w2);
        layout.update(PixelSize::new(100, 30), 0.0).unwrap();

        let b0 = bounds(100, 30);
        assert_eq!(layout.child_bounds(0, b0), Some(PixelBBox::new(90, 100, 0, 5)));
        assert_eq!(layout.child_bounds(1, b0), Some(PixelBBox::new(67, 87, 0, 5)));
    }

    #[test]
    fn cross_axis_justification() {
        let (a, _) = Probe::new("a", 10, 4);
        let (b, _) = Probe::new("b", 10, 10);
        let mut layout: Layout<u32> = Layout::horizontal()
            .with_justify(Justify::Center)
            .with(a)
            .with(b);
        layout.update(PixelSize::new(100, 100), 0.0).unwrap();
        let b0 = bounds(100, 100);
        assert_eq!(layout.child_bounds(0, b0), Some(PixelBBox::new(0, 10, 3, 7)));

        let (a, _) = Probe::new("a", 10, 4);
        let (b, _) = Probe::new("b", 10, 10);
        let mut layout: Layout<u32> = Layout::horizontal()
            .with_justify(Justify::End)
            .with(a)
            .with(b);
        layout.update(PixelSize::new(100, 100), 0.0).unwrap();
        assert_eq!(layout.child_bounds(0, b0), Some(PixelBBox::new(0, 10, 6, 10)));
    }

    #[test]
    fn bounds_follow_the_container_origin() {
        let (a, _) = Probe::new("a", 10, 10);
        let mut layout: Layout<u32> = Layout::horizontal().with(a);
        layout.update(PixelSize::new(100, 100), 0.0).unwrap();
        assert_eq!(
            layout.child_bounds(0, PixelBBox::new(20, 120, 30, 130)),
            Some(PixelBBox::new(20, 30, 30, 40))
        );
    }

    #[test]
    fn focus_moves_between_siblings() {
        let (a, a_state) = Probe::new("a", 10, 10);
        let (b, b_state) = Probe::new("b", 10, 10);
        let mut layout: Layout<u32> = Layout::horizontal()
            .with(a.focusable().with_action(1))
            .with(b.focusable().with_action(2));
        layout.update(PixelSize::new(100, 100), 0.0).unwrap();
        let b0 = bounds(100, 100);

        let r = layout.set_input_state(b0, b0, &click(5, 5));
        assert!(r.wants_focus);
        assert_eq!(r.action, Some(1));
        assert!(a_state.borrow().focused);

        let r = layout.set_input_state(b0, b0, &click(15, 5));
        assert_eq!(r.action, Some(2));
        assert!(b_state.borrow().focused);
        assert!(!a_state.borrow().focused);
        assert_eq!(layout.focused(), Some(1));
    }

    #[test]
    fn even_split_rounds_down() {
        let (a, a_state) = Probe::filling("a");
        let (b, b_state) = Probe::filling("b");
        let (c, c_state) = Probe::new("c", 7, 1);
        let mut layout: EvenVertLayout<u32> = EvenVertLayout::new().with(a).with(b).with(c);
        layout.update(PixelSize::new(40, 100), 0.0).unwrap();

        assert_eq!(a_state.borrow().updates, vec![PixelSize::new(40, 33)]);
        assert_eq!(b_state.borrow().updates, vec![PixelSize::new(40, 33)]);
        assert_eq!(c_state.borrow().updates, vec![PixelSize::new(40, 34)]);
        assert_eq!(layout.size(), PixelSize::new(40, 100));

        let b0 = bounds(40, 100);
        assert_eq!(layout.child_bounds(1, b0), Some(PixelBBox::new(0, 40, 33, 66)));
        assert_eq!(layout.child_bounds(2, b0), Some(PixelBBox::new(0, 7, 66, 100)));
    }

    #[test]
    fn huge_even_split_keeps_slots_below_the_top() {
        let mut layout: EvenVertLayout<u32> = EvenVertLayout::new();
        for _ in 0..3 {
            layout.push(Probe::new("p", 10, 10).0);
        }
        layout.update(PixelSize::new(50, u32::MAX), 0.0).unwrap();

        let origin = PixelBBox::from_size(PixelSize::ZERO);
        let tops: Vec<i32> = (0..3)
            .map(|i| layout.child_bounds(i, origin).map(|b| b.top).unwrap_or(-1))
            .collect();
        assert_eq!(tops, vec![0, 1_431_655_765, i32::MAX]);
    }

    #[test]
    fn empty_even_split_is_harmless() {
        let mut layout: EvenVertLayout<u32> = EvenVertLayout::new();
        layout.update(PixelSize::new(40, 100), 0.0).unwrap();
        assert_eq!(layout.size(), PixelSize::new(0, 100));
    }
}
