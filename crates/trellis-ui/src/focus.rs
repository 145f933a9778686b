//! Per-container focus bookkeeping.
//!
//! Focus is not tracked globally. Each container remembers which of its own
//! children last asked for focus and forwards `set_focused` only to that
//! child. Because a focus request also bubbles up (`wants_focus` is OR'd into
//! the container's own response), every ancestor performs the same switch at
//! its level, which keeps at most one focused leaf in the whole tree.
//!
//! A claim always reaches the claiming child, even when it already held
//! focus at this level, so no frame driver has to re-assert focus from the
//! root.

use trellis_core::*;

/// Anything a container stores per child that gives access to the widget.
pub trait Slot<A> {
    fn widget_mut(&mut self) -> &mut dyn Widget<A>;
}

impl<A> Slot<A> for BoxedWidget<A> {
    fn widget_mut(&mut self) -> &mut dyn Widget<A> {
        &mut **self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusTracker {
    focused: Option<usize>,
}

impl FocusTracker {
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Moves focus to `index`, unfocusing the previous holder first.
    ///
    /// Claiming the index that already holds focus re-sends
    /// `set_focused(true)`: the child may now show a different leaf (a
    /// replaced popup, another `OneOf` page) that has not been told yet.
    pub fn claim<A, S: Slot<A>>(&mut self, index: usize, slots: &mut [S]) {
        if self.focused == Some(index) {
            if let Some(slot) = slots.get_mut(index) {
                slot.widget_mut().set_focused(true);
            }
            return;
        }
        if let Some(prev) = self.focused.take()
            && let Some(slot) = slots.get_mut(prev)
        {
            slot.widget_mut().set_focused(false);
        }
        if let Some(slot) = slots.get_mut(index) {
            let widget = slot.widget_mut();
            log::trace!(
                "focus moved to child {index} ({})",
                widget.debug_name().unwrap_or("unnamed")
            );
            widget.set_focused(true);
            self.focused = Some(index);
        }
    }

    /// Passes the container's own focus change to the remembered child.
    pub fn forward<A, S: Slot<A>>(&self, focused: bool, slots: &mut [S]) {
        if let Some(slot) = self.focused.and_then(|i| slots.get_mut(i)) {
            slot.widget_mut().set_focused(focused);
        }
    }

    /// Keeps the remembered index valid after the child at `index` is gone.
    pub fn removed(&mut self, index: usize) {
        self.focused = match self.focused {
            Some(f) if f == index => None,
            Some(f) if f > index => Some(f - 1),
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use trellis_core::*;

    use crate::probe::*;
    use crate::*;

    const WINDOW: PixelBBox = PixelBBox::new(0, 100, 0, 100);

    #[test]
    fn replaced_popup_gets_focus_without_help_from_the_root() {
        let (m1, m1_s) = Probe::new("m1", 20, 20);
        let (m2, m2_s) = Probe::new("m2", 20, 20);
        let popups: Shared<PopupLayer<u32>> = Shared::new(PopupLayer::new());
        let mut root: Stack<u32> = Stack::new().with(popups.clone(), StackLayout::Fill);

        popups.borrow_mut().set(m1.focusable(), PixelPoint::new(0, 0));
        root.update(PixelSize::new(100, 100), 0.0).unwrap();
        root.set_input_state(WINDOW, WINDOW, &click(5, 5));
        assert!(m1_s.borrow().focused);

        popups.borrow_mut().set(m2.focusable(), PixelPoint::new(0, 0));
        root.update(PixelSize::new(100, 100), 0.0).unwrap();
        root.set_input_state(WINDOW, WINDOW, &click(5, 5));
        assert!(m2_s.borrow().focused);
    }

    #[test]
    fn new_page_of_one_of_gets_focus_on_click() {
        let tab = Rc::new(Cell::new(0));
        let (a, a_s) = Probe::new("a", 20, 20);
        let (b, b_s) = Probe::new("b", 20, 20);
        let t = tab.clone();
        let pages = OneOf::new(move || t.get()).with(a.focusable()).with(b.focusable());
        let mut root: Stack<u32> = Stack::new().with(pages, StackLayout::Offset { x: 0, y: 0 });

        root.update(PixelSize::new(100, 100), 0.0).unwrap();
        root.set_input_state(WINDOW, WINDOW, &click(5, 5));
        assert!(a_s.borrow().focused);

        tab.set(1);
        root.update(PixelSize::new(100, 100), 0.0).unwrap();
        root.set_input_state(WINDOW, WINDOW, &click(5, 5));
        assert!(b_s.borrow().focused);
        assert_eq!(focused_count(&[&a_s, &b_s]), 1);
    }
}
