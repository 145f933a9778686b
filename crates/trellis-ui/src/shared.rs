//! Shared ownership and weak references to widgets.
//!
//! A widget normally has exactly one owner: its parent. Two cases need more:
//!
//! - the host keeps a handle to a layer it also mounted in the tree (the
//!   runner's popup and drag layers), which is what [`Shared`] is for;
//! - the drag layer shows a widget that still belongs to its original parent.
//!   It holds a [`WidgetRef`], which never keeps the widget alive and never
//!   updates, resets or drops it.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use trellis_core::*;

/// Owning, cloneable handle. Every clone is a full owner.
pub struct Shared<W: ?Sized>(Rc<RefCell<W>>);

impl<W> Shared<W> {
    pub fn new(widget: W) -> Self {
        Shared(Rc::new(RefCell::new(widget)))
    }
}

impl<W: ?Sized> Clone for Shared<W> {
    fn clone(&self) -> Self {
        Shared(self.0.clone())
    }
}

impl<W: ?Sized> Shared<W> {
    pub fn borrow(&self) -> Ref<'_, W> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, W> {
        self.0.borrow_mut()
    }
}

impl<W: 'static> Shared<W> {
    /// A non-owning reference to the same widget.
    pub fn widget_ref<A>(&self) -> WidgetRef<A>
    where
        W: Widget<A>,
    {
        let strong: Rc<RefCell<dyn Widget<A>>> = self.0.clone();
        WidgetRef(Rc::downgrade(&strong))
    }
}

impl<A, W: Widget<A> + ?Sized> Widget<A> for Shared<W> {
    fn size(&self) -> PixelSize {
        self.0.borrow().size()
    }

    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        self.0.borrow_mut().update(available, dt)
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        self.0.borrow().render(ctx, widget_bounds, window_bounds)
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        self.0
            .borrow_mut()
            .set_input_state(widget_bounds, input_bounds, input)
    }

    fn set_focused(&mut self, focused: bool) {
        self.0.borrow_mut().set_focused(focused)
    }

    fn reset(&mut self) {
        self.0.borrow_mut().reset()
    }

    fn input_region(&self, widget_bounds: PixelBBox) -> PixelBBox {
        self.0.borrow().input_region(widget_bounds)
    }

    fn debug_name(&self) -> Option<&str> {
        // Can't hand out a str borrowed from inside the RefCell.
        None
    }
}

/// Borrowed, not owned: a weak reference to a widget owned elsewhere.
pub struct WidgetRef<A>(Weak<RefCell<dyn Widget<A>>>);

impl<A> Clone for WidgetRef<A> {
    fn clone(&self) -> Self {
        WidgetRef(self.0.clone())
    }
}

impl<A> WidgetRef<A> {
    /// False once the owner has dropped the widget.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Runs `f` against the widget if it is still alive and not mutably
    /// borrowed at the moment.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Widget<A>) -> R) -> Option<R> {
        let strong = self.0.upgrade()?;
        let widget = strong.try_borrow().ok()?;
        Some(f(&*widget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::ColorRect;

    #[test]
    fn widget_ref_does_not_keep_widget_alive() {
        let owner = Shared::new(ColorRect::fixed(Color::WHITE, PixelSize::new(3, 4)));
        let weak: WidgetRef<()> = owner.widget_ref();
        assert!(weak.is_alive());
        assert_eq!(weak.with(|w| w.size()), Some(PixelSize::new(3, 4)));

        drop(owner);
        assert!(!weak.is_alive());
        assert_eq!(weak.with(|w| w.size()), None);
    }

    #[test]
    fn shared_delegates_update() {
        let owner = Shared::new(ColorRect::new(Color::WHITE));
        let mut mounted = owner.clone();
        Widget::<()>::update(&mut mounted, PixelSize::new(7, 9), 0.0).unwrap();
        assert_eq!(Widget::<()>::size(&*owner.borrow()), PixelSize::new(7, 9));
    }
}
