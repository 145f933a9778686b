//! # Popup layer
//!
//! Hosts at most one floating widget at a pixel offset from the layer's
//! origin. The layer itself spans the whole window (it is mounted as a
//! `Fill` child of the root stack), but only the popup's own rectangle takes
//! input, so everything outside stays clickable.
//!
//! After every `update` the offset is nudged so the popup stays inside the
//! layer: each overflowing edge is shifted back just far enough, right and
//! bottom first, then left and top. A popup larger than the layer ends up
//! pinned to the top-left corner.
//!
//! A popup closes when:
//!
//! - the left button is pressed outside it, but only once the popup has seen
//!   a frame with the left button up (so the click that opened it can't
//!   close it again). That press still reaches whatever is underneath.
//! - Escape is pressed while it is open.

use trellis_core::*;

struct Popup<A> {
    widget: BoxedWidget<A>,
    offset: PixelPoint,
    armed: bool,
}

pub struct PopupLayer<A> {
    popup: Option<Popup<A>>,
    background: Color,
    size: PixelSize,
}

impl<A> Default for PopupLayer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> PopupLayer<A> {
    pub fn new() -> Self {
        Self {
            popup: None,
            background: Theme::default().popup_background,
            size: PixelSize::ZERO,
        }
    }

    /// Drawn behind the popup; `Color::TRANSPARENT` disables it.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_theme(self, theme: &Theme) -> Self {
        self.with_background(theme.popup_background)
    }

    /// Opens `widget` at `offset`, dropping any popup already open.
    pub fn set(&mut self, widget: impl Widget<A> + 'static, offset: PixelPoint) {
        if self.popup.is_some() {
            log::debug!("replacing open popup, new one at {offset:?}");
        } else {
            log::debug!("popup opened at {offset:?}");
        }
        self.popup = Some(Popup {
            widget: Box::new(widget),
            offset,
            armed: false,
        });
    }

    /// Returns whether a popup was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.popup.take().is_some();
        if was_open {
            log::debug!("popup closed");
        }
        was_open
    }

    pub fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    /// Current offset after placement healing.
    pub fn offset(&self) -> Option<PixelPoint> {
        self.popup.as_ref().map(|p| p.offset)
    }

    pub fn popup_bounds(&self, widget_bounds: PixelBBox) -> Option<PixelBBox> {
        let popup = self.popup.as_ref()?;
        let origin = widget_bounds.origin();
        Some(PixelBBox::at(
            PixelPoint::new(
                origin.x.saturating_add(popup.offset.x),
                origin.y.saturating_add(popup.offset.y),
            ),
            popup.widget.size(),
        ))
    }
}

/// Shifts `pos` so that `[pos, pos + len)` fits in `[0, extent)` where it can.
fn heal(pos: i32, len: u32, extent: u32) -> i32 {
    let len = i64::from(len);
    let extent = i64::from(extent);
    let mut pos = i64::from(pos);
    if pos + len > extent {
        pos = extent - len;
    }
    pos.max(0).min(i64::from(i32::MAX)) as i32
}

impl<A> Widget<A> for PopupLayer<A> {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        self.size = available;
        let Some(popup) = &mut self.popup else {
            return Ok(());
        };
        popup.widget.update(available, dt)?;

        let s = popup.widget.size();
        let healed = PixelPoint::new(
            heal(popup.offset.x, s.width, available.width),
            heal(popup.offset.y, s.height, available.height),
        );
        if healed != popup.offset {
            log::trace!("popup moved {:?} -> {healed:?} to stay on screen", popup.offset);
            popup.offset = healed;
        }
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        let (Some(popup), Some(bounds)) = (&self.popup, self.popup_bounds(widget_bounds)) else {
            return;
        };
        if self.background.3 > 0 {
            ctx.fill(bounds, window_bounds, &DrawParams::solid(self.background));
        }
        popup.widget.render(ctx, bounds, window_bounds);
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        let Some(bounds) = self.popup_bounds(widget_bounds) else {
            return InputResponse::default();
        };
        let Some(popup) = &mut self.popup else {
            return InputResponse::default();
        };

        let escape = input.key_pressed(&Key::Escape);
        let outside_press = popup.armed
            && input.mouse_pressed(MouseButton::Left)
            && !bounds.contains(input.mouse_pos);
        if escape || outside_press {
            log::debug!(
                "popup dismissed by {}",
                if escape { "escape" } else { "click outside" }
            );
            self.popup = None;
            return InputResponse::default();
        }

        let child_input = popup.widget.input_region(bounds).intersect(&input_bounds);
        let response = popup.widget.set_input_state(bounds, child_input, input);
        if !input.mouse_held(MouseButton::Left) {
            popup.armed = true;
        }
        response
    }

    fn set_focused(&mut self, focused: bool) {
        if let Some(popup) = &mut self.popup {
            popup.widget.set_focused(focused);
        }
    }

    fn reset(&mut self) {
        if let Some(popup) = &mut self.popup {
            popup.widget.reset();
        }
    }

    fn input_region(&self, widget_bounds: PixelBBox) -> PixelBBox {
        self.popup_bounds(widget_bounds)
            .unwrap_or(PixelBBox::EMPTY)
            .intersect(&widget_bounds)
    }

    fn debug_name(&self) -> Option<&str> {
        Some("popup_layer")
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::leaf::ColorRect;
    use crate::probe::*;

    const WINDOW: PixelBBox = PixelBBox::new(0, 100, 0, 100);

    fn layer_with(w: u32, h: u32, at: (i32, i32)) -> (PopupLayer<u32>, ProbeHandle) {
        let (p, state) = Probe::new("popup", w, h);
        let mut layer = PopupLayer::new();
        layer.set(p.with_action(7), PixelPoint::new(at.0, at.1));
        layer.update(PixelSize::new(100, 100), 0.0).unwrap();
        (layer, state)
    }

    fn release() -> InputState {
        let mut input = click(0, 0);
        input.start_frame();
        input.push_input(InputEvent::MouseUp(MouseButton::Left));
        input
    }

    #[test]
    fn set_replaces_and_drops_previous() {
        let (first, first_state) = Probe::new("first", 10, 10);
        let (second, _) = Probe::new("second", 10, 10);
        let mut layer: PopupLayer<u32> = PopupLayer::new();
        layer.set(first, PixelPoint::new(0, 0));
        assert_eq!(Rc::strong_count(&first_state), 2);
        layer.set(second, PixelPoint::new(5, 5));
        assert_eq!(Rc::strong_count(&first_state), 1);
        assert_eq!(layer.offset(), Some(PixelPoint::new(5, 5)));

        assert!(layer.close());
        assert!(!layer.close());
        assert!(!layer.is_open());
    }

    #[test]
    fn overflowing_edges_are_pulled_back() {
        let (layer, _) = layer_with(30, 30, (90, -10));
        assert_eq!(layer.offset(), Some(PixelPoint::new(70, 0)));
        assert_eq!(layer.popup_bounds(WINDOW), Some(PixelBBox::new(70, 100, 0, 30)));
    }

    #[test]
    fn fitting_popup_is_left_alone() {
        let (layer, _) = layer_with(30, 30, (10, 60));
        assert_eq!(layer.offset(), Some(PixelPoint::new(10, 60)));
    }

    #[test]
    fn oversized_popup_pins_to_origin() {
        let (layer, _) = layer_with(150, 20, (10, 10));
        assert_eq!(layer.offset(), Some(PixelPoint::new(0, 10)));
    }

    #[test]
    fn opening_click_does_not_dismiss() {
        let (mut layer, _) = layer_with(20, 20, (0, 0));
        // the button that opened the popup is still down, pressed outside
        let opening = click(80, 80);
        layer.set_input_state(WINDOW, WINDOW, &opening);
        assert!(layer.is_open());

        layer.set_input_state(WINDOW, WINDOW, &release());
        assert!(layer.is_open());

        let r = layer.set_input_state(WINDOW, WINDOW, &click(80, 80));
        assert!(!layer.is_open());
        assert_eq!(r, InputResponse::default());
        assert_eq!(layer.input_region(WINDOW), PixelBBox::EMPTY);
    }

    #[test]
    fn press_inside_reaches_popup() {
        let (mut layer, state) = layer_with(20, 20, (0, 0));
        layer.set_input_state(WINDOW, WINDOW, &hover(50, 50));
        let r = layer.set_input_state(WINDOW, WINDOW, &click(5, 5));
        assert!(layer.is_open());
        assert_eq!(r.action, Some(7));
        assert_eq!(state.borrow().inputs, 2);
    }

    #[test]
    fn escape_dismisses_without_arming() {
        let (mut layer, _) = layer_with(20, 20, (0, 0));
        let mut input = InputState::new();
        input.push_input(InputEvent::KeyDown(KeyEvent::new(Key::Escape)));
        layer.set_input_state(WINDOW, WINDOW, &input);
        assert!(!layer.is_open());
    }

    #[test]
    fn theme_background_is_drawn_behind_popup() {
        let theme = Theme {
            popup_background: Color::from_hex("#123456"),
            ..Theme::default()
        };
        let mut layer: PopupLayer<()> = PopupLayer::new().with_theme(&theme);
        layer.set(ColorRect::fixed(Color::WHITE, PixelSize::new(10, 10)), PixelPoint::new(0, 0));
        layer.update(PixelSize::new(100, 100), 0.0).unwrap();

        let mut scene = Scene::default();
        layer.render(&mut RenderContext::new(&mut scene), WINDOW, WINDOW);
        let colors: Vec<Color> = scene.quads().map(|(_, p)| p.color).collect();
        assert_eq!(colors, vec![Color::from_hex("#123456"), Color::WHITE]);
    }

    #[test]
    fn input_region_is_only_the_popup() {
        let mut layer: PopupLayer<u32> = PopupLayer::new();
        assert_eq!(layer.input_region(WINDOW), PixelBBox::EMPTY);
        let (p, _) = Probe::new("popup", 20, 10);
        layer.set(p, PixelPoint::new(30, 40));
        layer.update(PixelSize::new(100, 100), 0.0).unwrap();
        assert_eq!(layer.input_region(WINDOW), PixelBBox::new(30, 50, 40, 50));
    }
}
