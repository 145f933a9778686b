//! Vertical scrollbar owned by a [`ScrollView`](crate::ScrollView).
//!
//! Not a widget: it has no place in the tree and is driven directly by its
//! scroll view, which hands it the track rectangle every frame.

use trellis_core::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ScrollbarState {
    #[default]
    Idle,
    Hovered,
    /// `start_ratio` is the handle's top ratio when the drag began.
    Dragging { start_ratio: f32 },
}

#[derive(Clone, Debug)]
pub struct Scrollbar {
    /// Handle length as a fraction of the track (viewport / content).
    pub handle_ratio: f32,
    /// Handle top as a fraction of the track (offset / content).
    pub top_ratio: f32,
    state: ScrollbarState,
    style: ScrollbarStyle,
}

impl Default for Scrollbar {
    fn default() -> Self {
        Self::new(ScrollbarStyle::default())
    }
}

impl Scrollbar {
    pub fn new(style: ScrollbarStyle) -> Self {
        Self {
            handle_ratio: 1.0,
            top_ratio: 0.0,
            state: ScrollbarState::Idle,
            style,
        }
    }

    pub fn style(&self) -> &ScrollbarStyle {
        &self.style
    }

    pub fn state(&self) -> ScrollbarState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ScrollbarState::Dragging { .. })
    }

    pub fn max_top_ratio(&self) -> f32 {
        (1.0 - self.handle_ratio).max(0.0)
    }

    pub fn handle_bounds(&self, track: PixelBBox) -> PixelBBox {
        let h = track.height() as f32;
        let top = track.top + (self.top_ratio * h).round() as i32;
        let len = (self.handle_ratio.clamp(0.0, 1.0) * h).round() as u32;
        PixelBBox::at(PixelPoint::new(track.left, top), PixelSize::new(track.width(), len))
    }

    pub fn cursor(&self) -> Option<CursorStyle> {
        match self.state {
            ScrollbarState::Idle => None,
            ScrollbarState::Hovered => Some(CursorStyle::Pointer),
            ScrollbarState::Dragging { .. } => Some(CursorStyle::Grabbing),
        }
    }

    pub fn reset(&mut self) {
        self.state = ScrollbarState::Idle;
    }

    fn set_state(&mut self, state: ScrollbarState) {
        if self.state != state {
            log::trace!("scrollbar {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    /// Advances the hover/drag state machine.
    ///
    /// Returns the new top ratio while a drag is in progress, `None`
    /// otherwise. A drag keeps tracking the pointer even after it leaves the
    /// track, and finishes on the frame the left button is released.
    pub fn handle_input(&mut self, input: &InputState, track: PixelBBox) -> Option<f32> {
        let track_h = track.height().max(1) as f32;

        if let ScrollbarState::Dragging { start_ratio } = self.state
            && let Some(anchor) = input.mouse_down_pos
        {
            let delta = (input.mouse_pos.y - anchor.y) as f32 / track_h;
            let ratio = (start_ratio + delta).clamp(0.0, self.max_top_ratio());
            self.top_ratio = ratio;
            if !input.mouse_held(MouseButton::Left) {
                self.set_state(self.rest_state(input, track));
            }
            return Some(ratio);
        }

        let anchored_here = input.mouse_down_pos.is_some_and(|a| track.contains(a));
        if input.mouse_pressed(MouseButton::Left) && anchored_here {
            self.set_state(ScrollbarState::Dragging {
                start_ratio: self.top_ratio,
            });
            return Some(self.top_ratio);
        }

        self.set_state(self.rest_state(input, track));
        None
    }

    fn rest_state(&self, input: &InputState, track: PixelBBox) -> ScrollbarState {
        if track.contains(input.mouse_pos) {
            ScrollbarState::Hovered
        } else {
            ScrollbarState::Idle
        }
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>, track: PixelBBox, window_bounds: PixelBBox) {
        let style = &self.style;
        ctx.fill(
            track,
            window_bounds,
            &DrawParams::solid(style.track).with_radius(style.corner_radius),
        );
        let color = match self.state {
            ScrollbarState::Idle => style.handle,
            ScrollbarState::Hovered => style.handle_hovered,
            ScrollbarState::Dragging { .. } => style.handle_active,
        };
        ctx.fill(
            self.handle_bounds(track),
            window_bounds,
            &DrawParams::solid(color).with_radius(style.corner_radius),
        );
    }
}
