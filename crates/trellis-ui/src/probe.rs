//! Recording widget used by the container tests.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_core::*;

#[derive(Debug, Default)]
pub struct ProbeState {
    pub updates: Vec<PixelSize>,
    pub inputs: usize,
    pub last_bounds: Option<PixelBBox>,
    pub last_input_bounds: Option<PixelBBox>,
    pub renders: Vec<PixelBBox>,
    pub focused: bool,
    pub resets: usize,
}

pub type ProbeHandle = Rc<RefCell<ProbeState>>;

pub struct Probe {
    name: &'static str,
    fixed: Option<PixelSize>,
    size: PixelSize,
    focusable: bool,
    action: Option<u32>,
    state: ProbeHandle,
}

impl Probe {
    /// Fixed-size probe.
    pub fn new(name: &'static str, width: u32, height: u32) -> (Self, ProbeHandle) {
        let state = ProbeHandle::default();
        let size = PixelSize::new(width, height);
        (
            Probe {
                name,
                fixed: Some(size),
                size,
                focusable: false,
                action: None,
                state: state.clone(),
            },
            state,
        )
    }

    /// Probe that takes whatever it is offered.
    pub fn filling(name: &'static str) -> (Self, ProbeHandle) {
        let (mut probe, state) = Probe::new(name, 0, 0);
        probe.fixed = None;
        (probe, state)
    }

    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    pub fn with_action(mut self, action: u32) -> Self {
        self.action = Some(action);
        self
    }
}

impl Widget<u32> for Probe {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, _dt: f32) -> Result<()> {
        self.state.borrow_mut().updates.push(available);
        self.size = self.fixed.unwrap_or(available);
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        self.state.borrow_mut().renders.push(widget_bounds);
        ctx.fill(widget_bounds, window_bounds, &DrawParams::solid(Color::WHITE));
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<u32> {
        let mut state = self.state.borrow_mut();
        state.inputs += 1;
        state.last_bounds = Some(widget_bounds);
        state.last_input_bounds = Some(input_bounds);

        let mut response = InputResponse::default();
        if input.mouse_pressed(MouseButton::Left) && input_bounds.contains(input.mouse_pos) {
            response.wants_focus = self.focusable;
            response.action = self.action;
        }
        response
    }

    fn set_focused(&mut self, focused: bool) {
        self.state.borrow_mut().focused = focused;
    }

    fn reset(&mut self) {
        self.state.borrow_mut().resets += 1;
    }

    fn debug_name(&self) -> Option<&str> {
        Some(self.name)
    }
}

/// Input with the left button pressed this frame at (x, y).
pub fn click(x: i32, y: i32) -> InputState {
    let mut input = InputState::new();
    input.push_input(InputEvent::PointerMove(PixelPoint::new(x, y)));
    input.push_input(InputEvent::MouseDown(MouseButton::Left));
    input
}

/// Input with the pointer at (x, y) and no buttons involved.
pub fn hover(x: i32, y: i32) -> InputState {
    let mut input = InputState::new();
    input.push_input(InputEvent::PointerMove(PixelPoint::new(x, y)));
    input
}

pub fn focused_count(handles: &[&ProbeHandle]) -> usize {
    handles.iter().filter(|h| h.borrow().focused).count()
}
