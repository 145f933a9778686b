//! Frame driver for Trellis widget trees.
//!
//! The host owns the window, the event source and the renderer. Once per
//! displayed frame it hands the [`Runner`] the elapsed time, the window size
//! and the events collected since the last frame; the runner lays out,
//! routes input and draws, then returns whatever action bubbled out.
//!
//! ```rust
//! use trellis_core::*;
//! use trellis_platform::Runner;
//! use trellis_ui::ColorRect;
//!
//! let mut runner: Runner<()> = Runner::new(ColorRect::new(Color::BLACK));
//! let mut scene = Scene::default();
//! let out = runner.step(0.016, PixelSize::new(64, 64), [], &mut scene).unwrap();
//! assert!(out.action.is_none());
//! assert_eq!(scene.quads().count(), 1);
//! ```

pub mod clock;

pub use clock::FrameClock;

use std::cell::RefMut;

use trellis_core::*;
use trellis_devtools::{Inspector, Metrics};
use trellis_ui::{DragLayer, PopupLayer, Shared, Stack, StackLayout};
use web_time::Instant;

/// What a frame produced for the host.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput<A> {
    pub action: Option<A>,
    pub cursor: Option<CursorStyle>,
}

/// Owns the widget tree and the input snapshot.
///
/// The tree is the host's content with a popup layer and a drag layer stacked
/// on top of it. Both layers are reachable through [`Runner::popups`] and
/// [`Runner::drags`].
pub struct Runner<A> {
    root: Stack<A>,
    popups: Shared<PopupLayer<A>>,
    drags: Shared<DragLayer<A>>,
    input: InputState,
    inspector: Inspector,
}

impl<A: 'static> Runner<A> {
    pub fn new(content: impl Widget<A> + 'static) -> Self {
        Self::with_theme(content, &Theme::default())
    }

    /// `theme` styles the runner's own layers. Content built by the host
    /// takes the same theme through the containers' `with_theme`.
    pub fn with_theme(content: impl Widget<A> + 'static, theme: &Theme) -> Self {
        let popups = Shared::new(PopupLayer::new().with_theme(theme));
        let drags = Shared::new(DragLayer::new());
        let root = Stack::new()
            .with_name("root")
            .with(content, StackLayout::Fill)
            .with(popups.clone(), StackLayout::Fill)
            .with(drags.clone(), StackLayout::Fill);
        Self {
            root,
            popups,
            drags,
            input: InputState::new(),
            inspector: Inspector::new(),
        }
    }

    pub fn popups(&self) -> RefMut<'_, PopupLayer<A>> {
        self.popups.borrow_mut()
    }

    pub fn drags(&self) -> RefMut<'_, DragLayer<A>> {
        self.drags.borrow_mut()
    }

    /// Input snapshot of the last frame.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn inspector_mut(&mut self) -> &mut Inspector {
        &mut self.inspector
    }

    /// Runs one frame: update, input, render, in that order.
    ///
    /// The frame's events always reach the input snapshot. A failed `update`
    /// skips routing and rendering for the frame and is returned to the host.
    pub fn step(
        &mut self,
        dt: f32,
        window_size: PixelSize,
        events: impl IntoIterator<Item = InputEvent>,
        renderer: &mut dyn Renderer,
    ) -> Result<FrameOutput<A>> {
        let window = PixelBBox::from_size(window_size);

        // input survives a failed update
        self.input.start_frame();
        for event in events {
            self.input.push_input(event);
        }

        let t0 = Instant::now();
        if let Err(e) = self.root.update(window_size, dt) {
            log::warn!("frame update failed: {e}");
            return Err(e);
        }
        let update_ms = t0.elapsed().as_secs_f32() * 1000.0;

        let response = self.root.set_input_state(window, window, &self.input);
        if response.wants_focus {
            self.root.set_focused(true);
        }

        let mut counter = CountingRenderer {
            inner: renderer,
            draws: 0,
        };
        self.root
            .render(&mut RenderContext::new(&mut counter), window, window);
        self.inspector.hud.metrics = Some(Metrics {
            update_ms,
            draw_calls: counter.draws,
        });
        self.inspector
            .frame(&mut RenderContext::new(&mut counter), window, dt);

        Ok(FrameOutput {
            action: response.action,
            cursor: response.cursor,
        })
    }
}

struct CountingRenderer<'a> {
    inner: &'a mut dyn Renderer,
    draws: usize,
}

impl Renderer for CountingRenderer<'_> {
    fn draw_quad(&mut self, transform: &Transform, params: &DrawParams) {
        self.draws += 1;
        self.inner.draw_quad(transform, params);
    }

    fn draw_text(&mut self, transform: &Transform, text: &str, params: &TextParams) {
        self.draws += 1;
        self.inner.draw_text(transform, text, params);
    }

    fn set_scissor(&mut self, rect: Option<PixelBBox>) {
        self.inner.set_scissor(rect);
    }
}
