//! Text leaf backed by a [`TextShaper`].

use std::rc::Rc;

use trellis_core::*;

enum LabelText {
    Static,
    Retrieved(Box<dyn Retriever<String>>),
}

pub struct Label {
    source: LabelText,
    text: String,
    shaper: Rc<dyn TextShaper>,
    params: TextParams,
    wrap: bool,
    size: PixelSize,
}

impl Label {
    pub fn new(text: impl Into<String>, shaper: Rc<dyn TextShaper>) -> Self {
        Self {
            source: LabelText::Static,
            text: text.into(),
            shaper,
            params: TextParams {
                color: Color::WHITE,
                size_px: 16.0,
            },
            wrap: false,
            size: PixelSize::ZERO,
        }
    }

    /// Text pulled from application state on every `update`.
    pub fn retrieved(text: impl Retriever<String> + 'static, shaper: Rc<dyn TextShaper>) -> Self {
        Self {
            source: LabelText::Retrieved(Box::new(text)),
            ..Self::new(String::new(), shaper)
        }
    }

    pub fn with_params(mut self, params: TextParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.params.color = color;
        self
    }

    /// Wrap at the offered width instead of only at explicit newlines.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl<A> Widget<A> for Label {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, _dt: f32) -> Result<()> {
        if let LabelText::Retrieved(r) = &self.source {
            self.text = r.get();
        }
        let wrap_width = self.wrap.then_some(available.width);
        self.size = self.shaper.measure(&self.text, wrap_width);
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        if self.text.is_empty() {
            return;
        }
        let bounds = PixelBBox::at(widget_bounds.origin(), self.size);
        ctx.text(bounds, window_bounds, &self.text, &self.params);
    }

    fn debug_name(&self) -> Option<&str> {
        Some("label")
    }
}
