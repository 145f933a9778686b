use trellis_core::{
    Color, DrawParams, MonospaceShaper, PixelBBox, PixelPoint, RenderContext,
    TextParams, TextShaper,
};

pub struct Hud {
    pub inspector_enabled: bool,
    pub hovered: Option<PixelBBox>,
    frame_count: u64,
    fps_smooth: f32,
    pub metrics: Option<Metrics>,
    shaper: MonospaceShaper,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: false,
            hovered: None,
            frame_count: 0,
            fps_smooth: 0.0,
            metrics: None,
            shaper: MonospaceShaper::new(7, 14),
        }
    }
    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
        log::debug!("inspector enabled: {}", self.inspector_enabled);
    }
    pub fn set_hovered(&mut self, r: Option<PixelBBox>) {
        self.hovered = r;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        self.fps_smooth
    }

    /// Status line as drawn in the top-left corner.
    pub fn status_line(&self) -> String {
        let mut parts = vec![
            format!("frame: {}", self.frame_count),
            format!("fps: {:.1}", self.fps_smooth),
        ];
        if let Some(m) = &self.metrics {
            parts.push(format!("update: {:.2} ms", m.update_ms));
            parts.push(format!("draws: {}", m.draw_calls));
        }
        parts.join("  |  ")
    }

    pub fn overlay(&mut self, ctx: &mut RenderContext<'_>, window: PixelBBox, dt: f32) {
        self.frame_count += 1;
        if dt > 0.0 {
            let fps = 1.0 / dt;
            // simple EMA
            let a = 0.2;
            self.fps_smooth = if self.fps_smooth == 0.0 {
                fps
            } else {
                (1.0 - a) * self.fps_smooth + a * fps
            };
        }

        let text = self.status_line();
        let size = self.shaper.measure(&text, None);
        ctx.text(
            PixelBBox::at(PixelPoint::new(8, 8), size),
            window,
            &text,
            &TextParams {
                color: Color::from_hex("#AAAAAA"),
                size_px: 14.0,
            },
        );

        if let Some(r) = self.hovered {
            outline(ctx, r, window, Color::from_hex("#44AAFF"), 2);
        }
    }
}

/// Four thin quads just inside `r`.
fn outline(ctx: &mut RenderContext<'_>, r: PixelBBox, window: PixelBBox, color: Color, width: u32) {
    let w = width.min(r.width() / 2).min(r.height() / 2) as i32;
    if w == 0 {
        return;
    }
    let params = DrawParams::solid(color);
    let edges = [
        PixelBBox::new(r.left, r.right, r.top, r.top + w),
        PixelBBox::new(r.left, r.right, r.bottom - w, r.bottom),
        PixelBBox::new(r.left, r.left + w, r.top + w, r.bottom - w),
        PixelBBox::new(r.right - w, r.right, r.top + w, r.bottom - w),
    ];
    for edge in edges {
        ctx.fill(edge, window, &params);
    }
}

#[derive(Clone, Debug, Default)]
pub struct Metrics {
    pub update_ms: f32,
    pub draw_calls: usize,
}

pub struct Inspector {
    pub hud: Hud,
}
impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self { hud: Hud::new() }
    }
    pub fn frame(&mut self, ctx: &mut RenderContext<'_>, window: PixelBBox, dt: f32) {
        if self.hud.inspector_enabled {
            self.hud.overlay(ctx, window, dt);
        }
    }
}
