use web_time::Instant;

/// Measures `dt` between displayed frames.
///
/// The first tick reports zero. Long stalls (a suspended tab, a debugger
/// break) are capped at `max_dt` so animations don't jump.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            max_dt: 0.1,
        }
    }

    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt;
        self
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        dt.min(self.max_dt)
    }

    /// Forget the previous frame; the next tick reports zero again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
