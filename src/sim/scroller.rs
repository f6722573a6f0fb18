//! Looping background layer
//!
//! Two tiles of `tile_width` sit side by side; when one slides fully off the left
//! edge it hops ahead of its twin. Speed ramps with run time like the obstacles.

use crate::tuning::ScrollerConfig;

#[derive(Debug, Clone)]
pub struct BackgroundScroller {
    config: ScrollerConfig,
    start_x: f32,
    x: f32,
    speed: f32,
}

impl BackgroundScroller {
    pub fn new(config: ScrollerConfig, start_x: f32) -> Self {
        let speed = config.base_scroll_speed;
        Self {
            config,
            start_x,
            x: start_x,
            speed,
        }
    }

    /// Advance one tick. Frozen unless `playing`.
    pub fn update(&mut self, dt: f32, elapsed: f32, playing: bool) {
        if !playing || !(dt > 0.0) {
            return;
        }

        self.speed =
            self.config.base_scroll_speed * (elapsed + 1.0).powf(self.config.speed_factor);
        self.x -= self.speed * dt;

        let width = self.config.tile_width;
        if self.x <= -width {
            // Hop ahead by whole periods in one step; a long hitch can carry
            // the tile past several widths. Lands in (-width, period - width].
            let period = 2.0 * width - self.config.seam_fix_offset;
            let r = (self.x + width).rem_euclid(period);
            self.x = if r > 0.0 { r - width } else { period - width };
        }
        if !self.x.is_finite() {
            self.x = self.start_x;
        }
    }

    /// Back to the starting offset
    pub fn on_play_started(&mut self) {
        self.x = self.start_x;
        self.speed = self.config.base_scroll_speed;
    }

    pub fn position(&self) -> f32 {
        self.x
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}
