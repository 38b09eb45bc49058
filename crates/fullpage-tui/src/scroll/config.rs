//! L4 Atomic Layer: Configuration helpers for document scrolling

use std::time::Duration;

pub use fullpage_core::{EasingType, ScrollConfig};

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Check if smooth scrolling is effectively enabled
    fn is_smooth(&self) -> bool;

    /// Lines moved per scroll step
    fn step_lines(&self) -> i32;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }

    #[inline]
    fn step_lines(&self) -> i32 {
        self.scroll_lines.max(1) as i32
    }
}
