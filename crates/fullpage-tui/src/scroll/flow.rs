//! L3 Molecular Layer: Line scroller for the stacked mobile document
//!
//! In mobile layout the sections are drawn one after another as an ordinary
//! document and the terminal scrolls it line by line, the way a browser
//! scrolls a page natively. Deltas arriving within one frame are batched and
//! eased toward the new target.

use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete_at, lerp_u16, progress_at};

#[derive(Debug, Clone)]
struct Glide {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

#[derive(Debug, Clone, Default)]
pub struct FlowScroller {
    glide: Option<Glide>,
    config: ScrollConfig,
    offset: u16,
    pending_delta: i32,
}

impl FlowScroller {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.glide.is_some()
    }

    /// Whether the next frames should be drawn at animation rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.glide.is_some() || self.pending_delta != 0
    }

    /// Current visible line offset
    #[inline]
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Offset the scroller is heading for
    pub fn target(&self) -> u16 {
        self.glide.as_ref().map(|g| g.to).unwrap_or(self.offset)
    }

    /// Jump without animating
    pub fn set_offset(&mut self, offset: u16) {
        self.glide = None;
        self.pending_delta = 0;
        self.offset = offset;
    }

    /// Queue a scroll of `delta` lines (positive is down)
    pub fn scroll_by(&mut self, delta: i32, max_offset: u16) {
        if self.config.is_smooth() {
            self.pending_delta += delta;
        } else {
            self.offset = clamp_offset(self.offset as i32 + delta, max_offset);
            self.glide = None;
        }
    }

    pub fn step_down(&mut self, max_offset: u16) {
        self.scroll_by(self.config.step_lines(), max_offset);
    }

    pub fn step_up(&mut self, max_offset: u16) {
        self.scroll_by(-self.config.step_lines(), max_offset);
    }

    pub fn page_down(&mut self, viewport_height: u16, max_offset: u16) {
        self.scroll_by(viewport_height.max(1) as i32, max_offset);
    }

    pub fn page_up(&mut self, viewport_height: u16, max_offset: u16) {
        self.scroll_by(-(viewport_height.max(1) as i32), max_offset);
    }

    /// Glide to an absolute line, e.g. the heading of a section
    pub fn scroll_to(&mut self, target: u16, max_offset: u16, now: Instant) {
        let target = target.min(max_offset);
        self.pending_delta = 0;
        if !self.config.is_smooth() {
            self.set_offset(target);
            return;
        }
        self.start_glide(target, now);
    }

    /// Advance the glide and return the offset to draw
    pub fn update(&mut self, max_offset: u16, now: Instant) -> u16 {
        if self.pending_delta != 0 {
            let target = clamp_offset(self.target() as i32 + self.pending_delta, max_offset);
            self.pending_delta = 0;
            self.start_glide(target, now);
        }

        if let Some(glide) = &self.glide {
            if is_complete_at(glide.start, glide.duration, now) {
                self.offset = glide.to;
                self.glide = None;
            } else {
                let t = glide.easing.apply(progress_at(glide.start, glide.duration, now));
                self.offset = lerp_u16(glide.from, glide.to, t);
            }
        }

        self.offset = self.offset.min(max_offset);
        self.offset
    }

    fn start_glide(&mut self, target: u16, now: Instant) {
        if target == self.offset {
            self.glide = None;
            return;
        }
        self.glide = Some(Glide {
            start: now,
            from: self.offset,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }
}

fn clamp_offset(value: i32, max_offset: u16) -> u16 {
    value.clamp(0, max_offset as i32) as u16
}
