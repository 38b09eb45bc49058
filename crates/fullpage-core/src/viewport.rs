//! Viewport classifier: desktop (engine active) vs mobile (plain flow).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportMode {
    /// Input is captured and sections are choreographed
    Desktop,
    /// Sections are ordinary blocks in native document scroll
    Mobile,
}

impl ViewportMode {
    #[inline]
    pub fn is_mobile(&self) -> bool {
        matches!(self, ViewportMode::Mobile)
    }
}

/// Mode switch reported by [`ViewportClassifier::observe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportChange {
    BecameMobile,
    BecameDesktop,
}

/// Classify a viewport width against the breakpoint
#[inline]
pub fn classify(width_px: u32, breakpoint_px: u32) -> ViewportMode {
    if width_px < breakpoint_px {
        ViewportMode::Mobile
    } else {
        ViewportMode::Desktop
    }
}

#[derive(Debug, Clone)]
pub struct ViewportClassifier {
    breakpoint_px: u32,
    width_px: u32,
    mode: ViewportMode,
}

impl ViewportClassifier {
    pub fn new(breakpoint_px: u32, width_px: u32) -> Self {
        Self {
            breakpoint_px,
            width_px,
            mode: classify(width_px, breakpoint_px),
        }
    }

    #[inline]
    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.mode.is_mobile()
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    /// Record a resize; returns the mode switch it caused, if any
    pub fn observe(&mut self, width_px: u32) -> Option<ViewportChange> {
        self.width_px = width_px;
        let mode = classify(width_px, self.breakpoint_px);
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        Some(match mode {
            ViewportMode::Mobile => ViewportChange::BecameMobile,
            ViewportMode::Desktop => ViewportChange::BecameDesktop,
        })
    }
}
