//! L3 Molecular Layer: Section transition tween
//!
//! The engine switches placements instantly; this tweens every section from
//! where it is drawn now to where the new layout puts it, over the engine's
//! animation duration. All properties are interpolated together, z-index
//! included, and a section stays visible while either end of the tween shows
//! it.

use std::time::{Duration, Instant};

use fullpage_core::Layout;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete_at, lerp, progress_at};

/// Drawn position of one section at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionFrame {
    pub section: usize,
    /// On-screen top offset, percent of the viewport height
    pub top_percent: f64,
    /// Horizontal offset, percent of the viewport width
    pub left_percent: f64,
    pub z_index: i32,
    pub visible: bool,
}

impl SectionFrame {
    /// Frames for a layout at rest
    pub fn resting(layout: &Layout) -> Vec<SectionFrame> {
        layout
            .placements
            .iter()
            .map(|p| SectionFrame {
                section: p.section,
                top_percent: p.effective_top_percent(layout.wrapper_offset_percent) as f64,
                left_percent: p.left_vw as f64,
                z_index: p.z_index,
                visible: p.is_visible(),
            })
            .collect()
    }

    fn blend(&self, to: &SectionFrame, t: f64, finished: bool) -> SectionFrame {
        SectionFrame {
            section: to.section,
            top_percent: lerp(self.top_percent, to.top_percent, t),
            left_percent: lerp(self.left_percent, to.left_percent, t),
            z_index: lerp(self.z_index as f64, to.z_index as f64, t).round() as i32,
            visible: if finished {
                to.visible
            } else {
                self.visible || to.visible
            },
        }
    }
}

#[derive(Debug, Clone)]
struct Tween {
    start: Instant,
    from: Vec<SectionFrame>,
}

#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    target: Layout,
    resting: Vec<SectionFrame>,
    tween: Option<Tween>,
    duration: Duration,
    easing: EasingType,
}

impl TransitionAnimator {
    pub fn new(layout: Layout, duration: Duration, easing: EasingType) -> Self {
        Self {
            resting: SectionFrame::resting(&layout),
            target: layout,
            tween: None,
            duration,
            easing,
        }
    }

    /// Layout the tween is heading for
    pub fn target(&self) -> &Layout {
        &self.target
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Begin tweening toward `layout` from whatever is drawn at `now`
    pub fn start(&mut self, layout: Layout, now: Instant) {
        let from = self.frames_at(now);
        self.resting = SectionFrame::resting(&layout);
        self.target = layout;
        if self.duration.is_zero() || self.easing == EasingType::None {
            self.tween = None;
        } else {
            self.tween = Some(Tween { start: now, from });
        }
    }

    /// Show `layout` immediately
    pub fn snap(&mut self, layout: Layout) {
        self.resting = SectionFrame::resting(&layout);
        self.target = layout;
        self.tween = None;
    }

    /// Drop a finished tween; returns whether one is still running
    pub fn update(&mut self, now: Instant) -> bool {
        if let Some(tween) = &self.tween {
            if is_complete_at(tween.start, self.duration, now) {
                self.tween = None;
            }
        }
        self.tween.is_some()
    }

    /// Frames to draw at `now`, in paint order (lowest z first)
    pub fn frames_at(&self, now: Instant) -> Vec<SectionFrame> {
        let mut frames = match &self.tween {
            None => self.resting.clone(),
            Some(tween) => {
                let finished = is_complete_at(tween.start, self.duration, now);
                let t = self.easing.apply(progress_at(tween.start, self.duration, now));
                self.resting
                    .iter()
                    .map(|to| {
                        tween
                            .from
                            .iter()
                            .find(|f| f.section == to.section)
                            .map(|from| from.blend(to, t, finished))
                            .unwrap_or(*to)
                    })
                    .collect()
            }
        };
        frames.sort_by_key(|f| (f.z_index, f.section));
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(frames: &[SectionFrame], section: usize) -> SectionFrame {
        *frames.iter().find(|f| f.section == section).unwrap()
    }

    #[test]
    fn test_resting_frames_use_effective_offsets() {
        let frames = SectionFrame::resting(&Layout::for_section(3));
        assert_eq!(frame(&frames, 1).top_percent, -100.0);
        assert_eq!(frame(&frames, 2).top_percent, 0.0);
        assert_eq!(frame(&frames, 3).top_percent, 0.0);
        assert_eq!(frame(&frames, 5).top_percent, 100.0);
    }

    #[test]
    fn test_tween_midpoint_and_end() {
        let start = Instant::now();
        let mut animator = TransitionAnimator::new(
            Layout::for_section(1),
            Duration::from_millis(1000),
            EasingType::Linear,
        );
        animator.start(Layout::for_section(2), start);
        assert!(animator.is_animating());

        let mid = animator.frames_at(start + Duration::from_millis(500));
        assert!((frame(&mid, 2).top_percent - 50.0).abs() < 0.001);
        assert!((frame(&mid, 1).top_percent + 50.0).abs() < 0.001);

        assert!(!animator.update(start + Duration::from_millis(1000)));
        let end = animator.frames_at(start + Duration::from_millis(1000));
        assert_eq!(end, {
            let mut resting = SectionFrame::resting(&Layout::for_section(2));
            resting.sort_by_key(|f| (f.z_index, f.section));
            resting
        });
    }

    #[test]
    fn test_fixed_section_visible_while_sliding_out() {
        let start = Instant::now();
        let mut animator = TransitionAnimator::new(
            Layout::for_section(4),
            Duration::from_millis(1000),
            EasingType::Cubic,
        );
        animator.start(Layout::for_section(5), start);

        let mid = animator.frames_at(start + Duration::from_millis(300));
        assert!(frame(&mid, 4).visible);

        animator.update(start + Duration::from_millis(1000));
        let end = animator.frames_at(start + Duration::from_millis(1000));
        assert!(!frame(&end, 4).visible);
    }

    #[test]
    fn test_paint_order_puts_current_last() {
        let animator = TransitionAnimator::new(
            Layout::for_section(3),
            Duration::from_millis(1000),
            EasingType::Cubic,
        );
        let frames = animator.frames_at(Instant::now());
        assert_eq!(frames.last().map(|f| f.section), Some(3));
    }

    #[test]
    fn test_no_easing_snaps() {
        let mut animator = TransitionAnimator::new(
            Layout::for_section(1),
            Duration::from_millis(1000),
            EasingType::None,
        );
        animator.start(Layout::for_section(5), Instant::now());
        assert!(!animator.is_animating());
        assert_eq!(animator.target().current_section, 5);
    }
}
