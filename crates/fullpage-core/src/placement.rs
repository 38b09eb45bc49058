//! Section placement engine.
//!
//! A pure mapping from `(section, current_section)` to box positioning. The
//! flow sections (1, 2, 5) sit at fixed offsets inside a wrapper that is
//! translated vertically; the fixed sections (3, 4) are viewport-fixed and
//! carry a counter-transform whenever the wrapper sits at -100%.
//!
//! Percentages are of the viewport height for vertical values and of the
//! viewport width (`vw`) for horizontal values.

use std::time::Duration;

use serde::Serialize;

use crate::section::{SectionRole, SECTION_COUNT};

/// Z-index of the fixed sections while they are out of the viewing range
const Z_PARKED: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    /// Positioned inside the translating wrapper
    Absolute,
    /// Positioned against the viewport
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Concrete positioning of one section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub section: usize,
    pub role: SectionRole,
    pub positioning: Positioning,
    /// Top offset in percent of the viewport height
    pub top_percent: i32,
    /// Horizontal offset in `vw`
    pub left_vw: i32,
    pub z_index: i32,
    pub visibility: Visibility,
    /// Compensating `translateY` in percent, 0 when none is applied
    pub counter_translate_percent: i32,
}

/// Vertical offset of the wrapper holding the flow sections
pub fn wrapper_offset_percent(current_section: usize) -> i32 {
    match current_section {
        0 | 1 => 0,
        // Sections 3 and 4 are drawn outside the wrapper, so it stays put
        2..=4 => -100,
        _ => -200,
    }
}

/// Placement of `section` while `current_section` is showing.
///
/// Returns `None` for indices outside the five-section layout.
pub fn place(section: usize, current_section: usize) -> Option<Placement> {
    let role = SectionRole::for_index(section)?;
    let placement = match role {
        SectionRole::NormalFlow => place_flow(section),
        SectionRole::FixedSlideHorizontal => place_fixed(section, current_section),
    };
    Some(placement)
}

fn place_flow(section: usize) -> Placement {
    let (top_percent, z_index) = match section {
        1 => (0, 10),
        // Must cover the fixed sections' resting layer while showing
        2 => (100, 12),
        _ => (200, 10),
    };
    Placement {
        section,
        role: SectionRole::NormalFlow,
        positioning: Positioning::Absolute,
        top_percent,
        left_vw: 0,
        z_index,
        visibility: Visibility::Visible,
        counter_translate_percent: 0,
    }
}

fn place_fixed(section: usize, current_section: usize) -> Placement {
    let compensated = wrapper_offset_percent(current_section) == -100;
    let in_range = matches!(current_section, 3 | 4);

    let (left_vw, z_index) = match section {
        3 => {
            let left = if current_section == 3 { 0 } else { -100 };
            let z = if in_range { 20 } else { Z_PARKED };
            (left, z)
        }
        _ => {
            let z = match current_section {
                3 => 7,
                4 => 15,
                _ => Z_PARKED,
            };
            (0, z)
        }
    };

    Placement {
        section,
        role: SectionRole::FixedSlideHorizontal,
        positioning: Positioning::Fixed,
        top_percent: 0,
        left_vw,
        z_index,
        visibility: if in_range {
            Visibility::Visible
        } else {
            Visibility::Hidden
        },
        counter_translate_percent: if compensated { 100 } else { 0 },
    }
}

impl Placement {
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Where the section ends up vertically on screen, in percent.
    ///
    /// Fixed sections inherit the wrapper's transform, which the counter
    /// transform cancels; flow sections move with the wrapper. Hosts that
    /// do not share the browser's containing-block behaviour draw from this.
    pub fn effective_top_percent(&self, wrapper_offset: i32) -> i32 {
        wrapper_offset + self.top_percent + self.counter_translate_percent
    }

    /// Whether the section covers the viewport origin
    pub fn is_on_screen(&self, wrapper_offset: i32) -> bool {
        self.is_visible() && self.effective_top_percent(wrapper_offset) == 0 && self.left_vw == 0
    }

    /// CSS declarations a browser host applies to the section element
    pub fn css(&self, transition: Duration) -> String {
        let position = match self.positioning {
            Positioning::Absolute => "absolute",
            Positioning::Fixed => "fixed",
        };
        let visibility = match self.visibility {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        };
        let transform = if self.counter_translate_percent == 0 {
            "none".to_string()
        } else {
            format!("translateY({}%)", self.counter_translate_percent)
        };
        let left = if self.left_vw == 0 {
            "0".to_string()
        } else {
            format!("{}vw", self.left_vw)
        };
        format!(
            "position: {}; top: {}%; left: {}; z-index: {}; visibility: {}; transform: {}; transition: all {}ms ease;",
            position,
            self.top_percent,
            left,
            self.z_index,
            visibility,
            transform,
            transition.as_millis()
        )
    }
}

/// Placement of every section for one value of `current_section`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub current_section: usize,
    pub wrapper_offset_percent: i32,
    pub placements: Vec<Placement>,
}

impl Layout {
    pub fn for_section(current_section: usize) -> Self {
        let placements = (1..=SECTION_COUNT)
            .filter_map(|section| place(section, current_section))
            .collect();
        Self {
            current_section,
            wrapper_offset_percent: wrapper_offset_percent(current_section),
            placements,
        }
    }

    pub fn placement(&self, section: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.section == section)
    }

    /// Sections covering the viewport, topmost first
    pub fn visible_stack(&self) -> Vec<&Placement> {
        let mut stack: Vec<&Placement> = self
            .placements
            .iter()
            .filter(|p| p.is_on_screen(self.wrapper_offset_percent))
            .collect();
        stack.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        stack
    }

    /// Section the viewer actually sees
    pub fn top_section(&self) -> Option<usize> {
        self.visible_stack().first().map(|p| p.section)
    }

    /// CSS declarations for the wrapper element
    pub fn wrapper_css(&self, transition: Duration) -> String {
        format!(
            "transform: translateY({}%); transition: transform {}ms ease;",
            self.wrapper_offset_percent,
            transition.as_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(layout: &Layout, section: usize) -> Placement {
        *layout.placement(section).unwrap()
    }

    #[test]
    fn test_wrapper_offsets() {
        assert_eq!(wrapper_offset_percent(1), 0);
        assert_eq!(wrapper_offset_percent(2), -100);
        assert_eq!(wrapper_offset_percent(3), -100);
        assert_eq!(wrapper_offset_percent(4), -100);
        assert_eq!(wrapper_offset_percent(5), -200);
    }

    #[test]
    fn test_flow_sections_are_static() {
        for current in 1..=5 {
            let s1 = place(1, current).unwrap();
            let s2 = place(2, current).unwrap();
            let s5 = place(5, current).unwrap();
            assert_eq!((s1.top_percent, s1.z_index), (0, 10));
            assert_eq!((s2.top_percent, s2.z_index), (100, 12));
            assert_eq!((s5.top_percent, s5.z_index), (200, 10));
            assert_eq!(s2.positioning, Positioning::Absolute);
        }
    }

    #[test]
    fn test_section_one() {
        let layout = Layout::for_section(1);
        assert_eq!(layout.wrapper_offset_percent, 0);
        for section in [3, 4] {
            let p = fixed(&layout, section);
            assert!(!p.is_visible());
            assert_eq!(p.counter_translate_percent, 0);
        }
    }

    #[test]
    fn test_section_two() {
        let layout = Layout::for_section(2);
        assert_eq!(layout.wrapper_offset_percent, -100);
        for section in [3, 4] {
            let p = fixed(&layout, section);
            assert!(!p.is_visible());
            assert_eq!(p.counter_translate_percent, 100);
        }
        assert_eq!(fixed(&layout, 3).left_vw, -100);
    }

    #[test]
    fn test_section_three() {
        let layout = Layout::for_section(3);
        assert_eq!(layout.wrapper_offset_percent, -100);

        let s3 = fixed(&layout, 3);
        assert_eq!(s3.left_vw, 0);
        assert_eq!(s3.z_index, 20);
        assert!(s3.is_visible());
        assert_eq!(s3.counter_translate_percent, 100);

        let s4 = fixed(&layout, 4);
        assert!(s4.is_visible());
        assert_eq!(s4.z_index, 7);
        assert_eq!(s4.counter_translate_percent, 100);
    }

    #[test]
    fn test_section_four() {
        let layout = Layout::for_section(4);
        assert_eq!(layout.wrapper_offset_percent, -100);

        let s3 = fixed(&layout, 3);
        assert_eq!(s3.left_vw, -100);
        assert_eq!(s3.counter_translate_percent, 100);

        let s4 = fixed(&layout, 4);
        assert_eq!(s4.left_vw, 0);
        assert_eq!(s4.z_index, 15);
        assert_eq!(s4.counter_translate_percent, 100);
    }

    #[test]
    fn test_section_five() {
        let layout = Layout::for_section(5);
        assert_eq!(layout.wrapper_offset_percent, -200);
        for section in [3, 4] {
            let p = fixed(&layout, section);
            assert!(!p.is_visible());
            assert_eq!(p.counter_translate_percent, 0);
            assert_eq!(p.z_index, Z_PARKED);
        }
    }

    #[test]
    fn test_top_section_matches_current() {
        for current in 1..=5 {
            assert_eq!(Layout::for_section(current).top_section(), Some(current));
        }
    }

    #[test]
    fn test_section_two_covers_four_at_three() {
        let layout = Layout::for_section(3);
        let stack: Vec<usize> = layout.visible_stack().iter().map(|p| p.section).collect();
        assert_eq!(stack, vec![3, 2, 4]);
    }

    #[test]
    fn test_unknown_section() {
        assert!(place(0, 1).is_none());
        assert!(place(6, 1).is_none());
    }

    #[test]
    fn test_css_output() {
        let css = place(3, 2).unwrap().css(Duration::from_millis(1000));
        assert!(css.contains("position: fixed"));
        assert!(css.contains("left: -100vw"));
        assert!(css.contains("transform: translateY(100%)"));
        assert!(css.contains("visibility: hidden"));
        assert!(css.contains("1000ms"));

        let wrapper = Layout::for_section(5).wrapper_css(Duration::from_millis(1000));
        assert!(wrapper.contains("translateY(-200%)"));
    }
}
