//! Pagination indicator: one diamond marker per section.

use serde::Serialize;

use crate::config::PaginationConfig;
use crate::input::Signal;
use crate::ScrollState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerVariant {
    /// Enlarged marker of the current section
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub index: usize,
    pub variant: MarkerVariant,
    /// Accessible label from the caller's locale strings
    pub label: String,
}

impl Marker {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.variant == MarkerVariant::Active
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaginationIndicator {
    labels: PaginationConfig,
}

impl PaginationIndicator {
    pub fn new(labels: PaginationConfig) -> Self {
        Self { labels }
    }

    /// Markers to draw; empty in mobile mode
    pub fn markers(&self, state: &ScrollState) -> Vec<Marker> {
        if state.is_mobile {
            return Vec::new();
        }
        (1..=state.total_sections)
            .map(|index| Marker {
                index,
                variant: if index == state.current_section {
                    MarkerVariant::Active
                } else {
                    MarkerVariant::Inactive
                },
                label: self.labels.label_for(index),
            })
            .collect()
    }

    /// Request issued by clicking the marker for `index`
    #[inline]
    pub fn click(&self, index: usize) -> Signal {
        Signal::GoTo(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(current_section: usize, is_mobile: bool) -> ScrollState {
        ScrollState {
            current_section,
            total_sections: 5,
            is_animating: false,
            is_mobile,
        }
    }

    #[test]
    fn test_one_active_marker() {
        let indicator = PaginationIndicator::default();
        let markers = indicator.markers(&state(3, false));

        assert_eq!(markers.len(), 5);
        let active: Vec<usize> = markers
            .iter()
            .filter(|m| m.is_active())
            .map(|m| m.index)
            .collect();
        assert_eq!(active, vec![3]);
        assert_eq!(markers[0].label, "Go to section 1");
    }

    #[test]
    fn test_hidden_on_mobile() {
        let indicator = PaginationIndicator::default();
        assert!(indicator.markers(&state(2, true)).is_empty());
    }

    #[test]
    fn test_click_targets_marker() {
        let indicator = PaginationIndicator::default();
        assert_eq!(indicator.click(4), Signal::GoTo(4));
    }
}
