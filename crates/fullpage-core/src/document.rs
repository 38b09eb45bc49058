//! Page-level side effects held while the engine is active.

/// Body-level hooks the engine drives
pub trait DocumentHost {
    /// Disable native page scrolling
    fn lock_scroll(&mut self);

    fn unlock_scroll(&mut self);

    /// Tag the document with the section being viewed
    fn set_section_marker(&mut self, marker: &str);

    fn clear_section_marker(&mut self);
}

/// Marker (CSS class) naming the section being viewed
#[inline]
pub fn section_marker(section: usize) -> String {
    format!("section-{}", section)
}

/// Document state kept in memory, for hosts without a real DOM
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    scroll_locked: bool,
    marker: Option<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }
}

impl DocumentHost for MemoryDocument {
    fn lock_scroll(&mut self) {
        self.scroll_locked = true;
    }

    fn unlock_scroll(&mut self) {
        self.scroll_locked = false;
    }

    fn set_section_marker(&mut self, marker: &str) {
        self.marker = Some(marker.to_string());
    }

    fn clear_section_marker(&mut self) {
        self.marker = None;
    }
}
