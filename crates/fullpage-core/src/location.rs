//! Address fragment (`#<n>`) that seeds and mirrors the current section.

use url::Url;

use crate::Result;

const DEFAULT_URL: &str = "fullpage://deck/";

/// The host's address bar
pub trait Location {
    /// Current fragment without the leading `#`
    fn fragment(&self) -> Option<String>;

    /// Replace the fragment in place (history replace, never a navigation)
    fn replace_fragment(&mut self, fragment: &str);
}

/// Parse a fragment into an in-range section index.
///
/// Accepts `"#4"` and `"4"`; anything else, including out-of-range numbers,
/// yields `None`.
pub fn parse_section_fragment(fragment: &str, total_sections: usize) -> Option<usize> {
    let digits = fragment.trim().trim_start_matches('#');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let section: usize = digits.parse().ok()?;
    (1..=total_sections).contains(&section).then_some(section)
}

/// Fragment written for a section
#[inline]
pub fn section_fragment(section: usize) -> String {
    section.to_string()
}

/// In-memory address backed by a parsed URL
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    url: Url,
    replacements: usize,
}

impl MemoryLocation {
    pub fn parse(url: &str) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
            replacements: 0,
        })
    }

    /// Default page address with an optional starting fragment
    pub fn with_fragment(fragment: Option<&str>) -> Result<Self> {
        let mut location = Self::parse(DEFAULT_URL)?;
        if let Some(fragment) = fragment {
            location
                .url
                .set_fragment(Some(fragment.trim_start_matches('#')));
        }
        Ok(location)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Number of fragment replacements so far
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> Option<String> {
        self.url.fragment().map(str::to_string)
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.url.set_fragment(Some(fragment));
        self.replacements += 1;
    }
}
