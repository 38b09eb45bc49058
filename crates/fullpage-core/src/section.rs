//! Section descriptors and the validated deck handed to the engine at mount.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of sections the placement layout is defined for
pub const SECTION_COUNT: usize = 5;

/// Role of each section in the fixed layout, in index order
pub const LAYOUT_ROLES: [SectionRole; SECTION_COUNT] = [
    SectionRole::NormalFlow,
    SectionRole::NormalFlow,
    SectionRole::FixedSlideHorizontal,
    SectionRole::FixedSlideHorizontal,
    SectionRole::NormalFlow,
];

/// Which placement rule applies to a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRole {
    /// Stacked vertically inside the translating wrapper
    NormalFlow,
    /// Viewport-fixed, slid in independently of the wrapper
    FixedSlideHorizontal,
}

impl SectionRole {
    /// Role of a 1-based section index in the fixed layout
    pub fn for_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| LAYOUT_ROLES.get(i))
            .copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionRole::NormalFlow => "normal_flow",
            SectionRole::FixedSlideHorizontal => "fixed_slide_horizontal",
        }
    }
}

impl fmt::Display for SectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "normal_flow" | "normal" | "flow" => Ok(SectionRole::NormalFlow),
            "fixed_slide_horizontal" | "fixed" | "slide" => Ok(SectionRole::FixedSlideHorizontal),
            _ => Err(Error::UnknownRole(s.to_string())),
        }
    }
}

/// One section: its 1-based index, role and caller-owned content
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDescriptor<T> {
    pub index: usize,
    pub role: SectionRole,
    pub content: T,
}

/// Ordered, validated set of sections
#[derive(Debug, Clone, PartialEq)]
pub struct Deck<T> {
    sections: Vec<SectionDescriptor<T>>,
}

impl<T> Deck<T> {
    /// Build a deck from explicit roles and contents.
    ///
    /// Fails when the deck is empty or the roles do not follow the fixed
    /// flow/flow/fixed/fixed/flow layout.
    pub fn new(entries: Vec<(SectionRole, T)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidDeck(
                "a deck needs at least one section".to_string(),
            ));
        }
        if entries.len() != SECTION_COUNT {
            return Err(Error::InvalidDeck(format!(
                "the section layout needs exactly {} sections, got {}",
                SECTION_COUNT,
                entries.len()
            )));
        }

        let sections = entries
            .into_iter()
            .enumerate()
            .map(|(i, (role, content))| {
                let expected = LAYOUT_ROLES[i];
                if role != expected {
                    return Err(Error::InvalidDeck(format!(
                        "section {} must be {}, got {}",
                        i + 1,
                        expected,
                        role
                    )));
                }
                Ok(SectionDescriptor {
                    index: i + 1,
                    role,
                    content,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { sections })
    }

    /// Build a deck assigning the layout roles in order
    pub fn from_contents(contents: Vec<T>) -> Result<Self> {
        let entries = contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| {
                let role = LAYOUT_ROLES
                    .get(i)
                    .copied()
                    .unwrap_or(SectionRole::NormalFlow);
                (role, content)
            })
            .collect();
        Self::new(entries)
    }

    pub fn total_sections(&self) -> usize {
        self.sections.len()
    }

    /// Section by 1-based index
    pub fn get(&self, index: usize) -> Option<&SectionDescriptor<T>> {
        index.checked_sub(1).and_then(|i| self.sections.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionDescriptor<T>> {
        self.sections.iter()
    }
}
