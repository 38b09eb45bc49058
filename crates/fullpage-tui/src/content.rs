//! Section content and deck files.
//!
//! A deck file is TOML with one `[[sections]]` table per section:
//!
//! ```toml
//! [[sections]]
//! title = "Welcome"
//! body = "Scroll down."
//! role = "normal_flow"   # optional, defaults to the layout's role
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use fullpage_core::section::LAYOUT_ROLES;
use fullpage_core::{Deck, SectionRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContent {
    pub title: String,
    pub body: String,
}

impl SectionContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    sections: Vec<DeckEntry>,
}

#[derive(Debug, Deserialize)]
struct DeckEntry {
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    role: Option<String>,
}

/// Parse a deck from TOML text
pub fn parse_deck(content: &str) -> Result<Deck<SectionContent>> {
    let file: DeckFile = toml::from_str(content).context("Invalid deck file")?;

    let mut entries = Vec::with_capacity(file.sections.len());
    for (i, entry) in file.sections.into_iter().enumerate() {
        let role = match entry.role {
            Some(role) => role.parse::<SectionRole>()?,
            // Extra sections fall through to the count check in Deck::new
            None => LAYOUT_ROLES
                .get(i)
                .copied()
                .unwrap_or(SectionRole::NormalFlow),
        };
        entries.push((role, SectionContent::new(entry.title, entry.body)));
    }

    Ok(Deck::new(entries)?)
}

/// Load a deck file from disk
pub fn load_deck(path: &Path) -> Result<Deck<SectionContent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read deck file {}", path.display()))?;
    parse_deck(&content)
}

/// Deck shown when no deck file is configured
pub fn demo_deck() -> Result<Deck<SectionContent>> {
    Ok(Deck::from_contents(vec![
        SectionContent::new(
            "Full-page scrolling",
            "One section fills the screen at a time.\n\n\
             Scroll the wheel, drag with the mouse, or press j / k, \
             PageUp / PageDown, Home / End.\n\
             Press : and a number to jump.",
        ),
        SectionContent::new(
            "Flow section",
            "Sections 1, 2 and 5 move with the page wrapper.\n\n\
             Inputs that arrive while a transition runs, or during the quiet \
             period after it, are dropped rather than queued.",
        ),
        SectionContent::new(
            "Fixed slide",
            "Sections 3 and 4 are pinned to the viewport.\n\n\
             Advancing from here slides this card away to the left and \
             reveals the next one underneath.",
        ),
        SectionContent::new(
            "Underneath",
            "This section was waiting below the slide.\n\n\
             The diamonds on the right jump straight to any section.",
        ),
        SectionContent::new(
            "The end",
            "The last section scrolls in with the wrapper again.\n\n\
             Narrow the terminal below the mobile breakpoint to read \
             everything as one ordinary scrolling document.",
        ),
    ])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE: &str = r#"
[[sections]]
title = "One"
body = "first"

[[sections]]
title = "Two"

[[sections]]
title = "Three"
role = "fixed"

[[sections]]
title = "Four"
role = "fixed_slide_horizontal"

[[sections]]
title = "Five"
role = "normal_flow"
"#;

    #[test]
    fn test_parse_deck() {
        let deck = parse_deck(FIVE).unwrap();
        assert_eq!(deck.total_sections(), 5);
        let first = deck.get(1).unwrap();
        assert_eq!(first.content.title, "One");
        assert_eq!(first.content.body, "first");
        assert_eq!(deck.get(3).unwrap().role, SectionRole::FixedSlideHorizontal);
        assert_eq!(deck.get(2).unwrap().content.body, "");
    }

    #[test]
    fn test_rejects_wrong_role() {
        let bad = FIVE.replacen("role = \"fixed\"", "role = \"normal\"", 1);
        assert!(parse_deck(&bad).is_err());

        let unknown = FIVE.replacen("role = \"fixed\"", "role = \"diagonal\"", 1);
        assert!(parse_deck(&unknown).is_err());
    }

    #[test]
    fn test_rejects_wrong_count() {
        assert!(parse_deck("").is_err());
        let six = format!("{}\n[[sections]]\ntitle = \"Six\"\n", FIVE);
        assert!(parse_deck(&six).is_err());
    }

    #[test]
    fn test_demo_deck_is_valid() {
        let deck = demo_deck().unwrap();
        assert_eq!(deck.total_sections(), 5);
        assert!(deck.iter().all(|s| !s.content.title.is_empty()));
    }
}
