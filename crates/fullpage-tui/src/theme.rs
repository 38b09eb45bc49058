use ratatui::style::{Color, Modifier, Style};

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    /// Section card backgrounds, cycled by section index
    pub sections: [Color; 5],

    // Semantic colors
    pub accent: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            sections: [
                Color::Rgb(0x3c, 0x38, 0x36),
                Color::Rgb(0x34, 0x38, 0x1b),
                Color::Rgb(0x40, 0x21, 0x20),
                Color::Rgb(0x0e, 0x36, 0x3e),
                Color::Rgb(0x4f, 0x42, 0x25),
            ],
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
        }
    }
}

impl Theme {
    /// Background of a 1-based section
    pub fn section_bg(&self, section: usize) -> Color {
        let i = section.saturating_sub(1) % self.sections.len();
        self.sections[i]
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.fg1).add_modifier(Modifier::BOLD)
    }

    pub fn body_style(&self) -> Style {
        Style::default().fg(self.fg0)
    }

    pub fn bar_style(&self) -> Style {
        Style::default().fg(self.fg0).bg(self.bg2)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.grey1).bg(self.bg2)
    }
}
