use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for log files written while the TUI owns the terminal
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Deck file with section contents (built-in demo deck when unset)
    #[serde(default)]
    pub deck_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            deck_path: None,
        }
    }
}

/// Timing and threshold parameters of the transition engine.
///
/// The placement transitions must use `animation_duration_ms` as their own
/// duration, otherwise input unlocks before the visual transition ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Visual transition length in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Additional lockout after the animation finishes
    #[serde(default = "default_quiet_period")]
    pub quiet_period_ms: u64,
    /// Minimum vertical drag distance in pixels that counts as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: u32,
    /// Viewports narrower than this are treated as mobile
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint_px: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: default_animation_duration(),
            quiet_period_ms: default_quiet_period(),
            swipe_threshold_px: default_swipe_threshold(),
            mobile_breakpoint_px: default_mobile_breakpoint(),
        }
    }
}

impl TimingConfig {
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// Minimum time between two committed transitions
    #[inline]
    pub fn cooldown(&self) -> Duration {
        self.animation_duration() + self.quiet_period()
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.animation_duration_ms == 0 {
            return Err(crate::Error::Config(
                "timing.animation_duration_ms must be greater than 0".to_string(),
            ));
        }
        if self.swipe_threshold_px == 0 {
            return Err(crate::Error::Config(
                "timing.swipe_threshold_px must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a section transition is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Width of one terminal cell in pixels, used for the mobile breakpoint
    #[serde(default = "default_cell_width")]
    pub cell_width_px: u32,
    /// Height of one terminal cell in pixels, used for the swipe threshold
    #[serde(default = "default_cell_height")]
    pub cell_height_px: u32,
    /// Easing curve of section transitions
    #[serde(default)]
    pub transition_easing: EasingType,
    /// Pagination indicator settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Smooth line scrolling in mobile document flow
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            transition_easing: EasingType::default(),
            pagination: PaginationConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Locale strings for the pagination indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Label template, `{n}` is replaced by the section number
    #[serde(default = "default_label_template")]
    pub label_template: String,
    /// Per-section labels, overriding the template when present
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            label_template: default_label_template(),
            labels: Vec::new(),
        }
    }
}

impl PaginationConfig {
    /// Accessible label for a 1-based section index
    pub fn label_for(&self, index: usize) -> String {
        index
            .checked_sub(1)
            .and_then(|i| self.labels.get(i))
            .cloned()
            .unwrap_or_else(|| self.label_template.replace("{n}", &index.to_string()))
    }
}

/// Easing curve selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the duration
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Smooth scrolling of the plain document flow (mobile mode)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate line scrolling
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of one scroll animation in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for scroll animations
    #[serde(default)]
    pub easing: EasingType,
    /// Lines per scroll step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Space>"
///
/// Arrow keys, PageUp/PageDown, Space, Home and End are always bound; these
/// entries add aliases on top of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Alias for Down (next section)
    #[serde(default = "default_key_next_section")]
    pub next_section: String,
    /// Alias for Up (previous section)
    #[serde(default = "default_key_prev_section")]
    pub prev_section: String,
    /// Alias for Home (first section)
    #[serde(default = "default_key_first_section")]
    pub first_section: String,
    /// Alias for End (last section)
    #[serde(default = "default_key_last_section")]
    pub last_section: String,
    /// Open the section number prompt
    #[serde(default = "default_key_jump_prompt")]
    pub jump_prompt: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_section: default_key_next_section(),
            prev_section: default_key_prev_section(),
            first_section: default_key_first_section(),
            last_section: default_key_last_section(),
            jump_prompt: default_key_jump_prompt(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_section() -> String { "j".to_string() }
fn default_key_prev_section() -> String { "k".to_string() }
fn default_key_first_section() -> String { "gg".to_string() }
fn default_key_last_section() -> String { "G".to_string() }
fn default_key_jump_prompt() -> String { ":".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fullpage")
}

fn default_true() -> bool {
    true
}

fn default_animation_duration() -> u64 {
    1000
}

fn default_quiet_period() -> u64 {
    500
}

fn default_swipe_threshold() -> u32 {
    50
}

fn default_mobile_breakpoint() -> u32 {
    768
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_cell_width() -> u32 {
    8
}

fn default_cell_height() -> u32 {
    16
}

fn default_label_template() -> String {
    "Go to section {n}".to_string()
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when the file does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.timing.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/fullpage/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("fullpage")
            .join("config.toml")
    }

    /// Get the log directory (with tilde expansion)
    pub fn log_dir(&self) -> PathBuf {
        expand_tilde(&self.general.log_dir)
    }

    /// Get the deck path (with tilde expansion)
    pub fn deck_path(&self) -> Option<PathBuf> {
        self.general.deck_path.as_deref().map(expand_tilde)
    }
}
