use std::sync::Arc;

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use fullpage_core::clock::{Clock, SystemClock};
use fullpage_core::config::UiConfig;
use fullpage_core::document::MemoryDocument;
use fullpage_core::input::{FocusTarget, Key, RawInput};
use fullpage_core::location::MemoryLocation;
use fullpage_core::viewport::ViewportMode;
use fullpage_core::{AppConfig, Deck, Engine, EngineBuilder, InputResponse, Layout, Outcome, SectionEvent};

use crate::content::SectionContent;
use crate::input::Action;
use crate::scroll::{FlowScroller, SectionFrame, TransitionAnimator};
use crate::theme::Theme;
use crate::widgets::{DocumentFlowWidget, FlowMetrics, PaginationWidget};

/// Longest section number accepted by the jump prompt
const PROMPT_MAX_DIGITS: usize = 3;

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Section number prompt with the digits typed so far
    JumpPrompt(String),
}

/// Terminal size in cells plus the pixel metrics used to feed the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub cell_width_px: u32,
    pub cell_height_px: u32,
}

impl Viewport {
    /// Viewport with the configured cell size
    pub fn from_cells(cols: u16, rows: u16, ui: &UiConfig) -> Self {
        Self {
            cols,
            rows,
            cell_width_px: ui.cell_width_px.max(1),
            cell_height_px: ui.cell_height_px.max(1),
        }
    }

    /// Viewport using the terminal's reported pixel size when it has one
    pub fn measure(cols: u16, rows: u16, ui: &UiConfig) -> Self {
        let mut viewport = Self::from_cells(cols, rows, ui);
        if let Ok(size) = crossterm::terminal::window_size() {
            if size.width > 0 && size.height > 0 && cols > 0 && rows > 0 {
                viewport.cell_width_px = (size.width as u32 / cols as u32).max(1);
                viewport.cell_height_px = (size.height as u32 / rows as u32).max(1);
            }
        }
        viewport
    }

    pub fn width_px(&self) -> u32 {
        self.cols as u32 * self.cell_width_px
    }

    /// Pixel position of the centre of a cell
    pub fn to_px(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5) * self.cell_width_px as f64,
            (row as f64 + 0.5) * self.cell_height_px as f64,
        )
    }

    /// Area the sections are drawn in, above the status bar
    pub fn stage(&self) -> Rect {
        Rect::new(0, 0, self.cols, self.rows.saturating_sub(1))
    }
}

pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub deck: Deck<SectionContent>,
    pub engine: Engine<MemoryDocument, MemoryLocation>,
    pub mode: Mode,
    pub pending_key: Option<char>,
    pub should_quit: bool,
    pub status_message: Option<String>,
    viewport: Viewport,
    transition: TransitionAnimator,
    flow: FlowScroller,
    flow_metrics: FlowMetrics,
    /// Last row of an in-progress drag, for native scrolling in mobile mode
    drag_row: Option<u16>,
    clock: Arc<dyn Clock>,
    events: mpsc::UnboundedReceiver<SectionEvent>,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        deck: Deck<SectionContent>,
        location: MemoryLocation,
        viewport: Viewport,
    ) -> Result<Self> {
        Self::with_clock(config, deck, location, viewport, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: Arc<AppConfig>,
        deck: Deck<SectionContent>,
        location: MemoryLocation,
        viewport: Viewport,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let (tx, events) = mpsc::unbounded_channel();
        let engine = EngineBuilder::new(config.timing)
            .with_total_sections(deck.total_sections())
            .with_viewport_width(viewport.width_px())
            .with_pagination(config.ui.pagination.clone())
            .with_clock(clock.clone())
            .with_event_sender(tx)
            .mount(MemoryDocument::new(), location)?;

        let transition = TransitionAnimator::new(
            engine.layout(),
            config.timing.animation_duration(),
            config.ui.transition_easing,
        );
        let flow_metrics = DocumentFlowWidget::measure(&deck, viewport.cols);
        let mut flow = FlowScroller::new(config.ui.scroll.clone());
        if engine.state().is_mobile {
            flow.set_offset(flow_metrics.offset_of(engine.current_section()).unwrap_or(0));
        }

        Ok(Self {
            theme: Theme::default(),
            deck,
            engine,
            mode: Mode::Normal,
            pending_key: None,
            should_quit: false,
            status_message: None,
            viewport,
            transition,
            flow,
            flow_metrics,
            drag_row: None,
            clock,
            events,
            config,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.engine.state().is_mobile
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::JumpPrompt(_))
    }

    /// Element the keyboard channel sees as focused
    pub fn focus_target(&self) -> FocusTarget {
        if self.is_input_mode() {
            FocusTarget::TextInput
        } else {
            FocusTarget::Document
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Section frames to draw now
    pub fn frames(&self) -> Vec<SectionFrame> {
        self.transition.frames_at(self.clock.now())
    }

    /// Line offset of the mobile document
    pub fn flow_offset(&self) -> u16 {
        self.flow.offset()
    }

    fn max_flow_offset(&self) -> u16 {
        self.flow_metrics.max_offset(self.viewport.stage().height)
    }

    /// Section whose pagination marker is under the cell, if markers are shown
    pub fn marker_at(&self, col: u16, row: u16) -> Option<usize> {
        let total = self.engine.markers().len();
        PaginationWidget::marker_at(self.viewport.stage(), total, col, row)
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.transition.is_animating() || self.flow.needs_update()
    }

    pub fn apply_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::PendingG => self.pending_key = Some('g'),
            Action::Page(key) => {
                let focus = self.focus_target();
                let response = self.engine.handle_input(&RawInput::Key { key, focus });
                if self.native_scroll_allowed(response) && !focus.is_text_entry() {
                    self.native_key_scroll(key);
                }
            }
            Action::Wheel(notches) => {
                let response = self.engine.handle_input(&RawInput::Wheel {
                    delta_y: notches as f64,
                });
                if self.native_scroll_allowed(response) {
                    let max = self.max_flow_offset();
                    self.flow.scroll_by(-notches * 3, max);
                }
            }
            Action::TouchStart { col, row } => {
                self.drag_row = Some(row);
                let (x, y) = self.viewport.to_px(col, row);
                self.engine.handle_input(&RawInput::TouchStart { x, y });
            }
            Action::TouchMove { col, row } => {
                let (x, y) = self.viewport.to_px(col, row);
                let response = self.engine.handle_input(&RawInput::TouchMove { x, y });
                let last_row = self.drag_row.replace(row);
                if let Some(last_row) = last_row {
                    if self.native_scroll_allowed(response) {
                        // Content follows the finger
                        let max = self.max_flow_offset();
                        self.flow.scroll_by(last_row as i32 - row as i32, max);
                    }
                }
            }
            Action::TouchEnd => {
                self.drag_row = None;
                self.engine.handle_input(&RawInput::TouchEnd);
            }
            Action::ClickMarker(section) => {
                let outcome = self.engine.click_marker(section);
                self.log_outcome("marker", outcome);
            }
            Action::OpenJumpPrompt => {
                self.mode = Mode::JumpPrompt(String::new());
            }
            Action::InputChar(c) => {
                if let Mode::JumpPrompt(buffer) = &mut self.mode {
                    if c.is_ascii_digit() && buffer.len() < PROMPT_MAX_DIGITS {
                        buffer.push(c);
                    }
                }
            }
            Action::Backspace => {
                if let Mode::JumpPrompt(buffer) = &mut self.mode {
                    buffer.pop();
                }
            }
            Action::Confirm => {
                if let Mode::JumpPrompt(buffer) = std::mem::replace(&mut self.mode, Mode::Normal) {
                    if let Ok(section) = buffer.parse::<usize>() {
                        self.jump_to(section);
                    }
                }
            }
            Action::Cancel => self.mode = Mode::Normal,
            Action::None => {}
        }

        self.drain_events();
    }

    /// Unmount the engine, releasing its hold on the document
    pub fn close(self) {
        self.engine.unmount();
    }

    /// Terminal resized
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.flow_metrics = DocumentFlowWidget::measure(&self.deck, viewport.cols);
        self.engine.resize(viewport.width_px());
        self.drain_events();
    }

    /// Advance timers and animations
    pub fn on_tick(&mut self) {
        let now = self.clock.now();
        if self.engine.tick() {
            trace!("Transition animation finished");
        }
        self.transition.update(now);
        let max = self.max_flow_offset();
        self.flow.update(max, now);
        self.drain_events();
    }

    /// Host default action for an event the engine did not claim. The page
    /// only scrolls natively while the engine holds no scroll lock.
    fn native_scroll_allowed(&self, response: InputResponse) -> bool {
        !response.prevent_default && !self.engine.document().is_scroll_locked()
    }

    fn native_key_scroll(&mut self, key: Key) {
        let max = self.max_flow_offset();
        let height = self.viewport.stage().height;
        match key {
            Key::ArrowDown => self.flow.step_down(max),
            Key::ArrowUp => self.flow.step_up(max),
            Key::PageDown | Key::Space => self.flow.page_down(height, max),
            Key::PageUp => self.flow.page_up(height, max),
            Key::Home => self.flow.scroll_to(0, max, self.clock.now()),
            Key::End => self.flow.scroll_to(max, max, self.clock.now()),
            Key::Other => {}
        }
    }

    fn jump_to(&mut self, section: usize) {
        if self.is_mobile() {
            // Anchor navigation in the plain document
            if let Some(offset) = self.flow_metrics.offset_of(section) {
                let max = self.max_flow_offset();
                self.flow.scroll_to(offset, max, self.clock.now());
            }
        } else {
            let outcome = self.engine.go_to_section(section);
            self.log_outcome("prompt", outcome);
        }
    }

    fn log_outcome(&self, source: &str, outcome: Outcome) {
        match outcome {
            Outcome::Committed(commit) => debug!(source, from = commit.from, to = commit.to, "Section request committed"),
            Outcome::Ignored(reason) => trace!(source, ?reason, "Section request ignored"),
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SectionEvent::Changed { to, .. } => {
                    self.transition.start(Layout::for_section(to), self.clock.now());
                    self.clear_status();
                }
                SectionEvent::ModeChanged { mode } => match mode {
                    ViewportMode::Desktop => {
                        self.transition.snap(self.engine.layout());
                        self.set_status("Desktop layout");
                    }
                    ViewportMode::Mobile => {
                        // Keep the reader on the section they were viewing
                        let offset = self
                            .flow_metrics
                            .offset_of(self.engine.current_section())
                            .unwrap_or(0)
                            .min(self.max_flow_offset());
                        self.flow.set_offset(offset);
                        self.set_status("Mobile layout");
                    }
                },
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::demo_deck;
    use fullpage_core::clock::ManualClock;
    use fullpage_core::location::Location;
    use std::time::Duration;

    pub(crate) fn test_app(cols: u16) -> App {
        test_app_with_clock(cols, ManualClock::new())
    }

    pub(crate) fn test_app_with_clock(cols: u16, clock: ManualClock) -> App {
        let config = Arc::new(AppConfig::default());
        let viewport = Viewport::from_cells(cols, 20, &config.ui);
        App::with_clock(
            config,
            demo_deck().unwrap(),
            MemoryLocation::with_fragment(None).unwrap(),
            viewport,
            Arc::new(clock),
        )
        .unwrap()
    }

    #[test]
    fn test_viewport_pixels() {
        let viewport = Viewport::from_cells(120, 30, &UiConfig::default());
        assert_eq!(viewport.width_px(), 960);
        assert_eq!(viewport.to_px(0, 0), (4.0, 8.0));
        assert_eq!(viewport.stage(), Rect::new(0, 0, 120, 29));
    }

    #[test]
    fn test_keys_move_sections_with_lockout() {
        let clock = ManualClock::new();
        let mut app = test_app_with_clock(120, clock.clone());

        app.apply_action(Action::Page(Key::ArrowDown));
        assert_eq!(app.engine.current_section(), 2);
        assert!(app.needs_fast_update());

        clock.set_ms(300);
        app.apply_action(Action::Page(Key::PageDown));
        assert_eq!(app.engine.current_section(), 2);

        clock.set_ms(1500);
        app.on_tick();
        assert!(!app.needs_fast_update());
        app.apply_action(Action::Page(Key::End));
        assert_eq!(app.engine.current_section(), 5);
        assert_eq!(app.engine.location().fragment().as_deref(), Some("5"));
    }

    #[test]
    fn test_wheel_and_drag() {
        let clock = ManualClock::new();
        let mut app = test_app_with_clock(120, clock.clone());

        app.apply_action(Action::Wheel(-1));
        assert_eq!(app.engine.current_section(), 2);

        clock.set_ms(2000);
        // 4 rows of 16px is past the 50px threshold; dragging down retreats
        app.apply_action(Action::TouchStart { col: 10, row: 5 });
        app.apply_action(Action::TouchMove { col: 10, row: 9 });
        app.apply_action(Action::TouchEnd);
        assert_eq!(app.engine.current_section(), 1);
    }

    #[test]
    fn test_jump_prompt() {
        let mut app = test_app(120);
        app.apply_action(Action::OpenJumpPrompt);
        assert_eq!(app.focus_target(), FocusTarget::TextInput);

        // Navigation keys are ignored while typing
        app.apply_action(Action::Page(Key::End));
        assert_eq!(app.engine.current_section(), 1);

        app.apply_action(Action::InputChar('x'));
        app.apply_action(Action::InputChar('4'));
        assert_eq!(app.mode, Mode::JumpPrompt("4".to_string()));
        app.apply_action(Action::Confirm);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.engine.current_section(), 4);
    }

    #[test]
    fn test_invalid_jump_is_ignored() {
        let mut app = test_app(120);
        app.apply_action(Action::OpenJumpPrompt);
        app.apply_action(Action::InputChar('9'));
        app.apply_action(Action::Confirm);
        assert_eq!(app.engine.current_section(), 1);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_marker_click() {
        let mut app = test_app(120);
        let stage = app.viewport().stage();
        let rect = PaginationWidget::marker_rect(stage, 5, 3).unwrap();
        let action = crate::input::handle_mouse_event(
            crossterm::event::MouseEvent {
                kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
                column: rect.x + 1,
                row: rect.y,
                modifiers: crossterm::event::KeyModifiers::NONE,
            },
            &app,
        );
        assert_eq!(action, Action::ClickMarker(3));
        app.apply_action(action);
        assert_eq!(app.engine.current_section(), 3);
    }

    #[test]
    fn test_mobile_scrolls_document_natively() {
        let clock = ManualClock::new();
        // 60 columns of 8px is below the 768px breakpoint
        let mut app = test_app_with_clock(60, clock.clone());
        assert!(app.is_mobile());
        assert_eq!(app.marker_at(57, 9), None);

        app.apply_action(Action::Page(Key::PageDown));
        clock.advance(Duration::from_millis(500));
        app.on_tick();
        clock.advance(Duration::from_millis(500));
        app.on_tick();

        assert_eq!(app.engine.current_section(), 1);
        assert!(app.flow_offset() > 0);
        assert!(!app.engine.document().is_scroll_locked());
    }

    #[test]
    fn test_resize_switches_layout() {
        let mut app = test_app(120);
        app.apply_action(Action::Page(Key::ArrowDown));

        let narrow = Viewport::from_cells(60, 20, &app.config.ui);
        app.resize(narrow);
        assert!(app.is_mobile());
        assert_eq!(app.status_message.as_deref(), Some("Mobile layout"));
        let expected = DocumentFlowWidget::measure(&app.deck, 60)
            .offset_of(2)
            .unwrap()
            .min(app.max_flow_offset());
        assert_eq!(app.flow_offset(), expected);

        let wide = Viewport::from_cells(120, 20, &app.config.ui);
        app.resize(wide);
        assert!(!app.is_mobile());
        assert_eq!(app.transition.target().current_section, 2);
        assert!(!app.transition.is_animating());
    }

    #[test]
    fn test_quit_and_pending_g() {
        let mut app = test_app(120);
        app.apply_action(Action::PendingG);
        assert_eq!(app.pending_key, Some('g'));
        app.apply_action(Action::None);
        assert_eq!(app.pending_key, None);
        app.apply_action(Action::Quit);
        assert!(app.should_quit);
    }
}
