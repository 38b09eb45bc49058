//! Engine facade: wires the viewport classifier, input normalizer,
//! transition scheduler, placement engine and pagination together and owns
//! the page-level side effects for as long as it is mounted.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{PaginationConfig, TimingConfig};
use crate::document::{section_marker, DocumentHost};
use crate::input::{InputNormalizer, RawInput, Signal};
use crate::location::{parse_section_fragment, section_fragment, Location};
use crate::pagination::{Marker, PaginationIndicator};
use crate::placement::Layout;
use crate::scheduler::{Commit, IgnoreReason, Outcome, TransitionScheduler};
use crate::section::SECTION_COUNT;
use crate::viewport::{ViewportChange, ViewportClassifier, ViewportMode};
use crate::Result;

/// Viewport width assumed when the host does not report one
pub const DEFAULT_VIEWPORT_WIDTH_PX: u32 = 1280;

/// Read-only snapshot of the engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollState {
    pub current_section: usize,
    pub total_sections: usize,
    pub is_animating: bool,
    pub is_mobile: bool,
}

/// Notifications for consumers outside the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionEvent {
    /// A transition was committed
    Changed {
        from: usize,
        to: usize,
        at: DateTime<Utc>,
    },
    /// The viewport switched between desktop and mobile layout
    ModeChanged { mode: ViewportMode },
}

/// What the host should do with a raw input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    /// Suppress the native default action
    pub prevent_default: bool,
    /// Result of the transition request, if the event produced one
    pub outcome: Option<Outcome>,
}

pub struct EngineBuilder {
    timing: TimingConfig,
    total_sections: usize,
    viewport_width_px: u32,
    pagination: PaginationConfig,
    clock: Arc<dyn Clock>,
    event_tx: Option<mpsc::UnboundedSender<SectionEvent>>,
}

impl EngineBuilder {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            total_sections: SECTION_COUNT,
            viewport_width_px: DEFAULT_VIEWPORT_WIDTH_PX,
            pagination: PaginationConfig::default(),
            clock: Arc::new(SystemClock),
            event_tx: None,
        }
    }

    pub fn with_total_sections(mut self, total_sections: usize) -> Self {
        self.total_sections = total_sections;
        self
    }

    /// Viewport width at mount time
    pub fn with_viewport_width(mut self, width_px: u32) -> Self {
        self.viewport_width_px = width_px;
        self
    }

    /// Locale strings for the pagination markers
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the event sender for change notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<SectionEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Mount the engine on a document.
    ///
    /// The starting section comes from the location fragment when it names
    /// a valid section, otherwise section 1.
    pub fn mount<D, L>(self, document: D, location: L) -> Result<Engine<D, L>>
    where
        D: DocumentHost,
        L: Location,
    {
        self.timing.validate()?;

        let initial = location
            .fragment()
            .and_then(|f| parse_section_fragment(&f, self.total_sections))
            .unwrap_or(1);
        let scheduler = TransitionScheduler::new(self.total_sections, initial, &self.timing)?;
        let viewport = ViewportClassifier::new(self.timing.mobile_breakpoint_px, self.viewport_width_px);

        let mut engine = Engine {
            scheduler,
            viewport,
            normalizer: InputNormalizer::new(self.timing.swipe_threshold_px),
            pagination: PaginationIndicator::new(self.pagination),
            timing: self.timing,
            clock: self.clock,
            event_tx: self.event_tx,
            side_effects_held: false,
            document,
            location,
        };

        info!(
            section = engine.current_section(),
            total = engine.scheduler.total_sections(),
            mode = ?engine.viewport.mode(),
            "Section engine mounted"
        );

        if !engine.viewport.is_mobile() {
            engine.acquire_side_effects();
        }
        Ok(engine)
    }
}

/// Mounted engine. Dropping it releases the scroll lock and section marker.
pub struct Engine<D: DocumentHost, L: Location> {
    scheduler: TransitionScheduler,
    viewport: ViewportClassifier,
    normalizer: InputNormalizer,
    pagination: PaginationIndicator,
    timing: TimingConfig,
    clock: Arc<dyn Clock>,
    event_tx: Option<mpsc::UnboundedSender<SectionEvent>>,
    side_effects_held: bool,
    document: D,
    location: L,
}

impl<D: DocumentHost, L: Location> Engine<D, L> {
    pub fn state(&self) -> ScrollState {
        ScrollState {
            current_section: self.scheduler.current_section(),
            total_sections: self.scheduler.total_sections(),
            is_animating: self.scheduler.is_animating(),
            is_mobile: self.viewport.is_mobile(),
        }
    }

    #[inline]
    pub fn current_section(&self) -> usize {
        self.scheduler.current_section()
    }

    #[inline]
    pub fn mode(&self) -> ViewportMode {
        self.viewport.mode()
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Placement of every section for the current state
    pub fn layout(&self) -> Layout {
        Layout::for_section(self.current_section())
    }

    /// Pagination markers; empty in mobile mode
    pub fn markers(&self) -> Vec<Marker> {
        self.pagination.markers(&self.state())
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Time left until the next transition can commit
    pub fn remaining_lockout(&self) -> Duration {
        self.scheduler.remaining_lockout(self.clock.now())
    }

    pub fn advance(&mut self) -> Outcome {
        self.request(Signal::Advance)
    }

    pub fn retreat(&mut self) -> Outcome {
        self.request(Signal::Retreat)
    }

    pub fn go_to_section(&mut self, section: usize) -> Outcome {
        self.request(Signal::GoTo(section))
    }

    /// Route a logical signal through the transition gate
    pub fn request(&mut self, signal: Signal) -> Outcome {
        if self.viewport.is_mobile() {
            return Outcome::Ignored(IgnoreReason::Inactive);
        }

        let now = self.clock.now();
        // Pending animation end is applied first, as a timer would have
        self.scheduler.tick(now);

        let outcome = match signal {
            Signal::Advance => self.scheduler.advance(now),
            Signal::Retreat => self.scheduler.retreat(now),
            Signal::First => self.scheduler.go_to_section(1, now),
            Signal::Last => {
                let last = self.scheduler.total_sections();
                self.scheduler.go_to_section(last, now)
            }
            Signal::GoTo(section) => self.scheduler.go_to_section(section, now),
        };

        if let Outcome::Committed(commit) = outcome {
            self.on_commit(commit);
        }
        outcome
    }

    /// Feed a raw wheel, touch or keyboard event.
    ///
    /// In mobile mode nothing is captured and the host keeps its native
    /// behaviour.
    pub fn handle_input(&mut self, input: &RawInput) -> InputResponse {
        if self.viewport.is_mobile() {
            return InputResponse::default();
        }

        let normalized = self.normalizer.normalize(input);
        InputResponse {
            prevent_default: normalized.prevent_default,
            outcome: normalized.signal.map(|signal| self.request(signal)),
        }
    }

    /// Pagination marker clicked
    pub fn click_marker(&mut self, index: usize) -> Outcome {
        let signal = self.pagination.click(index);
        self.request(signal)
    }

    /// Viewport resized; switches layout mode when the breakpoint is crossed
    pub fn resize(&mut self, width_px: u32) -> Option<ViewportChange> {
        let change = self.viewport.observe(width_px)?;
        match change {
            ViewportChange::BecameMobile => {
                self.normalizer.reset();
                self.release_side_effects();
            }
            ViewportChange::BecameDesktop => self.acquire_side_effects(),
        }
        info!(width_px, ?change, "Viewport mode changed");
        self.send_event(SectionEvent::ModeChanged {
            mode: self.viewport.mode(),
        });
        Some(change)
    }

    /// Advance timers; returns true when a transition animation just ended
    pub fn tick(&mut self) -> bool {
        self.scheduler.tick(self.clock.now())
    }

    /// Detach from the document, reverting all side effects
    pub fn unmount(self) {
        info!(section = self.current_section(), "Section engine unmounted");
        // Drop releases the side effects
    }

    fn on_commit(&mut self, commit: Commit) {
        self.location.replace_fragment(&section_fragment(commit.to));
        if self.side_effects_held {
            self.document.set_section_marker(&section_marker(commit.to));
        }
        self.send_event(SectionEvent::Changed {
            from: commit.from,
            to: commit.to,
            at: Utc::now(),
        });
    }

    fn acquire_side_effects(&mut self) {
        if self.side_effects_held {
            return;
        }
        self.document.lock_scroll();
        self.document
            .set_section_marker(&section_marker(self.current_section()));
        self.side_effects_held = true;
        debug!("Page scroll locked");
    }

    fn release_side_effects(&mut self) {
        if !self.side_effects_held {
            return;
        }
        self.document.unlock_scroll();
        self.document.clear_section_marker();
        self.side_effects_held = false;
        debug!("Page scroll unlocked");
    }

    /// Send an event to consumers (if an event channel is configured)
    fn send_event(&self, event: SectionEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send section event: receiver dropped");
            }
        }
    }
}

impl<D: DocumentHost, L: Location> Drop for Engine<D, L> {
    fn drop(&mut self) {
        self.release_side_effects();
    }
}

impl<T: DocumentHost + ?Sized> DocumentHost for &mut T {
    fn lock_scroll(&mut self) {
        (**self).lock_scroll();
    }

    fn unlock_scroll(&mut self) {
        (**self).unlock_scroll();
    }

    fn set_section_marker(&mut self, marker: &str) {
        (**self).set_section_marker(marker);
    }

    fn clear_section_marker(&mut self) {
        (**self).clear_section_marker();
    }
}

impl<T: Location + ?Sized> Location for &mut T {
    fn fragment(&self) -> Option<String> {
        (**self).fragment()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        (**self).replace_fragment(fragment);
    }
}
