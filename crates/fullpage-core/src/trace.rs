//! Replay of timed input traces against a manual clock.
//!
//! A trace is JSON:
//!
//! ```json
//! {
//!   "fragment": "#2",
//!   "viewport_width_px": 1280,
//!   "records": [
//!     { "at_ms": 0, "input": "advance" },
//!     { "at_ms": 200, "input": "wheel", "delta_y": -3.0 },
//!     { "at_ms": 1600, "input": "key", "key": "page_down" }
//!   ]
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::ManualClock;
use crate::config::TimingConfig;
use crate::document::MemoryDocument;
use crate::engine::{EngineBuilder, DEFAULT_VIEWPORT_WIDTH_PX};
use crate::input::{FocusTarget, Key, RawInput};
use crate::location::MemoryLocation;
use crate::scheduler::{IgnoreReason, Outcome};
use crate::{Error, Result};

/// One input of a trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum TraceInput {
    Advance,
    Retreat,
    GoTo { section: usize },
    Wheel { delta_y: f64 },
    TouchStart { x: f64, y: f64 },
    TouchMove { x: f64, y: f64 },
    TouchEnd,
    Key {
        key: Key,
        #[serde(default)]
        focus: FocusTarget,
    },
    Click { section: usize },
    Resize { width_px: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub at_ms: u64,
    #[serde(flatten)]
    pub input: TraceInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Address fragment at page load
    #[serde(default)]
    pub fragment: Option<String>,
    #[serde(default = "default_viewport_width")]
    pub viewport_width_px: u32,
    pub records: Vec<TraceRecord>,
}

fn default_viewport_width() -> u32 {
    DEFAULT_VIEWPORT_WIDTH_PX
}

impl Trace {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of replaying one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub at_ms: u64,
    pub input: TraceInput,
    /// `(from, to)` when the record committed a transition
    pub committed: Option<(usize, usize)>,
    pub ignored: Option<IgnoreReason>,
    pub prevent_default: bool,
    pub section: usize,
    pub mobile: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceReport {
    pub initial_section: usize,
    pub final_section: usize,
    pub fragment: Option<String>,
    pub steps: Vec<TraceStep>,
}

impl TraceReport {
    /// Steps that committed a transition
    pub fn commits(&self) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter().filter(|s| s.committed.is_some())
    }
}

/// Replay a trace on a fresh engine.
///
/// Records must be in non-decreasing time order.
pub fn replay(trace: &Trace, timing: &TimingConfig) -> Result<TraceReport> {
    if trace.records.windows(2).any(|w| w[1].at_ms < w[0].at_ms) {
        return Err(Error::Other(
            "trace records must be in time order".to_string(),
        ));
    }

    let clock = ManualClock::new();
    let location = MemoryLocation::with_fragment(trace.fragment.as_deref())?;
    let mut engine = EngineBuilder::new(*timing)
        .with_viewport_width(trace.viewport_width_px)
        .with_clock(Arc::new(clock.clone()))
        .mount(MemoryDocument::new(), location)?;
    let initial_section = engine.current_section();

    let mut steps = Vec::with_capacity(trace.records.len());
    for record in &trace.records {
        clock.set_ms(record.at_ms);
        engine.tick();

        let (outcome, prevent_default) = match record.input {
            TraceInput::Advance => (Some(engine.advance()), false),
            TraceInput::Retreat => (Some(engine.retreat()), false),
            TraceInput::GoTo { section } => (Some(engine.go_to_section(section)), false),
            TraceInput::Click { section } => (Some(engine.click_marker(section)), false),
            TraceInput::Resize { width_px } => {
                engine.resize(width_px);
                (None, false)
            }
            TraceInput::Wheel { delta_y } => respond(engine.handle_input(&RawInput::Wheel { delta_y })),
            TraceInput::TouchStart { x, y } => respond(engine.handle_input(&RawInput::TouchStart { x, y })),
            TraceInput::TouchMove { x, y } => respond(engine.handle_input(&RawInput::TouchMove { x, y })),
            TraceInput::TouchEnd => respond(engine.handle_input(&RawInput::TouchEnd)),
            TraceInput::Key { key, focus } => respond(engine.handle_input(&RawInput::Key { key, focus })),
        };

        steps.push(TraceStep {
            at_ms: record.at_ms,
            input: record.input,
            committed: outcome
                .as_ref()
                .and_then(Outcome::commit)
                .map(|c| (c.from, c.to)),
            ignored: outcome.as_ref().and_then(Outcome::ignored),
            prevent_default,
            section: engine.current_section(),
            mobile: engine.state().is_mobile,
        });
    }

    let report = TraceReport {
        initial_section,
        final_section: engine.current_section(),
        fragment: engine.location().url().fragment().map(str::to_string),
        steps,
    };
    engine.unmount();
    Ok(report)
}

fn respond(response: crate::engine::InputResponse) -> (Option<Outcome>, bool) {
    (response.outcome, response.prevent_default)
}
