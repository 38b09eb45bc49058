//! Transition scheduler: the section state machine.
//!
//! Owns the current section, the animating flag and the last commit time.
//! Every request goes through [`TransitionScheduler::commit`], the only place
//! that mutates state. Rejected requests are reported as
//! [`Outcome::Ignored`] and are never errors.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::TimingConfig;
use crate::{Error, Result};

/// Why a transition request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Target outside `1..=total_sections` (includes the edges)
    OutOfRange,
    /// Target is the current section
    SameSection,
    /// A transition animation is still in flight
    Animating,
    /// Cooldown since the last commit has not elapsed
    CoolingDown,
    /// Engine is not capturing input (mobile layout)
    Inactive,
}

/// A committed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub from: usize,
    pub to: usize,
    pub at: Instant,
}

/// Result of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Committed(Commit),
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed(_))
    }

    pub fn commit(&self) -> Option<&Commit> {
        match self {
            Outcome::Committed(commit) => Some(commit),
            Outcome::Ignored(_) => None,
        }
    }

    pub fn ignored(&self) -> Option<IgnoreReason> {
        match self {
            Outcome::Committed(_) => None,
            Outcome::Ignored(reason) => Some(*reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransitionScheduler {
    total_sections: usize,
    current_section: usize,
    is_animating: bool,
    last_commit: Option<Instant>,
    animation_duration: Duration,
    cooldown: Duration,
}

impl TransitionScheduler {
    /// Create a scheduler starting at `initial_section`.
    ///
    /// An out-of-range initial section falls back to 1; a total below 1 is
    /// a configuration error.
    pub fn new(total_sections: usize, initial_section: usize, timing: &TimingConfig) -> Result<Self> {
        if total_sections < 1 {
            return Err(Error::Config(
                "total_sections must be at least 1".to_string(),
            ));
        }

        let current_section = if (1..=total_sections).contains(&initial_section) {
            initial_section
        } else {
            1
        };

        Ok(Self {
            total_sections,
            current_section,
            is_animating: false,
            last_commit: None,
            animation_duration: timing.animation_duration(),
            cooldown: timing.cooldown(),
        })
    }

    #[inline]
    pub fn current_section(&self) -> usize {
        self.current_section
    }

    #[inline]
    pub fn total_sections(&self) -> usize {
        self.total_sections
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn last_commit(&self) -> Option<Instant> {
        self.last_commit
    }

    /// Move to the next section
    pub fn advance(&mut self, now: Instant) -> Outcome {
        self.commit(self.current_section + 1, now)
    }

    /// Move to the previous section
    pub fn retreat(&mut self, now: Instant) -> Outcome {
        // Section 0 is out of range, so retreating from 1 is a no-op
        self.commit(self.current_section - 1, now)
    }

    /// Jump to any section
    pub fn go_to_section(&mut self, target: usize, now: Instant) -> Outcome {
        self.commit(target, now)
    }

    /// Clear the animating flag once the animation duration has passed.
    ///
    /// Returns true on the tick that ends the animation.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.last_commit {
            Some(at) if self.is_animating && now.saturating_duration_since(at) >= self.animation_duration => {
                self.is_animating = false;
                trace!(section = self.current_section, "Section animation finished");
                true
            }
            _ => false,
        }
    }

    /// Time left until a new transition can be committed
    pub fn remaining_lockout(&self, now: Instant) -> Duration {
        self.last_commit
            .map(|at| self.cooldown.saturating_sub(now.saturating_duration_since(at)))
            .unwrap_or(Duration::ZERO)
    }

    fn commit(&mut self, target: usize, now: Instant) -> Outcome {
        let outcome = self.check(target, now);
        if let Outcome::Ignored(reason) = outcome {
            trace!(
                target,
                current = self.current_section,
                ?reason,
                "Transition request dropped"
            );
            return outcome;
        }

        let from = self.current_section;
        self.last_commit = Some(now);
        self.current_section = target;
        self.is_animating = true;

        debug!(from, to = target, "Committed section transition");
        Outcome::Committed(Commit {
            from,
            to: target,
            at: now,
        })
    }

    fn check(&self, target: usize, now: Instant) -> Outcome {
        if !(1..=self.total_sections).contains(&target) {
            return Outcome::Ignored(IgnoreReason::OutOfRange);
        }
        if target == self.current_section {
            return Outcome::Ignored(IgnoreReason::SameSection);
        }
        // Fast path: no clock arithmetic while the flag is still set
        if self.is_animating {
            return Outcome::Ignored(IgnoreReason::Animating);
        }
        if let Some(at) = self.last_commit {
            if now.saturating_duration_since(at) < self.cooldown {
                return Outcome::Ignored(IgnoreReason::CoolingDown);
            }
        }
        Outcome::Committed(Commit {
            from: self.current_section,
            to: target,
            at: now,
        })
    }
}
