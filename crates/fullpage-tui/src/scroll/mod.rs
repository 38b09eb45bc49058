//! Animation for the terminal host
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves
//! - `timing` - Progress, interpolation and frame pacing
//! - `config` - Helpers over the core `ScrollConfig`
//!
//! ## L3 Molecular Layer
//! - `transition` - Tweens section placements between two layouts
//! - `flow` - Line scrolling of the stacked mobile document
//!
//! # Usage
//!
//! ```ignore
//! use fullpage_tui::scroll::TransitionAnimator;
//!
//! let mut animator = TransitionAnimator::new(engine.layout(), duration, easing);
//! // after a committed transition
//! animator.start(engine.layout(), Instant::now());
//! // every frame
//! let frames = animator.frames_at(Instant::now());
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod flow;
pub mod transition;

pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
pub use flow::FlowScroller;
pub use transition::{SectionFrame, TransitionAnimator};
