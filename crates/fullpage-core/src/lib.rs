pub mod clock;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod input;
pub mod location;
pub mod pagination;
pub mod placement;
pub mod scheduler;
pub mod section;
pub mod trace;
pub mod viewport;

pub use config::{AppConfig, EasingType, ScrollConfig, TimingConfig};
pub use engine::{Engine, EngineBuilder, InputResponse, ScrollState, SectionEvent};
pub use error::{Error, Result};
pub use placement::{Layout, Placement};
pub use scheduler::{IgnoreReason, Outcome};
pub use section::{Deck, SectionRole};
