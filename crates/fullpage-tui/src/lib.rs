pub mod app;
pub mod content;
pub mod event;
pub mod input;
pub mod keymap;
pub mod scroll;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, Viewport};
pub use theme::Theme;
