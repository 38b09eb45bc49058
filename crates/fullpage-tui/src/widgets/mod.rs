mod document_flow;
mod pagination;
mod prompt;
mod stage;
mod status_bar;
pub mod text;

pub use document_flow::{DocumentFlowWidget, FlowMetrics};
pub use pagination::PaginationWidget;
pub use prompt::PromptWidget;
pub use stage::{card_rect, CardRect, StageWidget};
pub use status_bar::StatusBarWidget;
