//! CLI command handlers, one per file.

mod history;
mod search;
mod serve;

pub use history::{run_history, HistoryAction};
pub use search::run_search;
pub use serve::run_serve;
