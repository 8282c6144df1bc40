//! 表示状態とコントローラ

mod controller;
mod state;

pub use controller::Controller;
pub use state::{Controls, Presentation, Ticket, View, VisualMode, WorkflowState};
