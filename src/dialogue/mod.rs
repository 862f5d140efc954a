//! The guided birth-detail dialogue: state machine, fixed prompts, and the
//! per-chat controller.

pub mod controller;
pub mod prompts;
pub mod state;

pub use controller::DialogueController;
pub use state::{BirthDraft, DialogueStep, Session};
