//! UI state machine (pure).
//!
//! All transitions are pure functions testable without a terminal or a
//! network. The impure shell in [`crate::view`] feeds actions in and
//! executes the fetch commands that come out.

pub mod action;
pub mod app_state;
pub mod controller;

pub use action::UiAction;
pub use app_state::{AppState, Focus};
pub use controller::{FetchCommand, Intent, QueryState};
