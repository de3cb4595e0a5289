//! scanview
//!
//! TUI dashboard for browsing network scan results (hosts and ports) fetched
//! from a remote search API, with pagination, sorting, and filtering.
//!
//! Pure core / impure shell: the query model, controller, and derived table
//! values are pure and fully testable without a terminal or a network; the
//! transport and the TUI event loop are the shell around them.

pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod state;
pub mod transport;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod tests;
