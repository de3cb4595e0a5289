//! Acceptance tests: full bridge scenarios, no terminal, no network.
