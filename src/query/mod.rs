//! Query model (pure).
//!
//! Typed description of "what to fetch": filter/sort clauses, the request
//! spec, and the typed result envelope. No I/O happens here.

pub mod clause;
pub mod spec;

pub use clause::{FilterClause, ScalarOp, ScalarValue, SortClause, SortDirection, VectorOp};
pub use spec::{QuerySpec, ResultEnvelope};
