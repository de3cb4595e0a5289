//! Domain model: typed scan records and the error taxonomy.

pub mod error;
pub mod record;

pub use error::{AppError, IntentError, TransportError};
pub use record::{HostRecord, PortRecord, PortState, Protocol, Resource, ScriptResult};
