//! Structured logging setup and ndjson report lines.

mod format;

pub use format::StructuredLogger;
