//! WASGI Services Layer
//!
//! Host-side collaborators the script core consumes: configuration and
//! the log sink guest diagnostics are written to.

pub mod config;
pub mod log;

pub use config::{ConfigError, HostConfig, RuntimeLimits};
pub use log::{LogLevel, LogRecord, LogSink, MemorySink, TracingSink};
