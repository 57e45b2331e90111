//! Logging setup and the developer trace sink.
pub mod devlog;
pub mod logger;
