//! Error types for the runner.
//!
//! Uses `thiserror`. Runtime failures inside the resolution loop (resolver
//! errors, persist errors) are logged and absorbed there; only startup
//! problems surface through this type.

/// Errors that can occur while starting the runner.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}
