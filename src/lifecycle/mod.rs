//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → init tracing → build transport/session/poller → run
//!
//! Shutdown (shutdown.rs):
//!     ctrl-c → trigger broadcast → poller and event loop drain → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
