//! Dashboard consumers of the wallet session.
//!
//! # Data Flow
//! ```text
//! session watch channel ──▶ poller.rs (interval refresh while connected)
//!     → snapshot.rs (formatted views, arc-swap published)
//! user input ──▶ actions.rs (validate, submit, await confirmation)
//! ```

pub mod actions;
pub mod poller;
pub mod snapshot;

pub use actions::ActionError;
pub use poller::DashboardPoller;
pub use snapshot::DashboardSnapshot;
