//! Common code across the whales binaries (the TUI client and the calendar
//! server).

/// Commit-calendar queries against the calendar server.
pub mod calendar;

/// A validated, non-negative count of whales.
pub mod count;
pub use count::Count;

/// The whale counter widget model.
pub mod counter;
pub use counter::Counter;

/// An explicit widget registry owned by the host application.
pub mod registry;
pub use registry::Registry;
