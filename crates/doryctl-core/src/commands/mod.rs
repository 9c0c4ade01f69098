//! High-level commands for doryctl operations.
//!
//! Frontends build options, call `execute` and print the returned report.

pub mod def_get;
pub mod session;

pub use def_get::{DefGetCommand, DefGetOptions, DefGetReport, DefGetRequest};
pub use session::{LoginOptions, SessionCommand, SessionReport};
