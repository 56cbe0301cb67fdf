//! Quizbank Observability
//!
//! Console logging for the Quizbank binaries. Everything in the workspace
//! logs through `tracing` macros; [`init_logging`] installs the subscriber
//! that prints them.

mod basic_logging;

pub use basic_logging::{LogFormat, init_logging};
