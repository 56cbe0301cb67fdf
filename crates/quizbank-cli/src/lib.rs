//! # Quizbank CLI
//!
//! Command handlers behind the `quizbank` binary.
//!
//! ## Usage
//!
//! ```text
//! quizbank generate [--output <path>]   # write client types once
//! quizbank watch                        # regenerate on source changes
//! quizbank dev                          # run the watcher until Ctrl-C
//! quizbank list-enums                   # print exported enumerations
//! ```

pub mod commands;
