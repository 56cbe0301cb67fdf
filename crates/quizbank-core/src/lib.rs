//! # Quizbank Core
//!
//! Core value types shared by the Quizbank DTO crates.
//!
//! - [`field`]: the three-state [`Field`] used for members that may be absent,
//!   null, or present
//! - [`enums`]: the [`StringEnum`] contract and the [`string_enum!`] macro used
//!   to declare closed sets of string constants
//!
//! # Example
//!
//! ```ignore
//! use quizbank_core::{Field, StringEnum};
//!
//! let id: Field<i64> = Field::Absent;
//! assert!(id.is_absent());
//!
//! let values = Role::values();
//! ```

pub mod enums;
pub mod field;

pub use enums::{ParseEnumError, StringEnum};
pub use field::Field;
