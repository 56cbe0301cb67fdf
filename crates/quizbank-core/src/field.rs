//! Three-state field values.
//!
//! A DTO member can be missing from an instance entirely (for example the `id`
//! of a quiz that has not been persisted yet), present but `null`, or present
//! with a value. `Option<T>` only models two of those states, so optional
//! members use [`Field`] instead.
//!
//! Pair it with serde's `default` and `skip_serializing_if` so that an absent
//! member stays absent on the wire:
//!
//! ```ignore
//! use quizbank_core::Field;
//!
//! #[derive(Serialize, Deserialize)]
//! struct QuizData {
//!     #[serde(default, skip_serializing_if = "Field::is_absent")]
//!     id: Field<i64>,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that is absent, explicitly null, or present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// The member is not part of the instance at all.
    Absent,
    /// The member is part of the instance and set to null.
    Null,
    /// The member carries a value.
    Present(T),
}

impl<T> Field<T> {
    /// A member that carries `value`.
    #[inline]
    pub const fn present(value: T) -> Self {
        Self::Present(value)
    }

    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the value, collapsing `Absent` and `Null` to `None`.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    /// Take the value, collapsing `Absent` and `Null` to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Field<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Absent => Field::Absent,
            Self::Null => Field::Null,
            Self::Present(value) => Field::Present(f(value)),
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<Option<T>> for Field<T> {
    /// `None` becomes [`Field::Null`]: the caller had the member and it was empty.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Null,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Only reached when the container forgot `skip_serializing_if`.
            Self::Absent | Self::Null => serializer.serialize_none(),
            Self::Present(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A missing key never reaches this point; `#[serde(default)]` yields `Absent`.
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
