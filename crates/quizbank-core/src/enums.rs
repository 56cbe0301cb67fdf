//! Closed sets of string constants.
//!
//! Every enumeration exposed to clients is declared with [`string_enum!`],
//! which generates the Rust enum together with its [`StringEnum`]
//! implementation, `Display`, `FromStr` and a serde representation as the
//! plain string value.
//!
//! # Example
//!
//! ```ignore
//! use quizbank_core::{string_enum, StringEnum};
//!
//! string_enum! {
//!     /// Review state of a submission.
//!     pub enum ReviewStatus {
//!         Pending => "pending",
//!         Approved => "approved",
//!         Rejected => "rejected",
//!     }
//! }
//!
//! assert_eq!(ReviewStatus::values(), vec!["pending", "approved", "rejected"]);
//! ```

/// A closed, named set of string-valued constants.
///
/// Identity is by [`StringEnum::NAME`]; [`StringEnum::variants`] is in
/// declaration order and every derived listing keeps that order.
pub trait StringEnum: Sized + Copy + 'static {
    /// Name of the enumeration, as exported to clients.
    const NAME: &'static str;

    /// Source file the enumeration is declared in.
    const SOURCE: &'static str;

    /// All variants in declaration order.
    fn variants() -> &'static [Self];

    /// The underlying string value.
    fn as_str(&self) -> &'static str;

    /// The symbolic (Rust) name of the variant.
    fn symbol(&self) -> &'static str;

    /// The underlying string values in declaration order.
    fn values() -> Vec<&'static str> {
        Self::variants().iter().map(|v| v.as_str()).collect()
    }

    /// `(symbol, value)` pairs in declaration order.
    fn pairs() -> Vec<(&'static str, &'static str)> {
        Self::variants()
            .iter()
            .map(|v| (v.symbol(), v.as_str()))
            .collect()
    }

    /// The variant whose underlying value is `value`, if any.
    fn from_value(value: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|v| v.as_str() == value)
    }
}

/// Error returned when a string is not one of an enumeration's values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {enumeration} value")]
pub struct ParseEnumError {
    pub enumeration: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(enumeration: &'static str, value: impl Into<String>) -> Self {
        Self {
            enumeration,
            value: value.into(),
        }
    }
}

#[doc(hidden)]
pub mod __private {
    pub use serde;
}

/// Declare a string-valued enumeration.
///
/// Each variant is written as `Symbol => "value"`. The generated type is
/// `Copy`, serializes as its value and parses from it.
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::StringEnum for $name {
            const NAME: &'static str = stringify!($name);
            const SOURCE: &'static str = file!();

            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            fn symbol(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<Self as $crate::StringEnum>::as_str(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::StringEnum>::from_value(s)
                    .ok_or_else(|| $crate::ParseEnumError::new(stringify!($name), s))
            }
        }

        impl $crate::enums::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::enums::__private::serde::Serializer,
            {
                serializer.serialize_str(<Self as $crate::StringEnum>::as_str(self))
            }
        }

        impl<'de> $crate::enums::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::enums::__private::serde::Deserializer<'de>,
            {
                let raw = <String as $crate::enums::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                raw.parse()
                    .map_err(<D::Error as $crate::enums::__private::serde::de::Error>::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    string_enum! {
        enum ReviewStatus {
            Pending => "pending",
            Approved => "approved",
            Rejected => "rejected",
        }
    }

    #[test]
    fn test_values_keep_declaration_order() {
        assert_eq!(
            ReviewStatus::values(),
            vec!["pending", "approved", "rejected"]
        );
    }

    #[test]
    fn test_pairs_carry_symbols() {
        assert_eq!(
            ReviewStatus::pairs(),
            vec![
                ("Pending", "pending"),
                ("Approved", "approved"),
                ("Rejected", "rejected"),
            ]
        );
    }

    #[test]
    fn test_name_and_source() {
        assert_eq!(ReviewStatus::NAME, "ReviewStatus");
        assert!(ReviewStatus::SOURCE.ends_with("enums.rs"));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("approved".parse::<ReviewStatus>(), Ok(ReviewStatus::Approved));
        assert_eq!(ReviewStatus::Rejected.to_string(), "rejected");

        let err = "Approved".parse::<ReviewStatus>().unwrap_err();
        assert_eq!(err.enumeration, "ReviewStatus");
        assert_eq!(err.value, "Approved");
    }

    #[test]
    fn test_from_value_matches_exact_value() {
        assert_eq!(
            ReviewStatus::from_value("pending"),
            Some(ReviewStatus::Pending)
        );
        assert_eq!(ReviewStatus::from_value("Pending"), None);
        assert_eq!(ReviewStatus::from_value(""), None);
    }

    #[test]
    fn test_serde_uses_plain_value() {
        let json = serde_json::to_string(&ReviewStatus::Pending).unwrap();
        assert_eq!(json, r#""pending""#);

        let parsed: ReviewStatus = serde_json::from_str(r#""rejected""#).unwrap();
        assert_eq!(parsed, ReviewStatus::Rejected);

        assert!(serde_json::from_str::<ReviewStatus>(r#""unknown""#).is_err());
    }
}
