//! Postgres column mappings for string enumerations.
//!
//! Enumerations are stored as `text`. Decoding an unknown value is a column
//! error, so a decoded record always holds a valid variant.

/// Implement sqlx `Type`, `Encode` and `Decode` for Postgres on
/// [`quizbank_core::StringEnum`] types, backed by `text`.
macro_rules! pg_text_enum {
    ($($name:ty),+ $(,)?) => {
        $(
            impl sqlx::Type<sqlx::Postgres> for $name {
                fn type_info() -> sqlx::postgres::PgTypeInfo {
                    <String as sqlx::Type<sqlx::Postgres>>::type_info()
                }

                fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                    <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
                }
            }

            impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
                fn encode_by_ref(
                    &self,
                    buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
                ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                    let value = <$name as quizbank_core::StringEnum>::as_str(self);
                    <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&value, buf)
                }
            }

            impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
                fn decode(
                    value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
                ) -> Result<Self, sqlx::error::BoxDynError> {
                    let raw = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                    Ok(raw.parse::<$name>()?)
                }
            }
        )+
    };
}
