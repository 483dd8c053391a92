//! Opaque user key type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserKey`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UserKeyError {
    /// The input string is empty.
    #[error("user key cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("user key must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// An opaque identifier for the owner of a cart.
///
/// Depending on the deployment this carries a user's email address or a
/// stringified numeric account id; the cart service never inspects the
/// contents beyond checking that a key is present. Carts for different
/// keys are fully independent.
///
/// ## Constraints
///
/// - Length: 1-254 characters
///
/// ## Examples
///
/// ```
/// use paddock_core::UserKey;
///
/// assert!(UserKey::parse("vasya@gmail.com").is_ok());
/// assert!(UserKey::parse("1042").is_ok());
/// assert!(UserKey::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserKey(String);

impl UserKey {
    /// Maximum length of a user key.
    pub const MAX_LENGTH: usize = 254;

    /// Parse a `UserKey` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or longer than 254 characters.
    pub fn parse(s: &str) -> Result<Self, UserKeyError> {
        if s.is_empty() {
            return Err(UserKeyError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(UserKeyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the user key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `UserKey` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserKey {
    type Err = UserKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for UserKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for UserKey {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for UserKey {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for UserKey {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_keys() {
        assert!(UserKey::parse("user@example.com").is_ok());
        assert!(UserKey::parse("1042").is_ok());
        assert!(UserKey::parse("a").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(UserKey::parse(""), Err(UserKeyError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(255);
        assert!(matches!(
            UserKey::parse(&long),
            Err(UserKeyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_display_and_as_str() {
        let key = UserKey::parse("user@example.com").unwrap();
        assert_eq!(key.as_str(), "user@example.com");
        assert_eq!(format!("{key}"), "user@example.com");
    }

    #[test]
    fn test_from_str() {
        let key: UserKey = "user@example.com".parse().unwrap();
        assert_eq!(key.as_str(), "user@example.com");
    }

    #[test]
    fn test_serde_roundtrip() {
        let key = UserKey::parse("user@example.com").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"user@example.com\"");

        let parsed: UserKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }
}
