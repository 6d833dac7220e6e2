//! Opaque resource identifiers.
//!
//! Identifiers are issued by the storefront API and never interpreted here.
//! They are validated only so they can be spliced into request paths safely:
//! a valid identifier is non-empty, carries no surrounding or embedded
//! whitespace, and contains none of the URL delimiters `/ ? # % &`.

use std::fmt;

/// Validation errors shared by every identifier newtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierValidationError {
    /// The identifier was empty.
    Empty {
        /// Identifier kind, such as `order id`.
        kind: &'static str,
    },
    /// The identifier contained whitespace.
    Whitespace {
        /// Identifier kind, such as `order id`.
        kind: &'static str,
    },
    /// The identifier contained a URL delimiter.
    ReservedCharacter {
        /// Identifier kind, such as `order id`.
        kind: &'static str,
        /// The offending delimiter.
        character: char,
    },
}

impl fmt::Display for IdentifierValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{kind} must not be empty"),
            Self::Whitespace { kind } => write!(f, "{kind} must not contain whitespace"),
            Self::ReservedCharacter { kind, character } => {
                write!(f, "{kind} must not contain '{character}'")
            }
        }
    }
}

impl std::error::Error for IdentifierValidationError {}

const RESERVED: [char; 5] = ['/', '?', '#', '%', '&'];

fn validate(kind: &'static str, raw: &str) -> Result<(), IdentifierValidationError> {
    if raw.is_empty() {
        return Err(IdentifierValidationError::Empty { kind });
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(IdentifierValidationError::Whitespace { kind });
    }
    if let Some(character) = raw.chars().find(|c| RESERVED.contains(c)) {
        return Err(IdentifierValidationError::ReservedCharacter { kind, character });
    }
    Ok(())
}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdentifierValidationError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            fn from_owned(id: String) -> Result<Self, IdentifierValidationError> {
                validate($kind, &id)?;
                Ok(Self(id))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdentifierValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_identifier! {
    /// Identifier of an order.
    OrderId => "order id"
}

define_identifier! {
    /// Identifier of a user account.
    UserId => "user id"
}

define_identifier! {
    /// Identifier of a dashboard notification.
    NotificationId => "notification id"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::mongo_style("64b7f0c2e1a4b5d6c7e8f901")]
    #[case::uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case::numeric("1042")]
    fn accepts_opaque_identifiers(#[case] raw: &str) {
        let id = OrderId::new(raw).expect("identifier should be valid");
        assert_eq!(id.as_ref(), raw);
    }

    #[rstest]
    #[case::empty("", IdentifierValidationError::Empty { kind: "user id" })]
    #[case::padded(" 42", IdentifierValidationError::Whitespace { kind: "user id" })]
    #[case::slash("a/b", IdentifierValidationError::ReservedCharacter { kind: "user id", character: '/' })]
    #[case::query("a?b=1", IdentifierValidationError::ReservedCharacter { kind: "user id", character: '?' })]
    fn rejects_identifiers_unsafe_for_paths(
        #[case] raw: &str,
        #[case] expected: IdentifierValidationError,
    ) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[test]
    fn deserialises_through_validation() {
        let err = serde_json::from_str::<NotificationId>("\"\"").expect_err("empty id must fail");
        assert!(err.to_string().contains("notification id must not be empty"));

        let id: NotificationId = serde_json::from_str("\"n-1\"").expect("valid id");
        assert_eq!(id.to_string(), "n-1");
    }
}
