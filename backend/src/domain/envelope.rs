//! Success/failure envelope returned by every network-backed operation.
//!
//! The envelope replaces raised errors with a value the caller must branch
//! on. It serialises as `{"success": true, "value": ...}` or
//! `{"success": false, "error": "..."}`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use super::ports::ApiError;

/// Tagged outcome of a network call.
///
/// # Examples
/// ```
/// use storefront::domain::Envelope;
///
/// let ok: Envelope<u32> = Envelope::success(3);
/// assert_eq!(ok.value(), Some(&3));
///
/// let failed: Envelope<u32> = Envelope::failure("status 500");
/// assert_eq!(failed.error(), Some("status 500"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    /// The call settled successfully with a decoded value.
    Success(T),
    /// The call failed; the message is safe to show to a user.
    Failure(String),
}

impl<T> Envelope<T> {
    /// Wrap a successful value.
    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Wrap a failure message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(error.into())
    }

    /// Whether the envelope carries a value.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrow the value of a successful envelope.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Borrow the message of a failed envelope.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error.as_str()),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }

    /// Transform the value, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Self::Success(value) => Envelope::Success(f(value)),
            Self::Failure(error) => Envelope::Failure(error),
        }
    }

    /// Chain another fallible step onto a successful envelope.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Envelope<U>) -> Envelope<U> {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(error) => Envelope::Failure(error),
        }
    }
}

impl Envelope<Value> {
    /// Decode the raw JSON value into a typed payload.
    ///
    /// A payload that does not match `T` becomes a failure envelope carrying
    /// the decode error, so callers never see a half-typed value.
    pub fn decode<T: DeserializeOwned>(self) -> Envelope<T> {
        self.and_then(|raw| match serde_json::from_value(raw) {
            Ok(value) => Envelope::Success(value),
            Err(error) => {
                let error = ApiError::decode(error.to_string());
                warn!(%error, "payload did not match the expected shape");
                Envelope::Failure(error.to_string())
            }
        })
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for Envelope<T> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error.to_string()),
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Self::Success(value) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("value", value)?;
            }
            Self::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
