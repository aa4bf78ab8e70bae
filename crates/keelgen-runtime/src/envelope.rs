//! Normalized call outcomes.

// External imports (alphabetized)
use reqwest::{header::HeaderMap, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::TransportError;

/// Outcome of one call. Exactly one variant applies; none of them is raised
/// as an `Err`.
#[derive(Debug)]
pub enum ResponseEnvelope<T, E> {
    /// 2xx response whose body narrowed to `T`.
    Success(Success<T>),
    /// Non-2xx response.
    Error(Failure<E>),
    /// 2xx response whose body does not match `T`.
    Malformed(Malformed),
    /// No response was received.
    Transport(TransportError),
    /// The caller cancelled the call.
    Aborted,
}

#[derive(Debug, Clone)]
pub struct Success<T> {
    pub data: T,
    pub status: StatusCode,
    pub headers: HeaderMap,
}

#[derive(Debug, Clone)]
pub struct Failure<E> {
    /// Typed error body, when the body conforms to `E`.
    pub error: Option<E>,
    /// Raw JSON body, `{}` when empty or unparsable.
    pub body: Value,
    pub status: StatusCode,
    pub headers: HeaderMap,
}

#[derive(Debug)]
pub struct Malformed {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub source: serde_json::Error,
}

impl<T, E> ResponseEnvelope<T, E> {
    /// HTTP status, absent for transport failures and aborted calls.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Success(s) => Some(s.status),
            Self::Error(f) => Some(f.status),
            Self::Malformed(m) => Some(m.status),
            Self::Transport(_) | Self::Aborted => None,
        }
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Self::Success(s) => Some(&s.headers),
            Self::Error(f) => Some(&f.headers),
            Self::Malformed(m) => Some(&m.headers),
            Self::Transport(_) | Self::Aborted => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(s) => Some(&s.data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(s) => Some(s.data),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure<E>> {
        match self {
            Self::Error(f) => Some(f),
            _ => None,
        }
    }

    /// Typed application error, when the server returned one that conforms.
    pub fn error(&self) -> Option<&E> {
        self.failure().and_then(|f| f.error.as_ref())
    }

    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl ResponseEnvelope<Value, Value> {
    /// Narrow raw JSON bodies to the declared success and error types.
    pub fn narrow<T, E>(self) -> ResponseEnvelope<T, E>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        match self {
            Self::Success(Success {
                data,
                status,
                headers,
            }) => match T::deserialize(&data) {
                Ok(data) => ResponseEnvelope::Success(Success {
                    data,
                    status,
                    headers,
                }),
                Err(source) => ResponseEnvelope::Malformed(Malformed {
                    status,
                    headers,
                    body: data,
                    source,
                }),
            },
            Self::Error(Failure {
                body,
                status,
                headers,
                ..
            }) => ResponseEnvelope::Error(Failure {
                error: E::deserialize(&body).ok(),
                body,
                status,
                headers,
            }),
            Self::Malformed(m) => ResponseEnvelope::Malformed(m),
            Self::Transport(e) => ResponseEnvelope::Transport(e),
            Self::Aborted => ResponseEnvelope::Aborted,
        }
    }
}

/// Data of a response that declares no content.
///
/// Accepts any JSON body so a server that sends something anyway still
/// yields a success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Empty {}

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(Empty {})
    }
}
