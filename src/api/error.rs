//! Error type for calls against the impact service.

use thiserror::Error;

/// Failure of a single API call.
///
/// Cloneable so it can travel over the worker result channel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// The service answered with `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// Network failure, timeout, or an HTTP error without a usable envelope.
    #[error("{call}: {detail}")]
    Transport { call: &'static str, detail: String },
    /// The envelope reported success but the payload did not match.
    #[error("{call}: malformed response ({detail})")]
    Decode { call: &'static str, detail: String },
}

impl RequestError {
    pub fn transport(call: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            call,
            detail: err.to_string(),
        }
    }

    pub fn decode(call: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            call,
            detail: err.to_string(),
        }
    }
}
