//! Error types for the PayTR gateway client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Serialization errors** ([`GatewayError::Serialization`]): the request
//!   payload cannot be encoded as JSON
//! - **Transport errors** ([`GatewayError::Http`], [`GatewayError::InvalidUrl`]):
//!   request construction or network failures
//! - **Deserialization errors** ([`GatewayError::Deserialization`],
//!   [`GatewayError::Decode`]): the response body is not a valid envelope, or
//!   its `data` payload does not match the expected typed result
//! - **Gateway errors** ([`GatewayError::Gateway`]): the gateway reported a
//!   business failure in its response envelope

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// This is a convenience type that uses [`GatewayError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur when talking to the PayTR gateway.
///
/// Every failure propagates to the immediate caller as a distinct,
/// inspectable error value. No error is retried or recovered internally;
/// each operation is a single atomic round trip.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request payload could not be encoded as JSON.
    ///
    /// This indicates a bug in request construction rather than a gateway
    /// problem; all request types in this crate serialize infallibly under
    /// normal circumstances.
    #[error("request payload serialization failed: {0}")]
    Serialization(String),

    /// HTTP request construction, network communication, or body read failed.
    ///
    /// Wraps [`reqwest::Error`]. Common causes include network timeouts
    /// (default: 10 seconds), connection refusal, DNS resolution failures,
    /// and TLS errors.
    ///
    /// # Recovery
    ///
    /// The client does not retry. Verify network connectivity and reissue
    /// the call.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An endpoint URL was rejected before the request was sent.
    ///
    /// The gateway base host is fixed, so this only occurs when a custom
    /// transport is handed a malformed or non-HTTPS URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// The response body was not a valid gateway envelope.
    ///
    /// The gateway always replies with a JSON object of the shape
    /// `{status, message, data}`. Anything else (HTML error pages,
    /// truncated bodies) surfaces here.
    #[error("gateway response deserialization failed: {0}")]
    Deserialization(String),

    /// The envelope's open `data` payload did not match the typed result.
    ///
    /// Raised by the endpoints that decode `data` into a structured
    /// response (status inquiry, transaction report).
    #[error("response data decoding failed: {0}")]
    Decode(String),

    /// The gateway reported a business failure.
    ///
    /// Carries the gateway's human-readable message. Raised explicitly by
    /// the status-inquiry operation when the envelope status is not
    /// `"success"`; other operations return the envelope unmodified and
    /// leave the status check to the caller.
    #[error("gateway error: {0}")]
    Gateway(String),
}
