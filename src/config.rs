//! Merchant credential configuration.
//!
//! The entire configuration surface of this crate is three credential
//! values supplied at client construction. There is no environment-variable
//! or file-based configuration.

use std::fmt;

/// Merchant credentials for the PayTR gateway.
///
/// Immutable per client instance. The merchant key and salt feed the
/// keyed-hash token generation for every request; the merchant ID is
/// injected into request payloads by the client.
///
/// # Security
///
/// The `Debug` implementation redacts the key and salt so credentials
/// never leak into logs.
///
/// # Examples
///
/// ```
/// use paytr_client::Credentials;
///
/// let credentials = Credentials::new("merchant-id", "merchant-key", "merchant-salt");
/// assert_eq!(credentials.merchant_id, "merchant-id");
/// ```
#[derive(Clone)]
pub struct Credentials {
    /// The merchant's unique identifier.
    pub merchant_id: String,
    /// The secret key used for keyed-hash token generation.
    pub merchant_key: String,
    /// The salt appended to token input before hashing.
    pub merchant_salt: String,
}

impl Credentials {
    /// Creates a new credential set.
    #[must_use]
    pub fn new(
        merchant_id: impl Into<String>,
        merchant_key: impl Into<String>,
        merchant_salt: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            merchant_key: merchant_key.into(),
            merchant_salt: merchant_salt.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("merchant_key", &"<redacted>")
            .field("merchant_salt", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_construction() {
        let credentials = Credentials::new("m1", "k1", "s1");
        assert_eq!(credentials.merchant_id, "m1");
        assert_eq!(credentials.merchant_key, "k1");
        assert_eq!(credentials.merchant_salt, "s1");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("m1", "very-secret-key", "very-secret-salt");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("m1"));
        assert!(!debug.contains("very-secret-key"));
        assert!(!debug.contains("very-secret-salt"));
    }
}
