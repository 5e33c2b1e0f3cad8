//! Keyed-hash authentication token generation.
//!
//! Every request to the gateway carries a `paytr_token`: an HMAC-SHA256
//! digest, base64-encoded, over a fixed-order concatenation of request
//! fields with the merchant salt appended. The gateway recomputes the same
//! token server-side and rejects the call on mismatch, so field order,
//! separators, and amount formatting here are an external contract, not an
//! implementation detail.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::models::CommonPaymentRequest;

type HmacSha256 = Hmac<Sha256>;

/// Formats an amount for token input: exactly two fractional digits,
/// `.`-separated.
///
/// # Examples
///
/// ```
/// use paytr_client::token::format_amount;
///
/// assert_eq!(format_amount(100.0), "100.00");
/// assert_eq!(format_amount(99.999), "100.00");
/// assert_eq!(format_amount(0.5), "0.50");
/// ```
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Generates authentication tokens from merchant key material.
///
/// Two schemes exist, both the same algorithm over different input
/// compositions:
///
/// - [`payment_token`](Self::payment_token): the ten-field fixed-order
///   concatenation used by all card-payment submissions
/// - [`simple_token`](Self::simple_token): a caller-composed pre-salt
///   string, used by the smaller endpoints (refund, status inquiry,
///   transaction report, BIN lookup, saved-card list/delete)
///
/// Token generation is deterministic: identical inputs always yield an
/// identical token.
pub struct TokenSigner {
    merchant_key: String,
    merchant_salt: String,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Creates a signer from the merchant's secret key and salt.
    #[must_use]
    pub fn new(merchant_key: impl Into<String>, merchant_salt: impl Into<String>) -> Self {
        Self { merchant_key: merchant_key.into(), merchant_salt: merchant_salt.into() }
    }

    /// Computes the primary payment token.
    ///
    /// Concatenates, in fixed order: merchant ID, user IP, merchant order
    /// ID, email, amount with exactly two decimal places, payment type,
    /// installment count, currency, test-mode flag, non-3D flag. The salt
    /// is appended and the result is HMAC-SHA256-hashed with the merchant
    /// key, then standard-base64 encoded.
    #[must_use]
    pub fn payment_token(&self, merchant_id: &str, request: &CommonPaymentRequest) -> String {
        let input = format!(
            "{}{}{}{}{}{}{}{}{}{}",
            merchant_id,
            request.user_ip,
            request.merchant_oid,
            request.email,
            format_amount(request.payment_amount),
            request.payment_type,
            request.installment_count,
            request.currency,
            request.test_mode,
            request.non_3d,
        );
        self.keyed_digest(&input)
    }

    /// Computes a token over a caller-composed pre-salt string.
    ///
    /// The caller concatenates the endpoint-specific fields (e.g. merchant
    /// ID + order ID for a status inquiry); this method appends the salt,
    /// hashes, and encodes. Identical algorithm to
    /// [`payment_token`](Self::payment_token), different input composition.
    #[must_use]
    pub fn simple_token(&self, data: &str) -> String {
        self.keyed_digest(data)
    }

    /// HMAC-SHA256 over `pre_salt + salt` with the merchant key, standard
    /// base64 of the digest.
    fn keyed_digest(&self, pre_salt: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.merchant_key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(pre_salt.as_bytes());
        mac.update(self.merchant_salt.as_bytes());
        base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            mac.finalize().into_bytes(),
        )
    }
}
