//! PayTR gateway client: typed Rust bindings for the PayTR card-payment
//! HTTP API.
//!
//! This crate shapes outbound requests (new-card payment, saved-card
//! payment, recurring payment, refund, status inquiry, transaction report,
//! card-on-file management, BIN lookup), computes a keyed-hash
//! authentication token per request, submits the request over HTTPS as
//! JSON, and decodes the gateway's JSON response into typed results.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Caller     │
//! └──────┬───────┘
//!        │ typed request
//! ┌──────▼──────────────────────────────────────────┐
//! │              paytr-client (this crate)          │
//! │  ┌─────────────┐     ┌───────────────────────┐  │
//! │  │   Client    │─────│     TokenSigner       │  │
//! │  │  (request   │     │  (HMAC-SHA256 +       │  │
//! │  │   shaping)  │     │   base64 tokens)      │  │
//! │  └──────┬──────┘     └───────────────────────┘  │
//! │         │ JSON over the Transport seam          │
//! └─────────┼───────────────────────────────────────┘
//!           │ HTTPS POST
//! ┌─────────▼──────┐
//! │  PayTR gateway │
//! └────────────────┘
//! ```
//!
//! The client is stateless across calls: the only configuration it holds
//! is the merchant credentials and the transport handle. Calls may be
//! issued concurrently from multiple tasks without coordination. There is
//! no retry, no caching, and no persistence in this crate.
//!
//! # Quick Start
//!
//! ## 1. Charge a new card
//!
//! ```rust,no_run
//! use paytr_client::{
//!     Client, Credentials,
//!     models::{CommonPaymentRequest, NewCardPaymentRequest},
//! };
//!
//! # async fn example() -> paytr_client::error::Result<()> {
//! let client = Client::new(Credentials::new("merchant-id", "merchant-key", "merchant-salt"))?;
//!
//! let request = NewCardPaymentRequest {
//!     common: CommonPaymentRequest {
//!         merchant_id: "merchant-id".into(),
//!         user_ip: "203.0.113.10".into(),
//!         merchant_oid: "order-1001".into(),
//!         email: "buyer@example.com".into(),
//!         payment_amount: 249.90,
//!         payment_type: "card".into(),
//!         currency: "TRY".into(),
//!         test_mode: "0".into(),
//!         installment_count: "0".into(),
//!         ..CommonPaymentRequest::default()
//!     },
//!     cc_owner: "Jane Doe".into(),
//!     card_number: "4111111111111111".into(),
//!     expiry_month: "12".into(),
//!     expiry_year: "2030".into(),
//!     cvv: "123".into(),
//!     ..NewCardPaymentRequest::default()
//! };
//!
//! let response = client.new_card_payment(request).await?;
//! println!("status: {}", response.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Inquire about a transaction
//!
//! ```rust,no_run
//! use paytr_client::{Client, Credentials, models::StatusInquiryRequest};
//!
//! # async fn example() -> paytr_client::error::Result<()> {
//! let client = Client::new(Credentials::new("merchant-id", "merchant-key", "merchant-salt"))?;
//!
//! let status = client
//!     .status_inquiry(StatusInquiryRequest { merchant_oid: "order-1001".into() })
//!     .await?;
//!
//! println!("amount: {} {}", status.payment_amount, status.currency);
//! # Ok(())
//! # }
//! ```
//!
//! ## 3. Generate tokens directly
//!
//! ```rust
//! use paytr_client::token::TokenSigner;
//!
//! let signer = TokenSigner::new("merchant-key", "merchant-salt");
//!
//! // Refund token: merchant ID + order ID + two-decimal amount, then salt.
//! let token = signer.simple_token("merchant-idorder-100150.00");
//! assert_eq!(token.len(), 44); // base64 of a 32-byte digest
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the [`Client`] facade with one method per gateway operation
//! - [`token`]: keyed-hash authentication token generation
//! - [`models`]: request/response data-transfer types
//! - [`transport`]: the [`Transport`](transport::Transport) seam and the
//!   default HTTPS implementation
//! - [`config`]: merchant [`Credentials`]
//! - [`error`]: error types
//!
//! # Security Considerations
//!
//! - **Credentials**: the merchant key and salt are secrets; `Credentials`
//!   redacts them from `Debug` output and operations never log them.
//! - **Card data**: PANs and CVVs are never logged; saved-card operations
//!   reference cards only by opaque tokens.
//! - **HTTPS only**: the default transport rejects non-HTTPS URLs.
//! - **Token contract**: field order and two-decimal amount formatting in
//!   the token input are verified server-side; a mismatch causes the
//!   gateway to reject the call.
//!
//! # Error Handling
//!
//! All operations return [`Result<T, GatewayError>`](error::Result). No
//! error is retried internally; every failure propagates to the caller as
//! a distinct, inspectable value.
//!
//! ```rust,no_run
//! use paytr_client::{Client, Credentials, GatewayError, models::StatusInquiryRequest};
//!
//! # async fn example() {
//! let client = Client::new(Credentials::new("merchant-id", "key", "salt")).unwrap();
//!
//! match client.status_inquiry(StatusInquiryRequest { merchant_oid: "order-1".into() }).await {
//!     Ok(status) => println!("ok: {}", status.status),
//!     Err(GatewayError::Gateway(message)) => {
//!         eprintln!("gateway rejected the inquiry: {message}");
//!     }
//!     Err(GatewayError::Http(e)) => {
//!         eprintln!("network failure: {e}");
//!         // Reissue the call; the client does not retry.
//!     }
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod token;
pub mod transport;

pub use client::{Client, GATEWAY_BASE_URL, SUCCESS_STATUS};
pub use config::Credentials;
pub use error::{GatewayError, Result};
pub use models::GatewayResponse;
