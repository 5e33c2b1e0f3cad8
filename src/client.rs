//! The gateway client facade.
//!
//! [`Client`] shapes outbound payloads for each gateway operation, attaches
//! the authentication token, submits the request through the transport, and
//! decodes the JSON response. It holds no state across calls beyond the
//! immutable credentials and the transport handle, so one instance may be
//! shared across tasks without coordination.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::{
    config::Credentials,
    error::{GatewayError, Result},
    models::{
        AddNewCardRequest, CommonPaymentRequest, GatewayResponse, NewCardPaymentRequest,
        RefundRequest, SavedCardPaymentRequest, StatusInquiryRequest, StatusInquiryResponse,
        TransactionReportRequest, TransactionReportResponse,
    },
    token::{TokenSigner, format_amount},
    transport::{HttpTransport, Transport},
};

/// Fixed base host for all gateway endpoints.
pub const GATEWAY_BASE_URL: &str = "https://www.paytr.com";

/// Envelope status tag the gateway uses for successful calls.
pub const SUCCESS_STATUS: &str = "success";

const PAYMENT_PATH: &str = "/odeme";
const REFUND_PATH: &str = "/odeme/iade";
const STATUS_INQUIRY_PATH: &str = "/odeme/durum-sorgu";
const TRANSACTION_REPORT_PATH: &str = "/rapor/islem-dokumu";
const BIN_LOOKUP_PATH: &str = "/odeme/api/bin-detail";
const SAVED_CARD_LIST_PATH: &str = "/odeme/capi/list";
const SAVED_CARD_DELETE_PATH: &str = "/odeme/capi/delete";

/// Nominal amount for the add-new-card validation charge (smallest
/// currency unit expressed in major units).
const CARD_VALIDATION_AMOUNT: f64 = 1.0;

/// Fixed single-item basket description for the validation charge.
const CARD_VALIDATION_BASKET: &str = r#"[["Card Validation", "1", 1]]"#;

/// Outbound wrapper that rides the auth token alongside the request
/// fields, keeping the caller-facing request types passive.
#[derive(Serialize)]
struct SignedPayload<'a, R: Serialize> {
    #[serde(flatten)]
    request: &'a R,
    paytr_token: &'a str,
}

#[derive(Serialize)]
struct RefundPayload<'a> {
    merchant_id: &'a str,
    merchant_oid: &'a str,
    return_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_no: Option<&'a str>,
    paytr_token: String,
}

#[derive(Serialize)]
struct StatusInquiryPayload<'a> {
    merchant_id: &'a str,
    merchant_oid: &'a str,
    paytr_token: String,
}

#[derive(Serialize)]
struct TransactionReportPayload<'a> {
    merchant_id: &'a str,
    start_date: &'a str,
    end_date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dummy: Option<i32>,
    paytr_token: String,
}

#[derive(Serialize)]
struct BinLookupPayload<'a> {
    merchant_id: &'a str,
    bin_number: &'a str,
    paytr_token: String,
}

#[derive(Serialize)]
struct SavedCardListPayload<'a> {
    merchant_id: &'a str,
    utoken: &'a str,
    paytr_token: String,
}

#[derive(Serialize)]
struct SavedCardDeletePayload<'a> {
    merchant_id: &'a str,
    utoken: &'a str,
    ctoken: &'a str,
    paytr_token: String,
}

/// Client for the PayTR gateway API.
///
/// Holds merchant [`Credentials`], a [`TokenSigner`] derived from them, and
/// a [`Transport`]. Every operation is a single independent HTTPS round
/// trip; no call mutates shared state, so a `Client` may be used from
/// multiple tasks concurrently.
///
/// # Examples
///
/// ```rust,no_run
/// use paytr_client::{Client, Credentials, models::StatusInquiryRequest};
///
/// # async fn example() -> paytr_client::error::Result<()> {
/// let client = Client::new(Credentials::new("merchant-id", "key", "salt"))?;
///
/// let status = client
///     .status_inquiry(StatusInquiryRequest { merchant_oid: "order-1".into() })
///     .await?;
/// println!("amount: {}", status.payment_amount);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client<T: Transport = HttpTransport> {
    credentials: Credentials,
    signer: TokenSigner,
    transport: T,
}

impl Client<HttpTransport> {
    /// Creates a client with the default HTTPS transport.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self::with_transport(credentials, HttpTransport::new()?))
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client with an injected transport.
    ///
    /// This is the crate's extensibility seam; it exists so tests can
    /// substitute a deterministic transport with no network access.
    #[must_use]
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        let signer = TokenSigner::new(&credentials.merchant_key, &credentials.merchant_salt);
        Self { credentials, signer, transport }
    }

    /// Processes a payment with a new card.
    ///
    /// Returns the raw envelope; checking `status` is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, or envelope
    /// decoding fails.
    #[instrument(skip(self, request), fields(merchant_oid = %request.common.merchant_oid))]
    pub async fn new_card_payment(&self, request: NewCardPaymentRequest) -> Result<GatewayResponse> {
        info!("submitting new-card payment");
        let token = self.signer.payment_token(&self.credentials.merchant_id, &request.common);
        self.send(&SignedPayload { request: &request, paytr_token: &token }, PAYMENT_PATH).await
    }

    /// Processes a payment with a previously saved card.
    ///
    /// The card is referenced by its user/card tokens; no PAN crosses the
    /// wire. Token scheme is identical to [`new_card_payment`](Self::new_card_payment).
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, or envelope
    /// decoding fails.
    #[instrument(skip(self, request), fields(merchant_oid = %request.common.merchant_oid))]
    pub async fn saved_card_payment(
        &self,
        request: SavedCardPaymentRequest,
    ) -> Result<GatewayResponse> {
        info!("submitting saved-card payment");
        let token = self.signer.payment_token(&self.credentials.merchant_id, &request.common);
        self.send(&SignedPayload { request: &request, paytr_token: &token }, PAYMENT_PATH).await
    }

    /// Processes a recurring payment with a saved card.
    ///
    /// Forces the recurring flag to `"1"` before token computation, so the
    /// flag is covered implicitly by the rest of the signed fields.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, or envelope
    /// decoding fails.
    #[instrument(skip(self, request), fields(merchant_oid = %request.common.merchant_oid))]
    pub async fn recurring_payment(
        &self,
        mut request: SavedCardPaymentRequest,
    ) -> Result<GatewayResponse> {
        info!("submitting recurring payment");
        request.recurring_payment = "1".to_owned();
        let token = self.signer.payment_token(&self.credentials.merchant_id, &request.common);
        self.send(&SignedPayload { request: &request, paytr_token: &token }, PAYMENT_PATH).await
    }

    /// Stores a new card by running a minimal validation charge.
    ///
    /// The gateway has no dedicated vaulting endpoint; this synthesizes a
    /// new-card payment for the nominal validation amount with test mode
    /// forced on, a fixed single-item basket, and the store flag set,
    /// reusing the caller's identity and contact fields.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, or envelope
    /// decoding fails.
    #[instrument(skip(self, request), fields(merchant_oid = %request.merchant_oid))]
    pub async fn add_new_card(&self, request: AddNewCardRequest) -> Result<GatewayResponse> {
        info!("adding new card via validation charge");
        let payment = NewCardPaymentRequest {
            common: CommonPaymentRequest {
                merchant_id: self.credentials.merchant_id.clone(),
                user_ip: request.user_ip,
                merchant_oid: request.merchant_oid,
                email: request.email,
                payment_amount: CARD_VALIDATION_AMOUNT,
                payment_type: "card".to_owned(),
                currency: "TRY".to_owned(),
                test_mode: "1".to_owned(),
                non_3d: "0".to_owned(),
                merchant_ok_url: request.merchant_ok_url,
                merchant_fail_url: request.merchant_fail_url,
                user_name: request.cc_owner.clone(),
                user_address: request.user_address,
                user_phone: request.user_phone,
                user_basket: CARD_VALIDATION_BASKET.to_owned(),
                debug_on: "1".to_owned(),
                client_lang: "tr".to_owned(),
                installment_count: "0".to_owned(),
            },
            cc_owner: request.cc_owner,
            card_number: request.card_number,
            expiry_month: request.expiry_month,
            expiry_year: request.expiry_year,
            cvv: request.cvv,
            card_type: request.card_type,
            store_card: "1".to_owned(),
        };

        let token = self.signer.payment_token(&self.credentials.merchant_id, &payment.common);
        self.send(&SignedPayload { request: &payment, paytr_token: &token }, PAYMENT_PATH).await
    }

    /// Refunds a payment by the given amount.
    ///
    /// The merchant ID is injected from the client's credentials; the token
    /// covers merchant ID + order ID + two-decimal amount.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, or envelope
    /// decoding fails.
    #[instrument(skip(self, request), fields(merchant_oid = %request.merchant_oid))]
    pub async fn refund_payment(&self, request: RefundRequest) -> Result<GatewayResponse> {
        info!("submitting refund");
        let token = self.signer.simple_token(&format!(
            "{}{}{}",
            self.credentials.merchant_id,
            request.merchant_oid,
            format_amount(request.return_amount),
        ));
        let payload = RefundPayload {
            merchant_id: &self.credentials.merchant_id,
            merchant_oid: &request.merchant_oid,
            return_amount: request.return_amount,
            reference_no: request.reference_no.as_deref(),
            paytr_token: token,
        };
        self.send(&payload, REFUND_PATH).await
    }

    /// Inquires about the status of a merchant transaction.
    ///
    /// An envelope status other than `"success"` is a hard failure: the
    /// call returns [`GatewayError::Gateway`] with the gateway's message
    /// and never attempts to decode `data`.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, envelope
    /// decoding, or typed-result decoding fails, or if the gateway reports
    /// a non-success status.
    #[instrument(skip(self, request), fields(merchant_oid = %request.merchant_oid))]
    pub async fn status_inquiry(
        &self,
        request: StatusInquiryRequest,
    ) -> Result<StatusInquiryResponse> {
        info!("submitting status inquiry");
        let token = self
            .signer
            .simple_token(&format!("{}{}", self.credentials.merchant_id, request.merchant_oid));
        let payload = StatusInquiryPayload {
            merchant_id: &self.credentials.merchant_id,
            merchant_oid: &request.merchant_oid,
            paytr_token: token,
        };

        let envelope = self.send(&payload, STATUS_INQUIRY_PATH).await?;
        if envelope.status != SUCCESS_STATUS {
            return Err(GatewayError::Gateway(envelope.message));
        }

        decode_data(envelope.data)
    }

    /// Retrieves the per-transaction report for a date range.
    ///
    /// Unlike [`status_inquiry`](Self::status_inquiry), the envelope status
    /// is not checked here; the decoded result carries its own `status`
    /// and `err_msg` fields.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, envelope
    /// decoding, or typed-result decoding fails.
    #[instrument(skip(self, request), fields(start_date = %request.start_date, end_date = %request.end_date))]
    pub async fn transaction_report(
        &self,
        request: TransactionReportRequest,
    ) -> Result<TransactionReportResponse> {
        info!("requesting transaction report");
        let token = self.signer.simple_token(&format!(
            "{}{}{}",
            self.credentials.merchant_id, request.start_date, request.end_date,
        ));
        let payload = TransactionReportPayload {
            merchant_id: &self.credentials.merchant_id,
            start_date: &request.start_date,
            end_date: &request.end_date,
            dummy: request.dummy,
            paytr_token: token,
        };

        let envelope = self.send(&payload, TRANSACTION_REPORT_PATH).await?;
        decode_data(envelope.data)
    }

    /// Looks up issuer details for a BIN (leading card digits).
    ///
    /// Returns the raw envelope; BIN details live in the open `data` map.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, or envelope
    /// decoding fails.
    #[instrument(skip(self))]
    pub async fn bin_lookup(&self, bin_number: &str) -> Result<GatewayResponse> {
        info!("looking up BIN details");
        let token =
            self.signer.simple_token(&format!("{bin_number}{}", self.credentials.merchant_id));
        let payload = BinLookupPayload {
            merchant_id: &self.credentials.merchant_id,
            bin_number,
            paytr_token: token,
        };
        self.send(&payload, BIN_LOOKUP_PATH).await
    }

    /// Lists the saved cards for a user token.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, or envelope
    /// decoding fails.
    #[instrument(skip(self, utoken))]
    pub async fn saved_cards(&self, utoken: &str) -> Result<GatewayResponse> {
        info!("listing saved cards");
        let token = self.signer.simple_token(utoken);
        let payload = SavedCardListPayload {
            merchant_id: &self.credentials.merchant_id,
            utoken,
            paytr_token: token,
        };
        self.send(&payload, SAVED_CARD_LIST_PATH).await
    }

    /// Deletes a saved card identified by user and card tokens.
    ///
    /// The token covers exactly userToken + cardToken.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, the HTTP round trip, or envelope
    /// decoding fails.
    #[instrument(skip(self, utoken, ctoken))]
    pub async fn delete_saved_card(&self, utoken: &str, ctoken: &str) -> Result<GatewayResponse> {
        info!("deleting saved card");
        let token = self.signer.simple_token(&format!("{utoken}{ctoken}"));
        let payload = SavedCardDeletePayload {
            merchant_id: &self.credentials.merchant_id,
            utoken,
            ctoken,
            paytr_token: token,
        };
        self.send(&payload, SAVED_CARD_DELETE_PATH).await
    }

    /// Generic send routine: serialize the payload, POST it to the
    /// endpoint path, and decode the response envelope.
    async fn send<P: Serialize>(&self, payload: &P, path: &str) -> Result<GatewayResponse> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| GatewayError::Serialization(format!("payload encoding failed: {e}")))?;

        let url = format!("{GATEWAY_BASE_URL}{path}");
        let response = self.transport.post_json(&url, &body).await?;

        serde_json::from_slice(&response).map_err(|e| {
            GatewayError::Deserialization(format!("response is not a valid envelope: {e}"))
        })
    }
}

/// Decodes the envelope's open `data` map into a typed result.
///
/// A missing map decodes as the empty object, so result types with
/// defaulted fields come back zero-valued rather than erroring.
fn decode_data<D: DeserializeOwned>(data: Option<Map<String, Value>>) -> Result<D> {
    serde_json::from_value(Value::Object(data.unwrap_or_default()))
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Transport that records the last request and echoes a canned body.
    struct MockTransport {
        response: Vec<u8>,
        last_request: Mutex<Option<(String, Vec<u8>)>>,
    }

    impl MockTransport {
        fn with_envelope(envelope: &GatewayResponse) -> Self {
            Self {
                response: serde_json::to_vec(envelope).unwrap(),
                last_request: Mutex::new(None),
            }
        }

        fn last_request(&self) -> (String, Value) {
            let guard = self.last_request.lock().unwrap();
            let (url, body) = guard.as_ref().expect("a request should have been sent");
            (url.clone(), serde_json::from_slice(body).unwrap())
        }
    }

    impl Transport for MockTransport {
        async fn post_json<'a>(&'a self, url: &'a str, body: &'a [u8]) -> Result<Vec<u8>> {
            *self.last_request.lock().unwrap() = Some((url.to_owned(), body.to_vec()));
            Ok(self.response.clone())
        }
    }

    fn success_envelope() -> GatewayResponse {
        GatewayResponse {
            status: "success".to_owned(),
            message: "ok".to_owned(),
            data: None,
        }
    }

    fn test_client(transport: MockTransport) -> Client<MockTransport> {
        Client::with_transport(
            Credentials::new("test_merchant", "test_key", "test_salt"),
            transport,
        )
    }

    #[test]
    fn test_signed_payload_flattens_request_fields() {
        let request = StatusInquiryRequest { merchant_oid: "order-1".to_owned() };
        let payload = SignedPayload { request: &request, paytr_token: "tok" };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["merchant_oid"], "order-1");
        assert_eq!(json["paytr_token"], "tok");
    }

    #[tokio::test]
    async fn test_new_card_payment_signs_and_posts_to_payment_path() {
        let client = test_client(MockTransport::with_envelope(&success_envelope()));

        let request = NewCardPaymentRequest {
            common: CommonPaymentRequest {
                merchant_id: "test_merchant".to_owned(),
                user_ip: "127.0.0.1".to_owned(),
                merchant_oid: "order-1".to_owned(),
                email: "a@b.com".to_owned(),
                payment_amount: 100.0,
                payment_type: "card".to_owned(),
                currency: "TRY".to_owned(),
                test_mode: "1".to_owned(),
                ..CommonPaymentRequest::default()
            },
            card_number: "4111111111111111".to_owned(),
            ..NewCardPaymentRequest::default()
        };

        let response = client.new_card_payment(request.clone()).await.unwrap();
        assert_eq!(response.status, "success");

        let (url, body) = client.transport.last_request();
        assert_eq!(url, "https://www.paytr.com/odeme");
        let expected = client.signer.payment_token("test_merchant", &request.common);
        assert_eq!(body["paytr_token"], expected.as_str());
        assert_eq!(body["card_number"], "4111111111111111");
    }

    #[tokio::test]
    async fn test_recurring_payment_forces_flag_before_signing() {
        let client = test_client(MockTransport::with_envelope(&success_envelope()));

        let request = SavedCardPaymentRequest {
            common: CommonPaymentRequest {
                merchant_oid: "order-2".to_owned(),
                ..CommonPaymentRequest::default()
            },
            utoken: "u1".to_owned(),
            ctoken: "c1".to_owned(),
            ..SavedCardPaymentRequest::default()
        };

        client.recurring_payment(request).await.unwrap();

        let (_, body) = client.transport.last_request();
        assert_eq!(body["recurring_payment"], "1");
    }

    #[tokio::test]
    async fn test_refund_injects_merchant_id_and_signed_token() {
        let client = test_client(MockTransport::with_envelope(&success_envelope()));

        let request = RefundRequest {
            merchant_oid: "test_order_789".to_owned(),
            return_amount: 50.0,
            reference_no: None,
        };
        client.refund_payment(request).await.unwrap();

        let (url, body) = client.transport.last_request();
        assert_eq!(url, "https://www.paytr.com/odeme/iade");
        assert_eq!(body["merchant_id"], "test_merchant");
        assert!(body.get("reference_no").is_none());

        let expected = client.signer.simple_token("test_merchanttest_order_78950.00");
        assert_eq!(body["paytr_token"], expected.as_str());
    }

    #[tokio::test]
    async fn test_status_inquiry_failure_short_circuits_with_gateway_message() {
        let envelope = GatewayResponse {
            status: "failed".to_owned(),
            message: "no such transaction".to_owned(),
            data: None,
        };
        let client = test_client(MockTransport::with_envelope(&envelope));

        let result = client
            .status_inquiry(StatusInquiryRequest { merchant_oid: "missing".to_owned() })
            .await;

        let Err(GatewayError::Gateway(message)) = result else {
            panic!("expected Gateway error, got {result:?}");
        };
        assert_eq!(message, "no such transaction");
    }

    #[tokio::test]
    async fn test_add_new_card_synthesizes_validation_charge() {
        let client = test_client(MockTransport::with_envelope(&success_envelope()));

        let request = AddNewCardRequest {
            user_id: "user-1".to_owned(),
            cc_owner: "John Doe".to_owned(),
            card_number: "4111111111111111".to_owned(),
            expiry_month: "12".to_owned(),
            expiry_year: "2030".to_owned(),
            cvv: "123".to_owned(),
            merchant_oid: "card-add-1".to_owned(),
            email: "a@b.com".to_owned(),
            user_ip: "127.0.0.1".to_owned(),
            ..AddNewCardRequest::default()
        };
        client.add_new_card(request).await.unwrap();

        let (url, body) = client.transport.last_request();
        assert_eq!(url, "https://www.paytr.com/odeme");
        assert_eq!(body["payment_amount"], 1.0);
        assert_eq!(body["test_mode"], "1");
        assert_eq!(body["store_card"], "1");
        assert_eq!(body["currency"], "TRY");
        assert_eq!(body["user_basket"], r#"[["Card Validation", "1", 1]]"#);
        assert_eq!(body["user_name"], "John Doe");
        assert_eq!(body["merchant_id"], "test_merchant");
    }

    #[test]
    fn test_decode_data_missing_map_yields_defaults() {
        let decoded: TransactionReportResponse = decode_data(None).unwrap();
        assert_eq!(decoded.status, "");
        assert!(decoded.transactions.is_empty());
    }
}
