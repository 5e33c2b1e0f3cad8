//! Request and response data-transfer types for the PayTR gateway API.
//!
//! Every type here is a passive record with the gateway's wire field names;
//! nothing carries behavior or lifecycle beyond one request/response
//! exchange. The authentication token is attached at serialization time by
//! the client, so none of the request types expose a token field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields shared by all card-payment submissions.
///
/// The first ten fields (through `non_3d`) are covered by the keyed-hash
/// token in a fixed order; their exact values are part of the signed
/// contract the gateway verifies server-side.
///
/// Derives [`Default`] so callers populate only the fields an operation
/// needs; the gateway rejects genuinely missing fields after the round
/// trip (no local validation is performed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonPaymentRequest {
    /// The merchant's unique identifier.
    pub merchant_id: String,
    /// IP address of the paying user.
    pub user_ip: String,
    /// Merchant-assigned order identifier.
    pub merchant_oid: String,
    /// Paying user's email address.
    pub email: String,
    /// Payment amount in major currency units.
    pub payment_amount: f64,
    /// Payment type (e.g., `"card"`).
    pub payment_type: String,
    /// ISO currency code (e.g., `"TRY"`).
    pub currency: String,
    /// Test-mode flag: `"1"` for test transactions, `"0"` otherwise.
    pub test_mode: String,
    /// Non-3D-secure flag: `"1"` to opt out of 3-D secure.
    pub non_3d: String,
    /// Callback URL on successful payment.
    pub merchant_ok_url: String,
    /// Callback URL on failed payment.
    pub merchant_fail_url: String,
    /// Paying user's display name.
    pub user_name: String,
    /// Paying user's address.
    pub user_address: String,
    /// Paying user's phone number.
    pub user_phone: String,
    /// Basket description, JSON-encoded as `[[name, unit_price, count], ...]`.
    pub user_basket: String,
    /// Debug flag: `"1"` to request verbose gateway diagnostics.
    pub debug_on: String,
    /// Language for gateway-facing pages (e.g., `"tr"`, `"en"`).
    pub client_lang: String,
    /// Installment count, `"0"` for single payment.
    pub installment_count: String,
}

/// A payment with a card the gateway has not seen before.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCardPaymentRequest {
    /// Common payment fields.
    #[serde(flatten)]
    pub common: CommonPaymentRequest,
    /// Name of the card owner.
    pub cc_owner: String,
    /// Full card number (PAN).
    pub card_number: String,
    /// Two-digit expiry month.
    pub expiry_month: String,
    /// Expiry year (two- or four-digit).
    pub expiry_year: String,
    /// Card verification value.
    pub cvv: String,
    /// Card brand (e.g., `"visa"`, `"mastercard"`).
    pub card_type: String,
    /// Store flag: `"1"` to vault the card for later token payments.
    pub store_card: String,
}

/// A payment with a previously saved card, referenced by opaque tokens
/// instead of a raw PAN.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedCardPaymentRequest {
    /// Common payment fields.
    #[serde(flatten)]
    pub common: CommonPaymentRequest,
    /// User token identifying the card owner at the gateway.
    pub utoken: String,
    /// Card token identifying the stored card.
    pub ctoken: String,
    /// Card verification value.
    pub cvv: String,
    /// Recurring flag: forced to `"1"` by the recurring-payment operation.
    pub recurring_payment: String,
}

/// Identity, contact, and card details for storing a new card.
///
/// The client turns this into a minimal-amount test-mode authorization
/// with the store flag set; the gateway has no dedicated vaulting call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddNewCardRequest {
    /// Application-side user identifier.
    pub user_id: String,
    /// Name of the card owner.
    pub cc_owner: String,
    /// Full card number (PAN).
    pub card_number: String,
    /// Two-digit expiry month.
    pub expiry_month: String,
    /// Expiry year (two- or four-digit).
    pub expiry_year: String,
    /// Card verification value.
    pub cvv: String,
    /// Card brand.
    pub card_type: String,
    /// IP address of the user.
    pub user_ip: String,
    /// Merchant-assigned order identifier for the validation charge.
    pub merchant_oid: String,
    /// User's email address.
    pub email: String,
    /// User's display name.
    pub user_name: String,
    /// User's address.
    pub user_address: String,
    /// User's phone number.
    pub user_phone: String,
    /// Callback URL on success.
    pub merchant_ok_url: String,
    /// Callback URL on failure.
    pub merchant_fail_url: String,
    /// Language for gateway-facing pages.
    pub client_lang: String,
    /// ISO currency code.
    pub currency: String,
    /// Payment amount; overridden with the nominal validation amount.
    pub payment_amount: f64,
}

/// A refund of a completed payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Merchant order identifier of the payment to refund.
    pub merchant_oid: String,
    /// Amount to return in major currency units.
    pub return_amount: f64,
    /// Optional merchant-side reference number for the refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
}

/// A status inquiry for a merchant transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusInquiryRequest {
    /// Merchant order identifier to inquire about.
    pub merchant_oid: String,
}

/// A transaction report request over a date range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionReportRequest {
    /// Range start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// Range end date, `YYYY-MM-DD`.
    pub end_date: String,
    /// When set, the gateway returns synthetic report rows for testing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dummy: Option<i32>,
}

/// The gateway's uniform top-level response shape.
///
/// `status` is `"success"` or a failure tag, `message` is human-readable,
/// and `data` is an open JSON object whose keys depend on the endpoint.
/// The endpoints with structured nested data (status inquiry, transaction
/// report) decode `data` into typed results; all others return this
/// envelope unmodified and leave interpretation to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Status tag reported by the gateway.
    #[serde(default)]
    pub status: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Open payload map; absent on endpoints without structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

/// Decoded result of a merchant status inquiry.
///
/// All scalar fields default to empty when the gateway omits them. The
/// monetary and date fields arrive as gateway-formatted strings and are
/// passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusInquiryResponse {
    /// Transaction status tag.
    #[serde(default)]
    pub status: String,
    /// Original payment amount.
    #[serde(default)]
    pub payment_amount: String,
    /// Total charged including installment costs.
    #[serde(default)]
    pub payment_total: String,
    /// Payment date.
    #[serde(default)]
    pub payment_date: String,
    /// ISO currency code.
    #[serde(default)]
    pub currency: String,
    /// Net amount after gateway deductions.
    #[serde(default)]
    pub net_tutar: String,
    /// Deducted commission amount.
    #[serde(default)]
    pub kesinti_tutari: String,
    /// Installment count.
    #[serde(default)]
    pub taksit: String,
    /// Card brand.
    #[serde(default)]
    pub kart_marka: String,
    /// Masked card number.
    #[serde(default)]
    pub masked_pan: String,
    /// Payment type.
    #[serde(default)]
    pub odeme_tipi: String,
    /// Test-mode flag of the original transaction.
    #[serde(default)]
    pub test_mode: String,
    /// Refund summary.
    #[serde(default)]
    pub returns: String,
    /// Gateway error number, when the transaction failed.
    #[serde(default)]
    pub err_no: String,
    /// Gateway error message, when the transaction failed.
    #[serde(default)]
    pub err_msg: String,
    /// Per-submerchant payout breakdown.
    #[serde(default)]
    pub submerchant_payments: Vec<SubmerchantPayment>,
}

/// Payout line for one submerchant within a split payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmerchantPayment {
    /// Submerchant identifier.
    #[serde(default)]
    pub submerchant_id: String,
    /// Submerchant's share of the payment.
    #[serde(default)]
    pub submerchant_price: String,
    /// Payout rate applied to the submerchant.
    #[serde(default)]
    pub submerchant_payout_rate: String,
    /// Amount paid out to the submerchant.
    #[serde(default)]
    pub submerchant_payout_amount: String,
}

/// Decoded result of a transaction report request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionReportResponse {
    /// Report status tag.
    #[serde(default)]
    pub status: String,
    /// Per-transaction report rows for the requested range.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Gateway error message, when the report failed.
    #[serde(default)]
    pub err_msg: String,
}

/// One row of a transaction report.
///
/// Field names follow the gateway's wire contract; amounts and dates are
/// gateway-formatted strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction type (e.g., sale, refund).
    #[serde(default)]
    pub islem_tipi: String,
    /// Net amount after deductions.
    #[serde(default)]
    pub net_tutar: String,
    /// Deducted commission amount.
    #[serde(default)]
    pub kesinti_tutari: String,
    /// Commission rate.
    #[serde(default)]
    pub kesinti_orani: String,
    /// Transaction amount.
    #[serde(default)]
    pub islem_tutari: String,
    /// Amount charged to the payer.
    #[serde(default)]
    pub odeme_tutari: String,
    /// Transaction date.
    #[serde(default)]
    pub islem_tarihi: String,
    /// ISO currency code.
    #[serde(default)]
    pub para_birimi: String,
    /// Installment count.
    #[serde(default)]
    pub taksit: String,
    /// Card brand.
    #[serde(default)]
    pub kart_marka: String,
    /// Masked card number.
    #[serde(default)]
    pub kart_no: String,
    /// Merchant order identifier.
    #[serde(default)]
    pub siparis_no: String,
    /// Payment type.
    #[serde(default)]
    pub odeme_tipi: String,
}

/// Storage-shaped record of a payment.
///
/// A passive data-transfer definition for applications that persist
/// payment history; this crate contains no repository or database logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Record identifier.
    pub id: String,
    /// Application-side user identifier.
    pub user_id: String,
    /// Payment amount in major currency units.
    pub amount: f64,
    /// ISO currency code.
    pub currency: String,
    /// Payment status.
    pub status: String,
    /// Payment method used.
    pub payment_method: String,
    /// Merchant order identifier.
    pub merchant_oid: String,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
    /// Last record update time.
    pub updated_at: DateTime<Utc>,
}

/// Storage-shaped record of a saved card.
///
/// Like [`Payment`], a passive data-transfer definition only; the raw PAN
/// never appears, only the gateway's opaque tokens and the last four
/// digits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCard {
    /// Record identifier.
    pub id: String,
    /// Application-side user identifier.
    pub user_id: String,
    /// User token identifying the card owner at the gateway.
    pub utoken: String,
    /// Card token identifying the stored card.
    pub ctoken: String,
    /// Last four digits of the card number.
    pub last_four: String,
    /// Card brand.
    pub card_type: String,
    /// Card expiry, `MM/YY`.
    pub expiry_date: String,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_request_serializes_flat() {
        let request = NewCardPaymentRequest {
            common: CommonPaymentRequest {
                merchant_id: "m1".to_owned(),
                merchant_oid: "order-1".to_owned(),
                payment_amount: 100.0,
                ..CommonPaymentRequest::default()
            },
            card_number: "4111111111111111".to_owned(),
            ..NewCardPaymentRequest::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        // Common fields flatten to the top level of the wire object.
        assert_eq!(json["merchant_id"], "m1");
        assert_eq!(json["merchant_oid"], "order-1");
        assert_eq!(json["card_number"], "4111111111111111");
        assert!(json.get("common").is_none());
    }

    #[test]
    fn test_refund_request_omits_absent_reference() {
        let request = RefundRequest {
            merchant_oid: "order-2".to_owned(),
            return_amount: 25.0,
            reference_no: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("reference_no"));
    }

    #[test]
    fn test_report_request_omits_absent_dummy() {
        let request = TransactionReportRequest {
            start_date: "2024-01-01".to_owned(),
            end_date: "2024-01-31".to_owned(),
            dummy: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("dummy"));

        let with_dummy = TransactionReportRequest { dummy: Some(1), ..request };
        let json = serde_json::to_string(&with_dummy).unwrap();
        assert!(json.contains("\"dummy\":1"));
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: GatewayResponse =
            serde_json::from_str(r#"{"status":"failed","message":"card declined"}"#).unwrap();
        assert_eq!(envelope.status, "failed");
        assert_eq!(envelope.message, "card declined");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_envelope_with_open_data_map() {
        let envelope: GatewayResponse = serde_json::from_str(
            r#"{"status":"success","message":"ok","data":{"bin_brand":"VISA","bin_type":"CREDIT"}}"#,
        )
        .unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data["bin_brand"], "VISA");
        assert_eq!(data["bin_type"], "CREDIT");
    }

    #[test]
    fn test_status_inquiry_response_defaults_missing_fields() {
        let response: StatusInquiryResponse =
            serde_json::from_str(r#"{"status":"success","payment_amount":"100.00"}"#).unwrap();
        assert_eq!(response.status, "success");
        assert_eq!(response.payment_amount, "100.00");
        assert_eq!(response.masked_pan, "");
        assert!(response.submerchant_payments.is_empty());
    }

    #[test]
    fn test_transaction_report_response_decodes_rows() {
        let response: TransactionReportResponse = serde_json::from_str(
            r#"{
                "status": "success",
                "transactions": [{
                    "islem_tipi": "sale",
                    "net_tutar": "95.00",
                    "kesinti_tutari": "5.00",
                    "islem_tutari": "100.00",
                    "siparis_no": "order-3",
                    "kart_marka": "VISA"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(response.transactions.len(), 1);
        let row = &response.transactions[0];
        assert_eq!(row.islem_tipi, "sale");
        assert_eq!(row.net_tutar, "95.00");
        assert_eq!(row.siparis_no, "order-3");
        // Omitted columns fall back to empty.
        assert_eq!(row.taksit, "");
    }

    #[test]
    fn test_saved_card_request_serializes_tokens() {
        let request = SavedCardPaymentRequest {
            utoken: "u-token".to_owned(),
            ctoken: "c-token".to_owned(),
            recurring_payment: "1".to_owned(),
            ..SavedCardPaymentRequest::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["utoken"], "u-token");
        assert_eq!(json["ctoken"], "c-token");
        assert_eq!(json["recurring_payment"], "1");
    }
}
