use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::provider::{QrInquiry, RESPONSE_APPROVED};

/// Lifecycle of a QRIS payment. SUCCESS, FAILED and CANCEL are terminal;
/// a record never leaves SUCCESS.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
	Pending,
	Success,
	Failed,
	Cancel,
}

impl PaymentStatus {
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Success | Self::Failed | Self::Cancel)
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Pending => "PENDING",
			Self::Success => "SUCCESS",
			Self::Failed => "FAILED",
			Self::Cancel => "CANCEL",
		}
	}
}

pub fn generate_invoice_id() -> String {
	format!("QRIS-{}", Uuid::new_v4().simple())
}

/// Merchant/QR metadata captured at inquiry time. Immutable after creation.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScanRecord {
	pub scan_id:            Uuid,
	pub customer_id:        Uuid,
	pub qr_code:            String,
	pub merchant_name:      Option<String>,
	pub merchant_city:      Option<String>,
	pub merchant_pan:       Option<String>,
	pub transaction_amount: Option<f64>,
	pub response_code:      String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at:         OffsetDateTime,
}

impl ScanRecord {
	pub fn from_inquiry(
		customer_id: Uuid,
		qr_code: &str,
		inquiry: &QrInquiry,
	) -> Self {
		Self {
			scan_id:            Uuid::new_v4(),
			customer_id,
			qr_code:            qr_code.to_string(),
			merchant_name:      Some(inquiry.merchant_name.clone()),
			merchant_city:      Some(inquiry.merchant_city.clone()),
			merchant_pan:       Some(inquiry.merchant_pan.clone()),
			transaction_amount: inquiry.transaction_amount,
			response_code:      RESPONSE_APPROVED.to_string(),
			created_at:         OffsetDateTime::now_utc(),
		}
	}

	pub fn rejected(
		customer_id: Uuid,
		qr_code: &str,
		response_code: String,
	) -> Self {
		Self {
			scan_id: Uuid::new_v4(),
			customer_id,
			qr_code: qr_code.to_string(),
			merchant_name: None,
			merchant_city: None,
			merchant_pan: None,
			transaction_amount: None,
			response_code,
			created_at: OffsetDateTime::now_utc(),
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentRecord {
	pub payment_id:       Uuid,
	pub scan_id:          Uuid,
	pub invoice_id:       String,
	pub amount:           f64,
	pub status:           PaymentStatus,
	pub response_code:    Option<String>,
	pub response_message: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at:       OffsetDateTime,
	#[serde(
		with = "time::serde::rfc3339::option",
		skip_serializing_if = "Option::is_none",
		default
	)]
	pub processed_at:     Option<OffsetDateTime>,
}

impl PaymentRecord {
	pub fn new(scan_id: Uuid, amount: f64) -> Self {
		Self {
			payment_id: Uuid::new_v4(),
			scan_id,
			invoice_id: generate_invoice_id(),
			amount,
			status: PaymentStatus::Pending,
			response_code: None,
			response_message: None,
			created_at: OffsetDateTime::now_utc(),
			processed_at: None,
		}
	}

	/// A retried payment goes out under a fresh invoice id.
	pub fn regenerate_invoice(&mut self) {
		self.invoice_id = generate_invoice_id();
	}
}

/// Float credit taken before paying the merchant. One per payment attempt;
/// the latest attempt is the one the payment points at.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TopUpRecord {
	pub top_up_id:          Uuid,
	pub payment_id:         Uuid,
	pub amount:             f64,
	pub provider_reference: Option<String>,
	pub result_code:        Option<String>,
	pub voided:             bool,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at:         OffsetDateTime,
}

impl TopUpRecord {
	pub fn for_payment(payment: &PaymentRecord) -> Self {
		Self {
			top_up_id:          Uuid::new_v4(),
			payment_id:         payment.payment_id,
			amount:             payment.amount,
			provider_reference: None,
			result_code:        None,
			voided:             false,
			created_at:         OffsetDateTime::now_utc(),
		}
	}
}

/// Reversal issued when the merchant payment failed after the float was
/// already credited.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VoidTopUpRecord {
	pub void_id:       Uuid,
	pub top_up_id:     Uuid,
	pub response_code: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at:    OffsetDateTime,
}

impl VoidTopUpRecord {
	pub fn for_top_up(top_up_id: Uuid) -> Self {
		Self {
			void_id:       Uuid::new_v4(),
			top_up_id,
			response_code: None,
			created_at:    OffsetDateTime::now_utc(),
		}
	}
}
