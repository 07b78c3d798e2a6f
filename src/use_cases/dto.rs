use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::qris::PaymentStatus;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InquireQrCommand {
	pub customer_id: Uuid,
	pub qr_code:     String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QrInquiryResult {
	pub scan_id:            Uuid,
	pub merchant_name:      String,
	pub merchant_city:      String,
	pub transaction_amount: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreatePaymentCommand {
	pub scan_id: Uuid,
	pub amount:  f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentStatusResult {
	pub payment_id:    Uuid,
	pub invoice_id:    String,
	pub status:        PaymentStatus,
	pub response_code: Option<String>,
}
