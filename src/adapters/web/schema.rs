use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QrInquiryRequest {
	#[serde(rename = "customerId")]
	pub customer_id: Uuid,
	#[serde(rename = "qrCode")]
	pub qr_code:     String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QrInquiryResponse {
	#[serde(rename = "scanId")]
	pub scan_id:            Uuid,
	#[serde(rename = "merchantName")]
	pub merchant_name:      String,
	#[serde(rename = "merchantCity")]
	pub merchant_city:      String,
	#[serde(rename = "transactionAmount")]
	pub transaction_amount: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QrPaymentRequest {
	#[serde(rename = "scanId")]
	pub scan_id: Uuid,
	pub amount:  f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QrPaymentResponse {
	#[serde(rename = "paymentId")]
	pub payment_id: Uuid,
	#[serde(rename = "invoiceId")]
	pub invoice_id: String,
	pub status:     String,
}
