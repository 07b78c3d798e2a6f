//! Wire types for the acquirer's QRIS API.
//!
//! Every response carries a `responseCode`; "00" is approval and anything
//! else is mapped into a typed [`ProviderError`] so callers only ever see
//! tagged success/error branches.

use serde::{Deserialize, Serialize};

use crate::domain::provider::{
	PaymentReceipt, ProviderError, QrInquiry, RESPONSE_APPROVED,
	RESPONSE_TOKEN_EXPIRED, TopUpReceipt, TransactionStatus, VoidReceipt,
};
use crate::domain::qris::PaymentStatus;

fn rejection(code: String, message: Option<String>) -> ProviderError {
	if code == RESPONSE_TOKEN_EXPIRED {
		return ProviderError::TokenExpired;
	}
	ProviderError::Api {
		code,
		message: message.unwrap_or_default(),
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOnRequest {
	pub client_id: String,
	pub timestamp: i64,
	pub signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOnResponse {
	pub response_code:    String,
	pub response_message: Option<String>,
	pub access_token:     Option<String>,
}

impl SignOnResponse {
	pub fn into_token(self) -> Result<String, ProviderError> {
		if self.response_code != RESPONSE_APPROVED {
			return Err(rejection(self.response_code, self.response_message));
		}
		self.access_token.ok_or_else(|| ProviderError::Transport {
			message: "signon response carried no access token".to_string(),
		})
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
	pub access_token: String,
	pub qr_content:   String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryResponse {
	pub response_code:      String,
	pub response_message:   Option<String>,
	pub merchant_name:      Option<String>,
	pub merchant_city:      Option<String>,
	pub merchant_pan:       Option<String>,
	pub transaction_amount: Option<String>,
}

impl InquiryResponse {
	pub fn into_inquiry(self) -> Result<QrInquiry, ProviderError> {
		if self.response_code != RESPONSE_APPROVED {
			return Err(rejection(self.response_code, self.response_message));
		}
		Ok(QrInquiry {
			merchant_name:      self.merchant_name.unwrap_or_default(),
			merchant_city:      self.merchant_city.unwrap_or_default(),
			merchant_pan:       self.merchant_pan.unwrap_or_default(),
			transaction_amount: self
				.transaction_amount
				.and_then(|amount| amount.parse().ok()),
		})
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpRequest {
	pub access_token: String,
	pub invoice_id:   String,
	pub amount:       f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpResponse {
	pub response_code:      String,
	pub response_message:   Option<String>,
	pub provider_reference: Option<String>,
}

impl TopUpResponse {
	pub fn into_receipt(self) -> Result<TopUpReceipt, ProviderError> {
		if self.response_code != RESPONSE_APPROVED {
			return Err(rejection(self.response_code, self.response_message));
		}
		let provider_reference =
			self.provider_reference
				.ok_or_else(|| ProviderError::Transport {
					message: "top-up response carried no reference".to_string(),
				})?;
		Ok(TopUpReceipt {
			provider_reference,
			result_code: self.response_code,
		})
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
	pub access_token: String,
	pub invoice_id:   String,
	pub amount:       f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
	pub response_code:    String,
	pub response_message: Option<String>,
	pub approval_code:    Option<String>,
}

impl PaymentResponse {
	pub fn into_receipt(self) -> Result<PaymentReceipt, ProviderError> {
		if self.response_code != RESPONSE_APPROVED {
			return Err(rejection(self.response_code, self.response_message));
		}
		Ok(PaymentReceipt {
			response_code:    self.response_code,
			response_message: self.response_message,
			approval_code:    self.approval_code,
		})
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidRequest {
	pub access_token:       String,
	pub provider_reference: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidResponse {
	pub response_code:    String,
	pub response_message: Option<String>,
}

impl VoidResponse {
	pub fn into_receipt(self) -> Result<VoidReceipt, ProviderError> {
		if self.response_code != RESPONSE_APPROVED {
			return Err(rejection(self.response_code, self.response_message));
		}
		Ok(VoidReceipt {
			response_code: self.response_code,
		})
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
	pub access_token: String,
	pub invoice_id:   String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
	pub response_code:      String,
	pub response_message:   Option<String>,
	pub transaction_status: Option<String>,
}

impl StatusResponse {
	pub fn into_status(self) -> Result<TransactionStatus, ProviderError> {
		if self.response_code != RESPONSE_APPROVED {
			return Err(rejection(self.response_code, self.response_message));
		}
		let status = match self.transaction_status.as_deref() {
			Some("SUCCESS") => PaymentStatus::Success,
			Some("FAILED") => PaymentStatus::Failed,
			Some("CANCEL") => PaymentStatus::Cancel,
			_ => PaymentStatus::Pending,
		};
		Ok(TransactionStatus {
			status,
			response_code: self.response_code,
		})
	}
}
