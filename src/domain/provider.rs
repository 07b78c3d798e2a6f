use async_trait::async_trait;
use derive_more::derive::{Display, Error};

use crate::domain::qris::PaymentStatus;

/// Approval code shared by every provider endpoint.
pub const RESPONSE_APPROVED: &str = "00";
/// The session token has lapsed and a fresh signon is required.
pub const RESPONSE_TOKEN_EXPIRED: &str = "54";
/// Recorded when the provider could not be reached at all.
pub const RESPONSE_TRANSPORT_FAILURE: &str = "91";

#[derive(Debug, Display, Error)]
pub enum ProviderError {
	#[display("provider access token expired")]
	TokenExpired,
	#[display("provider rejected the request with {code}: {message}")]
	Api { code: String, message: String },
	#[display("provider transport failure: {message}")]
	Transport { message: String },
}

impl ProviderError {
	/// Response code to carry into stored records.
	pub fn code(&self) -> String {
		match self {
			ProviderError::TokenExpired => RESPONSE_TOKEN_EXPIRED.to_string(),
			ProviderError::Api { code, .. } => code.clone(),
			ProviderError::Transport { .. } => {
				RESPONSE_TRANSPORT_FAILURE.to_string()
			}
		}
	}
}

#[derive(Debug, Clone)]
pub struct QrInquiry {
	pub merchant_name:      String,
	pub merchant_city:      String,
	pub merchant_pan:       String,
	pub transaction_amount: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct TopUpReceipt {
	pub provider_reference: String,
	pub result_code:        String,
}

#[derive(Debug, Clone)]
pub struct PaymentReceipt {
	pub response_code:    String,
	pub response_message: Option<String>,
	pub approval_code:    Option<String>,
}

#[derive(Debug, Clone)]
pub struct VoidReceipt {
	pub response_code: String,
}

#[derive(Debug, Clone)]
pub struct TransactionStatus {
	pub status:        PaymentStatus,
	pub response_code: String,
}

/// Port onto the acquirer's QRIS API.
#[async_trait]
pub trait QrisProvider: Send + Sync + 'static {
	async fn inquiry(
		&self,
		qr_code: &str,
	) -> Result<QrInquiry, ProviderError>;
	async fn top_up(
		&self,
		invoice_id: &str,
		amount: f64,
	) -> Result<TopUpReceipt, ProviderError>;
	async fn payment(
		&self,
		invoice_id: &str,
		amount: f64,
	) -> Result<PaymentReceipt, ProviderError>;
	async fn void_top_up(
		&self,
		provider_reference: &str,
	) -> Result<VoidReceipt, ProviderError>;
	async fn transaction_status(
		&self,
		invoice_id: &str,
	) -> Result<TransactionStatus, ProviderError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_codes() {
		assert_eq!(ProviderError::TokenExpired.code(), "54");
		assert_eq!(
			ProviderError::Api {
				code:    "05".to_string(),
				message: "do not honor".to_string(),
			}
			.code(),
			"05"
		);
		assert_eq!(
			ProviderError::Transport {
				message: "connection refused".to_string(),
			}
			.code(),
			"91"
		);
	}
}
