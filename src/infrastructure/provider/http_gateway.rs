use std::future::Future;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::domain::provider::{
	PaymentReceipt, ProviderError, QrInquiry, QrisProvider, TopUpReceipt,
	TransactionStatus, VoidReceipt,
};
use crate::model::provider_api::{
	InquiryRequest, InquiryResponse, PaymentRequest, PaymentResponse,
	SignOnRequest, SignOnResponse, StatusRequest, StatusResponse,
	TopUpRequest, TopUpResponse, VoidRequest, VoidResponse,
};

impl From<reqwest::Error> for ProviderError {
	fn from(e: reqwest::Error) -> Self {
		ProviderError::Transport {
			message: e.to_string(),
		}
	}
}

/// Signon signature: lowercase hex SHA-256 over client id, unix timestamp
/// and the shared key.
pub fn signon_signature(
	client_id: &str,
	timestamp: i64,
	shared_key: &str,
) -> String {
	let mut hasher = Sha256::new();
	hasher.update(client_id.as_bytes());
	hasher.update(timestamp.to_string().as_bytes());
	hasher.update(shared_key.as_bytes());
	hex::encode(hasher.finalize())
}

/// Acquirer client. Holds the session token behind an `RwLock`; a call
/// that comes back with an expired-token error is retried exactly once
/// after a transparent signon refresh.
#[derive(Clone)]
pub struct HttpProviderGateway {
	http_client: Client,
	base_url:    String,
	client_id:   String,
	shared_key:  String,
	session:     Arc<RwLock<Option<String>>>,
}

impl HttpProviderGateway {
	pub fn new(
		http_client: Client,
		base_url: String,
		client_id: String,
		shared_key: String,
	) -> Self {
		Self {
			http_client,
			base_url,
			client_id,
			shared_key,
			session: Arc::new(RwLock::new(None)),
		}
	}

	fn endpoint(&self, path: &str) -> String {
		format!("{}{path}", self.base_url.trim_end_matches('/'))
	}

	fn checked(
		response: reqwest::Response,
	) -> Result<reqwest::Response, ProviderError> {
		let status = response.status();
		if status == StatusCode::UNAUTHORIZED {
			return Err(ProviderError::TokenExpired);
		}
		if !status.is_success() {
			return Err(ProviderError::Transport {
				message: format!("provider returned HTTP {status}"),
			});
		}
		Ok(response)
	}

	async fn session_token(&self) -> Result<String, ProviderError> {
		if let Some(token) = self.session.read().await.as_ref() {
			return Ok(token.clone());
		}
		self.refresh_session().await
	}

	async fn refresh_session(&self) -> Result<String, ProviderError> {
		let timestamp = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.unwrap_or_default()
			.as_secs() as i64;
		let request = SignOnRequest {
			client_id: self.client_id.clone(),
			timestamp,
			signature: signon_signature(
				&self.client_id,
				timestamp,
				&self.shared_key,
			),
		};

		let response = self
			.http_client
			.post(self.endpoint("/signon"))
			.json(&request)
			.send()
			.await?;
		let body: SignOnResponse = Self::checked(response)?.json().await?;
		let token = body.into_token()?;

		*self.session.write().await = Some(token.clone());
		debug!("Provider session refreshed");
		Ok(token)
	}

	/// Runs `call` with the cached session token, refreshing the session
	/// and retrying once if the provider reports it expired.
	async fn with_session<T, F, Fut>(&self, call: F) -> Result<T, ProviderError>
	where
		F: Fn(String) -> Fut,
		Fut: Future<Output = Result<T, ProviderError>>,
	{
		let token = self.session_token().await?;
		match call(token).await {
			Err(ProviderError::TokenExpired) => {
				debug!("Provider session expired. Signing on again.");
				let token = self.refresh_session().await?;
				call(token).await
			}
			result => result,
		}
	}

	async fn post_inquiry(
		&self,
		access_token: String,
		qr_code: &str,
	) -> Result<QrInquiry, ProviderError> {
		let request = InquiryRequest {
			access_token,
			qr_content: qr_code.to_string(),
		};
		let response = self
			.http_client
			.post(self.endpoint("/qris/inquiry"))
			.json(&request)
			.send()
			.await?;
		let body: InquiryResponse = Self::checked(response)?.json().await?;
		body.into_inquiry()
	}

	async fn post_top_up(
		&self,
		access_token: String,
		invoice_id: &str,
		amount: f64,
	) -> Result<TopUpReceipt, ProviderError> {
		let request = TopUpRequest {
			access_token,
			invoice_id: invoice_id.to_string(),
			amount,
		};
		let response = self
			.http_client
			.post(self.endpoint("/qris/topup"))
			.json(&request)
			.send()
			.await?;
		let body: TopUpResponse = Self::checked(response)?.json().await?;
		body.into_receipt()
	}

	async fn post_payment(
		&self,
		access_token: String,
		invoice_id: &str,
		amount: f64,
	) -> Result<PaymentReceipt, ProviderError> {
		let request = PaymentRequest {
			access_token,
			invoice_id: invoice_id.to_string(),
			amount,
		};
		let response = self
			.http_client
			.post(self.endpoint("/qris/payment"))
			.json(&request)
			.send()
			.await?;
		let body: PaymentResponse = Self::checked(response)?.json().await?;
		body.into_receipt()
	}

	async fn post_void(
		&self,
		access_token: String,
		provider_reference: &str,
	) -> Result<VoidReceipt, ProviderError> {
		let request = VoidRequest {
			access_token,
			provider_reference: provider_reference.to_string(),
		};
		let response = self
			.http_client
			.post(self.endpoint("/qris/void"))
			.json(&request)
			.send()
			.await?;
		let body: VoidResponse = Self::checked(response)?.json().await?;
		body.into_receipt()
	}

	async fn post_status(
		&self,
		access_token: String,
		invoice_id: &str,
	) -> Result<TransactionStatus, ProviderError> {
		let request = StatusRequest {
			access_token,
			invoice_id: invoice_id.to_string(),
		};
		let response = self
			.http_client
			.post(self.endpoint("/qris/status"))
			.json(&request)
			.send()
			.await?;
		let body: StatusResponse = Self::checked(response)?.json().await?;
		body.into_status()
	}
}

#[async_trait]
impl QrisProvider for HttpProviderGateway {
	async fn inquiry(
		&self,
		qr_code: &str,
	) -> Result<QrInquiry, ProviderError> {
		self.with_session(|token| self.post_inquiry(token, qr_code))
			.await
	}

	async fn top_up(
		&self,
		invoice_id: &str,
		amount: f64,
	) -> Result<TopUpReceipt, ProviderError> {
		self.with_session(|token| self.post_top_up(token, invoice_id, amount))
			.await
	}

	async fn payment(
		&self,
		invoice_id: &str,
		amount: f64,
	) -> Result<PaymentReceipt, ProviderError> {
		self.with_session(|token| self.post_payment(token, invoice_id, amount))
			.await
	}

	async fn void_top_up(
		&self,
		provider_reference: &str,
	) -> Result<VoidReceipt, ProviderError> {
		self.with_session(|token| self.post_void(token, provider_reference))
			.await
	}

	async fn transaction_status(
		&self,
		invoice_id: &str,
	) -> Result<TransactionStatus, ProviderError> {
		self.with_session(|token| self.post_status(token, invoice_id))
			.await
	}
}
