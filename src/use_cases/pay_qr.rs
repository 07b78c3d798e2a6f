use circuitbreaker_rs::{BreakerError, CircuitBreaker, DefaultPolicy};
use derive_more::derive::{Display, Error};
use log::{error, info, warn};
use uuid::Uuid;

use crate::domain::provider::{
	ProviderError, QrisProvider, RESPONSE_TRANSPORT_FAILURE,
};
use crate::domain::qris::{
	PaymentRecord, PaymentStatus, TopUpRecord, VoidTopUpRecord,
};
use crate::domain::repository::QrisRepository;
use crate::use_cases::dto::CreatePaymentCommand;

#[derive(Debug, Display, Error)]
pub enum CreatePaymentError {
	#[display("Scan could not be found.")]
	ScanNotFound,
	#[display("Payment amount must be positive.")]
	InvalidAmount,
	#[display("Storage failure: {message}")]
	Storage { message: String },
}

/// Sequences top-up, payment and void-on-failure for one payment attempt.
///
/// Provider errors never escape `execute`: every branch records an error
/// code on the affected records and comes back as `Ok(false)`. Only store
/// failures surface as `Err`.
#[derive(Clone)]
pub struct PayQrUseCase<R: QrisRepository, G: QrisProvider> {
	repo:            R,
	provider:        G,
	payment_breaker: CircuitBreaker<DefaultPolicy, ProviderError>,
}

impl<R: QrisRepository, G: QrisProvider> PayQrUseCase<R, G> {
	pub fn new(repo: R, provider: G) -> Self {
		Self {
			repo,
			provider,
			payment_breaker:
				CircuitBreaker::<DefaultPolicy, ProviderError>::builder()
					.build(),
		}
	}

	/// Turns a scan into a fresh pending PaymentRecord. A fixed-amount QR
	/// overrides whatever the customer keyed in.
	pub async fn create(
		&self,
		command: CreatePaymentCommand,
	) -> Result<PaymentRecord, CreatePaymentError> {
		let scan = self
			.repo
			.get_scan(command.scan_id)
			.await
			.map_err(|e| CreatePaymentError::Storage {
				message: e.to_string(),
			})?
			.ok_or(CreatePaymentError::ScanNotFound)?;

		let amount = scan.transaction_amount.unwrap_or(command.amount);
		if amount <= 0.0 {
			return Err(CreatePaymentError::InvalidAmount);
		}

		let payment = PaymentRecord::new(scan.scan_id, amount);
		self.repo.save_payment(payment.clone()).await.map_err(|e| {
			CreatePaymentError::Storage {
				message: e.to_string(),
			}
		})?;
		Ok(payment)
	}

	/// Runs the top-up/payment sequence and reports whether the payment
	/// settled. A payment already in SUCCESS is rejected up front, before
	/// any provider call.
	pub async fn execute(
		&self,
		payment: PaymentRecord,
		retry: bool,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		if let Some(stored) = self.repo.get_payment(payment.payment_id).await?
			&& stored.status.is_success()
		{
			warn!(
				"Payment {} already settled. Rejecting new attempt.",
				payment.payment_id
			);
			return Ok(false);
		}

		let mut payment = payment;
		if retry {
			payment.regenerate_invoice();
			self.repo.save_payment(payment.clone()).await?;
			info!(
				"Retrying payment {} under invoice {}",
				payment.payment_id, payment.invoice_id
			);
		}

		let mut top_up = TopUpRecord::for_payment(&payment);
		self.repo.save_top_up(top_up.clone()).await?;

		let receipt = match self
			.provider
			.top_up(&payment.invoice_id, payment.amount)
			.await
		{
			Ok(receipt) => receipt,
			Err(e) => {
				error!(
					"Top-up failed for invoice {} with code {}: {e}",
					payment.invoice_id,
					e.code()
				);
				top_up.result_code = Some(e.code());
				self.repo.save_top_up(top_up).await?;
				self.repo
					.transition_payment(
						payment.payment_id,
						PaymentStatus::Failed,
						Some(e.code()),
						Some(e.to_string()),
					)
					.await?;
				return Ok(false);
			}
		};

		top_up.provider_reference = Some(receipt.provider_reference.clone());
		top_up.result_code = Some(receipt.result_code.clone());
		self.repo.save_top_up(top_up.clone()).await?;

		let invoice_id = payment.invoice_id.clone();
		let amount = payment.amount;
		let outcome = self
			.payment_breaker
			.call_async(|| async {
				self.provider.payment(&invoice_id, amount).await
			})
			.await;

		match outcome {
			Ok(receipt) => {
				self.repo
					.transition_payment(
						payment.payment_id,
						PaymentStatus::Success,
						Some(receipt.response_code),
						receipt.response_message,
					)
					.await?;
				info!(
					"Payment {} settled under invoice {}",
					payment.payment_id, payment.invoice_id
				);
				Ok(true)
			}
			Err(e) => {
				let (code, message) = payment_failure(e);
				error!(
					"Payment failed for invoice {} with code {code}: \
					 {message}",
					payment.invoice_id
				);
				self.repo
					.transition_payment(
						payment.payment_id,
						PaymentStatus::Failed,
						Some(code),
						Some(message),
					)
					.await?;
				self.reverse_top_up(&top_up).await?;
				Ok(false)
			}
		}
	}

	/// Reruns a stored payment with a regenerated invoice and returns the
	/// record as it stands afterwards.
	pub async fn retry(
		&self,
		payment_id: Uuid,
	) -> Result<Option<PaymentRecord>, Box<dyn std::error::Error + Send>> {
		let payment = match self.repo.get_payment(payment_id).await? {
			Some(payment) => payment,
			None => return Ok(None),
		};

		self.execute(payment, true).await?;
		self.repo.get_payment(payment_id).await
	}

	async fn reverse_top_up(
		&self,
		top_up: &TopUpRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		if !self.repo.mark_top_up_voided(top_up.top_up_id).await? {
			warn!(
				"Top-up {} already voided. Skipping reversal.",
				top_up.top_up_id
			);
			return Ok(());
		}

		let mut void = VoidTopUpRecord::for_top_up(top_up.top_up_id);
		match &top_up.provider_reference {
			Some(reference) => {
				match self.provider.void_top_up(reference).await {
					Ok(receipt) => {
						info!("Top-up {} voided.", top_up.top_up_id);
						void.response_code = Some(receipt.response_code);
					}
					Err(e) => {
						error!(
							"Void failed for top-up {} with code {}: {e}",
							top_up.top_up_id,
							e.code()
						);
						void.response_code = Some(e.code());
					}
				}
			}
			None => warn!(
				"Top-up {} has no provider reference to void.",
				top_up.top_up_id
			),
		}

		self.repo.save_void(void).await
	}
}

fn payment_failure(err: BreakerError<ProviderError>) -> (String, String) {
	match err {
		BreakerError::Open => (
			RESPONSE_TRANSPORT_FAILURE.to_string(),
			"payment call blocked by open circuit".to_string(),
		),
		BreakerError::Operation(e) => (e.code(), e.to_string()),
		e => (RESPONSE_TRANSPORT_FAILURE.to_string(), e.to_string()),
	}
}
