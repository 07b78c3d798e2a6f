use std::error::Error;

use log::{info, warn};
use uuid::Uuid;

use crate::domain::provider::QrisProvider;
use crate::domain::qris::PaymentRecord;
use crate::domain::repository::QrisRepository;
use crate::use_cases::dto::PaymentStatusResult;

/// Reconciles a pending payment against the provider's status endpoint.
/// Terminal payments are answered from the store without a provider call,
/// and a provider error never changes the stored record.
#[derive(Clone)]
pub struct CheckTransactionUseCase<R: QrisRepository, G: QrisProvider> {
	repo:     R,
	provider: G,
}

impl<R: QrisRepository, G: QrisProvider> CheckTransactionUseCase<R, G> {
	pub fn new(repo: R, provider: G) -> Self {
		Self { repo, provider }
	}

	pub async fn execute(
		&self,
		payment_id: Uuid,
	) -> Result<Option<PaymentStatusResult>, Box<dyn Error + Send>> {
		let payment = match self.repo.get_payment(payment_id).await? {
			Some(payment) => payment,
			None => return Ok(None),
		};

		if payment.status.is_terminal() {
			return Ok(Some(result_of(&payment)));
		}

		match self.provider.transaction_status(&payment.invoice_id).await {
			Ok(status) if status.status.is_terminal() => {
				info!(
					"Invoice {} reconciled to {}",
					payment.invoice_id,
					status.status.as_str()
				);
				let updated = self
					.repo
					.transition_payment(
						payment.payment_id,
						status.status,
						Some(status.response_code),
						None,
					)
					.await?;
				Ok(Some(result_of(&updated)))
			}
			Ok(_) => Ok(Some(result_of(&payment))),
			Err(e) => {
				warn!(
					"Status inquiry failed for invoice {}: {e}",
					payment.invoice_id
				);
				Ok(Some(result_of(&payment)))
			}
		}
	}
}

fn result_of(payment: &PaymentRecord) -> PaymentStatusResult {
	PaymentStatusResult {
		payment_id:    payment.payment_id,
		invoice_id:    payment.invoice_id.clone(),
		status:        payment.status,
		response_code: payment.response_code.clone(),
	}
}
