use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::qris::{
	PaymentRecord, PaymentStatus, ScanRecord, TopUpRecord, VoidTopUpRecord,
};
use crate::domain::repository::QrisRepository;

/// In-memory twin of the Redis store, for tests and local runs.
#[derive(Clone, Default)]
pub struct InMemoryQrisRepository {
	pub scans:           Arc<RwLock<HashMap<Uuid, ScanRecord>>>,
	pub payments:        Arc<RwLock<HashMap<Uuid, PaymentRecord>>>,
	pub top_ups:         Arc<RwLock<HashMap<Uuid, TopUpRecord>>>,
	pub payment_top_ups: Arc<RwLock<HashMap<Uuid, Uuid>>>,
	pub voids:           Arc<RwLock<HashMap<Uuid, VoidTopUpRecord>>>,
}

impl InMemoryQrisRepository {
	pub fn new() -> Self {
		Self::default()
	}

	fn not_found(what: &str, id: Uuid) -> Box<dyn std::error::Error + Send> {
		Box::new(std::io::Error::new(
			std::io::ErrorKind::NotFound,
			format!("{what} {id} not found"),
		))
	}
}

#[async_trait]
impl QrisRepository for InMemoryQrisRepository {
	async fn save_scan(
		&self,
		scan: ScanRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.scans.write().unwrap().insert(scan.scan_id, scan);
		Ok(())
	}

	async fn get_scan(
		&self,
		scan_id: Uuid,
	) -> Result<Option<ScanRecord>, Box<dyn std::error::Error + Send>> {
		Ok(self.scans.read().unwrap().get(&scan_id).cloned())
	}

	async fn save_payment(
		&self,
		payment: PaymentRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.payments
			.write()
			.unwrap()
			.insert(payment.payment_id, payment);
		Ok(())
	}

	async fn get_payment(
		&self,
		payment_id: Uuid,
	) -> Result<Option<PaymentRecord>, Box<dyn std::error::Error + Send>> {
		Ok(self.payments.read().unwrap().get(&payment_id).cloned())
	}

	async fn transition_payment(
		&self,
		payment_id: Uuid,
		status: PaymentStatus,
		response_code: Option<String>,
		response_message: Option<String>,
	) -> Result<PaymentRecord, Box<dyn std::error::Error + Send>> {
		let mut payments = self.payments.write().unwrap();
		let payment = payments
			.get_mut(&payment_id)
			.ok_or_else(|| Self::not_found("payment", payment_id))?;

		if payment.status.is_success() {
			return Ok(payment.clone());
		}

		payment.status = status;
		payment.response_code = response_code;
		payment.response_message = response_message;
		if status.is_terminal() {
			payment.processed_at = Some(OffsetDateTime::now_utc());
		}

		Ok(payment.clone())
	}

	async fn save_top_up(
		&self,
		top_up: TopUpRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.payment_top_ups
			.write()
			.unwrap()
			.insert(top_up.payment_id, top_up.top_up_id);
		self.top_ups
			.write()
			.unwrap()
			.insert(top_up.top_up_id, top_up);
		Ok(())
	}

	async fn get_top_up_for_payment(
		&self,
		payment_id: Uuid,
	) -> Result<Option<TopUpRecord>, Box<dyn std::error::Error + Send>> {
		let top_up_id =
			self.payment_top_ups.read().unwrap().get(&payment_id).copied();

		Ok(top_up_id
			.and_then(|id| self.top_ups.read().unwrap().get(&id).cloned()))
	}

	async fn mark_top_up_voided(
		&self,
		top_up_id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		let mut top_ups = self.top_ups.write().unwrap();
		let top_up = top_ups
			.get_mut(&top_up_id)
			.ok_or_else(|| Self::not_found("top-up", top_up_id))?;

		if top_up.voided {
			return Ok(false);
		}

		top_up.voided = true;
		Ok(true)
	}

	async fn save_void(
		&self,
		void: VoidTopUpRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.voids.write().unwrap().insert(void.top_up_id, void);
		Ok(())
	}

	async fn get_void_for_top_up(
		&self,
		top_up_id: Uuid,
	) -> Result<Option<VoidTopUpRecord>, Box<dyn std::error::Error + Send>> {
		Ok(self.voids.read().unwrap().get(&top_up_id).cloned())
	}
}
