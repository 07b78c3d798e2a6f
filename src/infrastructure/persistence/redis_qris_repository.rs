use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::qris::{
	PaymentRecord, PaymentStatus, ScanRecord, TopUpRecord, VoidTopUpRecord,
};
use crate::domain::repository::QrisRepository;
use crate::infrastructure::config::redis::{
	PAYMENT_KEY_PREFIX, PAYMENT_TOP_UP_INDEX_PREFIX, SCAN_KEY_PREFIX,
	TOP_UP_KEY_PREFIX, VOID_KEY_PREFIX,
};

/// Records are serialized to JSON strings under namespaced keys. The void
/// record is keyed by its top-up id, which is what keeps a top-up voided
/// at most once.
#[derive(Clone)]
pub struct RedisQrisRepository {
	client: Client,
}

impl RedisQrisRepository {
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	async fn connection(
		&self,
	) -> Result<
		redis::aio::MultiplexedConnection,
		Box<dyn std::error::Error + Send>,
	> {
		self.client
			.get_multiplexed_async_connection()
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)
	}

	async fn put<T>(
		&self,
		key: String,
		value: &T,
	) -> Result<(), Box<dyn std::error::Error + Send>>
	where
		T: Serialize + Sync,
	{
		let serialized = serde_json::to_string(value)
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		let mut con = self.connection().await?;
		let _: () = con
			.set(key, serialized)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;
		Ok(())
	}

	async fn fetch<T>(
		&self,
		key: String,
	) -> Result<Option<T>, Box<dyn std::error::Error + Send>>
	where
		T: DeserializeOwned,
	{
		let mut con = self.connection().await?;
		let raw: Option<String> = con
			.get(key)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		match raw {
			Some(raw) => serde_json::from_str(&raw)
				.map(Some)
				.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>),
			None => Ok(None),
		}
	}

	fn not_found(what: &str, id: Uuid) -> Box<dyn std::error::Error + Send> {
		Box::new(std::io::Error::new(
			std::io::ErrorKind::NotFound,
			format!("{what} {id} not found"),
		))
	}
}

#[async_trait]
impl QrisRepository for RedisQrisRepository {
	async fn save_scan(
		&self,
		scan: ScanRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.put(format!("{SCAN_KEY_PREFIX}:{}", scan.scan_id), &scan)
			.await
	}

	async fn get_scan(
		&self,
		scan_id: Uuid,
	) -> Result<Option<ScanRecord>, Box<dyn std::error::Error + Send>> {
		self.fetch(format!("{SCAN_KEY_PREFIX}:{scan_id}")).await
	}

	async fn save_payment(
		&self,
		payment: PaymentRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.put(
			format!("{PAYMENT_KEY_PREFIX}:{}", payment.payment_id),
			&payment,
		)
		.await
	}

	async fn get_payment(
		&self,
		payment_id: Uuid,
	) -> Result<Option<PaymentRecord>, Box<dyn std::error::Error + Send>> {
		self.fetch(format!("{PAYMENT_KEY_PREFIX}:{payment_id}"))
			.await
	}

	async fn transition_payment(
		&self,
		payment_id: Uuid,
		status: PaymentStatus,
		response_code: Option<String>,
		response_message: Option<String>,
	) -> Result<PaymentRecord, Box<dyn std::error::Error + Send>> {
		let mut payment = self
			.get_payment(payment_id)
			.await?
			.ok_or_else(|| Self::not_found("payment", payment_id))?;

		if payment.status.is_success() {
			log::debug!("Payment {payment_id} already settled. Not updated.");
			return Ok(payment);
		}

		payment.status = status;
		payment.response_code = response_code;
		payment.response_message = response_message;
		if status.is_terminal() {
			payment.processed_at = Some(OffsetDateTime::now_utc());
		}

		self.save_payment(payment.clone()).await?;
		Ok(payment)
	}

	async fn save_top_up(
		&self,
		top_up: TopUpRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.put(
			format!("{TOP_UP_KEY_PREFIX}:{}", top_up.top_up_id),
			&top_up,
		)
		.await?;
		self.put(
			format!("{PAYMENT_TOP_UP_INDEX_PREFIX}:{}", top_up.payment_id),
			&top_up.top_up_id,
		)
		.await
	}

	async fn get_top_up_for_payment(
		&self,
		payment_id: Uuid,
	) -> Result<Option<TopUpRecord>, Box<dyn std::error::Error + Send>> {
		let top_up_id: Option<Uuid> = self
			.fetch(format!("{PAYMENT_TOP_UP_INDEX_PREFIX}:{payment_id}"))
			.await?;

		match top_up_id {
			Some(top_up_id) => {
				self.fetch(format!("{TOP_UP_KEY_PREFIX}:{top_up_id}")).await
			}
			None => Ok(None),
		}
	}

	async fn mark_top_up_voided(
		&self,
		top_up_id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		let mut top_up: TopUpRecord = self
			.fetch(format!("{TOP_UP_KEY_PREFIX}:{top_up_id}"))
			.await?
			.ok_or_else(|| Self::not_found("top-up", top_up_id))?;

		if top_up.voided {
			return Ok(false);
		}

		top_up.voided = true;
		self.put(format!("{TOP_UP_KEY_PREFIX}:{top_up_id}"), &top_up)
			.await?;
		Ok(true)
	}

	async fn save_void(
		&self,
		void: VoidTopUpRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.put(format!("{VOID_KEY_PREFIX}:{}", void.top_up_id), &void)
			.await
	}

	async fn get_void_for_top_up(
		&self,
		top_up_id: Uuid,
	) -> Result<Option<VoidTopUpRecord>, Box<dyn std::error::Error + Send>> {
		self.fetch(format!("{VOID_KEY_PREFIX}:{top_up_id}")).await
	}
}
