use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::qris::{
	PaymentRecord, PaymentStatus, ScanRecord, TopUpRecord, VoidTopUpRecord,
};

/// Store for scan, top-up, payment and void records.
///
/// `transition_payment` owns the terminal-state invariant: a payment in
/// SUCCESS is frozen and the stored record is returned unchanged.
/// `mark_top_up_voided` transitions the voided flag at most once and
/// reports whether this call performed the transition.
#[async_trait]
pub trait QrisRepository: Send + Sync + 'static {
	async fn save_scan(
		&self,
		scan: ScanRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>>;
	async fn get_scan(
		&self,
		scan_id: Uuid,
	) -> Result<Option<ScanRecord>, Box<dyn std::error::Error + Send>>;
	async fn save_payment(
		&self,
		payment: PaymentRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>>;
	async fn get_payment(
		&self,
		payment_id: Uuid,
	) -> Result<Option<PaymentRecord>, Box<dyn std::error::Error + Send>>;
	async fn transition_payment(
		&self,
		payment_id: Uuid,
		status: PaymentStatus,
		response_code: Option<String>,
		response_message: Option<String>,
	) -> Result<PaymentRecord, Box<dyn std::error::Error + Send>>;
	async fn save_top_up(
		&self,
		top_up: TopUpRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>>;
	async fn get_top_up_for_payment(
		&self,
		payment_id: Uuid,
	) -> Result<Option<TopUpRecord>, Box<dyn std::error::Error + Send>>;
	async fn mark_top_up_voided(
		&self,
		top_up_id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>>;
	async fn save_void(
		&self,
		void: VoidTopUpRecord,
	) -> Result<(), Box<dyn std::error::Error + Send>>;
	async fn get_void_for_top_up(
		&self,
		top_up_id: Uuid,
	) -> Result<Option<VoidTopUpRecord>, Box<dyn std::error::Error + Send>>;
}
