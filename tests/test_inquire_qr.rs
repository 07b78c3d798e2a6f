use qris_gateway::domain::provider::{ProviderError, QrInquiry};
use qris_gateway::domain::repository::QrisRepository;
use qris_gateway::infrastructure::persistence::in_memory_qris_repository::InMemoryQrisRepository;
use qris_gateway::use_cases::dto::InquireQrCommand;
use qris_gateway::use_cases::inquire_qr::InquireQrUseCase;
use uuid::Uuid;

mod support;

use crate::support::fake_provider::FakeProvider;

fn sample_inquiry() -> QrInquiry {
	QrInquiry {
		merchant_name:      "KOPI TENONG".to_string(),
		merchant_city:      "JAKARTA PUSAT".to_string(),
		merchant_pan:       "9360001234567890123".to_string(),
		transaction_amount: Some(15000.0),
	}
}

#[tokio::test]
async fn test_inquire_qr_success_stores_scan() {
	let repo = InMemoryQrisRepository::new();
	let provider = FakeProvider::default();
	provider.queue_inquiry(Ok(sample_inquiry()));
	let use_case = InquireQrUseCase::new(repo.clone(), provider.clone());

	let result = use_case
		.execute(InquireQrCommand {
			customer_id: Uuid::new_v4(),
			qr_code:     "00020101021226660014ID.CO.QRIS.WWW".to_string(),
		})
		.await
		.unwrap()
		.expect("inquiry should resolve");

	assert_eq!(result.merchant_name, "KOPI TENONG");
	assert_eq!(result.merchant_city, "JAKARTA PUSAT");
	assert_eq!(result.transaction_amount, Some(15000.0));

	let scan = repo.get_scan(result.scan_id).await.unwrap().unwrap();
	assert_eq!(scan.response_code, "00");
	assert_eq!(scan.merchant_name, Some("KOPI TENONG".to_string()));
	assert_eq!(scan.transaction_amount, Some(15000.0));
}

#[tokio::test]
async fn test_inquire_qr_rejection_stores_scan_with_error_code() {
	let repo = InMemoryQrisRepository::new();
	let provider = FakeProvider::default();
	provider.queue_inquiry(Err(ProviderError::Api {
		code:    "62".to_string(),
		message: "invalid QR content".to_string(),
	}));
	let use_case = InquireQrUseCase::new(repo.clone(), provider.clone());

	let result = use_case
		.execute(InquireQrCommand {
			customer_id: Uuid::new_v4(),
			qr_code:     "garbage".to_string(),
		})
		.await
		.unwrap();

	assert!(result.is_none());

	let scans = repo.scans.read().unwrap();
	assert_eq!(scans.len(), 1);
	let scan = scans.values().next().unwrap();
	assert_eq!(scan.response_code, "62");
	assert!(scan.merchant_name.is_none());
	assert!(scan.transaction_amount.is_none());
}

#[tokio::test]
async fn test_inquire_qr_transport_failure_is_recorded() {
	let repo = InMemoryQrisRepository::new();
	let provider = FakeProvider::default();
	provider.queue_inquiry(Err(ProviderError::Transport {
		message: "connection refused".to_string(),
	}));
	let use_case = InquireQrUseCase::new(repo.clone(), provider.clone());

	let result = use_case
		.execute(InquireQrCommand {
			customer_id: Uuid::new_v4(),
			qr_code:     "00020101021226660014ID.CO.QRIS.WWW".to_string(),
		})
		.await
		.unwrap();

	assert!(result.is_none());

	let scans = repo.scans.read().unwrap();
	let scan = scans.values().next().unwrap();
	assert_eq!(scan.response_code, "91");
}
