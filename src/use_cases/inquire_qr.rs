use std::error::Error;

use log::{error, info};

use crate::domain::provider::QrisProvider;
use crate::domain::qris::ScanRecord;
use crate::domain::repository::QrisRepository;
use crate::use_cases::dto::{InquireQrCommand, QrInquiryResult};

/// Resolves a scanned QR code against the provider. Both branches leave a
/// ScanRecord behind: the success branch with the merchant fields, the
/// failure branch with the provider's error code and no result.
#[derive(Clone)]
pub struct InquireQrUseCase<R: QrisRepository, G: QrisProvider> {
	repo:     R,
	provider: G,
}

impl<R: QrisRepository, G: QrisProvider> InquireQrUseCase<R, G> {
	pub fn new(repo: R, provider: G) -> Self {
		Self { repo, provider }
	}

	pub async fn execute(
		&self,
		command: InquireQrCommand,
	) -> Result<Option<QrInquiryResult>, Box<dyn Error + Send>> {
		match self.provider.inquiry(&command.qr_code).await {
			Ok(inquiry) => {
				let scan = ScanRecord::from_inquiry(
					command.customer_id,
					&command.qr_code,
					&inquiry,
				);
				let result = QrInquiryResult {
					scan_id:            scan.scan_id,
					merchant_name:      inquiry.merchant_name,
					merchant_city:      inquiry.merchant_city,
					transaction_amount: inquiry.transaction_amount,
				};
				self.repo.save_scan(scan).await?;

				info!(
					"QR scan {} resolved to merchant '{}'",
					result.scan_id, result.merchant_name
				);
				Ok(Some(result))
			}
			Err(e) => {
				error!("QR inquiry failed with code {}: {e}", e.code());
				let scan = ScanRecord::rejected(
					command.customer_id,
					&command.qr_code,
					e.code(),
				);
				self.repo.save_scan(scan).await?;
				Ok(None)
			}
		}
	}
}
