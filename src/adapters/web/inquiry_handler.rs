use actix_web::error::ResponseError;
use actix_web::{HttpResponse, web};
use log::warn;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{QrInquiryRequest, QrInquiryResponse};
use crate::domain::provider::QrisProvider;
use crate::domain::repository::QrisRepository;
use crate::use_cases::dto::InquireQrCommand;
use crate::use_cases::inquire_qr::InquireQrUseCase;

pub async fn qr_inquiry<R, G>(
	payload: web::Json<QrInquiryRequest>,
	use_case: web::Data<InquireQrUseCase<R, G>>,
) -> HttpResponse
where
	R: QrisRepository,
	G: QrisProvider,
{
	let command = InquireQrCommand {
		customer_id: payload.customer_id,
		qr_code:     payload.qr_code.clone(),
	};

	match use_case.execute(command).await {
		Ok(Some(result)) => HttpResponse::Ok().json(QrInquiryResponse {
			scan_id:            result.scan_id,
			merchant_name:      result.merchant_name,
			merchant_city:      result.merchant_city,
			transaction_amount: result.transaction_amount,
		}),
		Ok(None) => ApiError::InquiryRejectedError.error_response(),
		Err(e) => {
			warn!("Error handling QR inquiry: {e:?}");
			ApiError::InternalServerError.error_response()
		}
	}
}
