use actix_web::error::ResponseError;
use actix_web::{HttpResponse, web};
use log::warn;
use uuid::Uuid;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{QrPaymentRequest, QrPaymentResponse};
use crate::domain::provider::QrisProvider;
use crate::domain::qris::{PaymentRecord, PaymentStatus};
use crate::domain::repository::QrisRepository;
use crate::use_cases::check_transaction::CheckTransactionUseCase;
use crate::use_cases::dto::CreatePaymentCommand;
use crate::use_cases::pay_qr::{CreatePaymentError, PayQrUseCase};

fn payment_response(payment: &PaymentRecord) -> QrPaymentResponse {
	QrPaymentResponse {
		payment_id: payment.payment_id,
		invoice_id: payment.invoice_id.clone(),
		status:     payment.status.as_str().to_string(),
	}
}

pub async fn qr_payment<R, G>(
	payload: web::Json<QrPaymentRequest>,
	use_case: web::Data<PayQrUseCase<R, G>>,
) -> HttpResponse
where
	R: QrisRepository,
	G: QrisProvider,
{
	let command = CreatePaymentCommand {
		scan_id: payload.scan_id,
		amount:  payload.amount,
	};

	let payment = match use_case.create(command).await {
		Ok(payment) => payment,
		Err(CreatePaymentError::ScanNotFound) => {
			return ApiError::ScanNotFoundError.error_response();
		}
		Err(CreatePaymentError::InvalidAmount) => {
			return ApiError::BadClientDataError.error_response();
		}
		Err(e) => {
			warn!("Error creating payment: {e:?}");
			return ApiError::InternalServerError.error_response();
		}
	};

	match use_case.execute(payment.clone(), false).await {
		Ok(settled) => {
			let status = if settled {
				PaymentStatus::Success
			} else {
				PaymentStatus::Failed
			};
			HttpResponse::Ok().json(QrPaymentResponse {
				payment_id: payment.payment_id,
				invoice_id: payment.invoice_id,
				status:     status.as_str().to_string(),
			})
		}
		Err(e) => {
			warn!("Error processing payment: {e:?}");
			ApiError::InternalServerError.error_response()
		}
	}
}

pub async fn qr_payment_retry<R, G>(
	path: web::Path<Uuid>,
	use_case: web::Data<PayQrUseCase<R, G>>,
) -> HttpResponse
where
	R: QrisRepository,
	G: QrisProvider,
{
	match use_case.retry(path.into_inner()).await {
		Ok(Some(payment)) => {
			HttpResponse::Ok().json(payment_response(&payment))
		}
		Ok(None) => ApiError::PaymentNotFoundError.error_response(),
		Err(e) => {
			warn!("Error retrying payment: {e:?}");
			ApiError::InternalServerError.error_response()
		}
	}
}

pub async fn qr_payment_status<R, G>(
	path: web::Path<Uuid>,
	use_case: web::Data<CheckTransactionUseCase<R, G>>,
) -> HttpResponse
where
	R: QrisRepository,
	G: QrisProvider,
{
	match use_case.execute(path.into_inner()).await {
		Ok(Some(result)) => HttpResponse::Ok().json(QrPaymentResponse {
			payment_id: result.payment_id,
			invoice_id: result.invoice_id,
			status:     result.status.as_str().to_string(),
		}),
		Ok(None) => ApiError::PaymentNotFoundError.error_response(),
		Err(e) => {
			warn!("Error checking payment status: {e:?}");
			ApiError::InternalServerError.error_response()
		}
	}
}
