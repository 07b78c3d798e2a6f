use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::info;
use reqwest::Client;

use crate::adapters::web::inquiry_handler::qr_inquiry;
use crate::adapters::web::payments_handler::{
	qr_payment, qr_payment_retry, qr_payment_status,
};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::persistence::redis_qris_repository::RedisQrisRepository;
use crate::infrastructure::provider::http_gateway::HttpProviderGateway;
use crate::use_cases::check_transaction::CheckTransactionUseCase;
use crate::use_cases::inquire_qr::InquireQrUseCase;
use crate::use_cases::pay_qr::PayQrUseCase;

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod model;
pub mod use_cases;

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	env_logger::init();

	let redis_client = redis::Client::open(config.redis_url.clone())
		.expect("Invalid Redis URL");

	let http_client = Client::builder()
		.timeout(Duration::from_millis(config.provider_timeout_ms))
		.build()
		.expect("Failed to build HTTP client");

	let repo = RedisQrisRepository::new(redis_client);
	let gateway = HttpProviderGateway::new(
		http_client,
		config.provider_base_url.clone(),
		config.provider_client_id.clone(),
		config.provider_shared_key.clone(),
	);

	let inquire_use_case = InquireQrUseCase::new(repo.clone(), gateway.clone());
	let pay_use_case = PayQrUseCase::new(repo.clone(), gateway.clone());
	let status_use_case =
		CheckTransactionUseCase::new(repo.clone(), gateway.clone());

	info!("Starting Actix-Web server on 0.0.0.0:9999...");
	let keepalive = config.server_keepalive;
	HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(inquire_use_case.clone()))
			.app_data(web::Data::new(pay_use_case.clone()))
			.app_data(web::Data::new(status_use_case.clone()))
			.service(web::resource("/qris/inquiry").route(web::post().to(
				qr_inquiry::<RedisQrisRepository, HttpProviderGateway>,
			)))
			.service(web::resource("/qris/payments").route(web::post().to(
				qr_payment::<RedisQrisRepository, HttpProviderGateway>,
			)))
			.service(
				web::resource("/qris/payments/{payment_id}/retry").route(
					web::post().to(qr_payment_retry::<
						RedisQrisRepository,
						HttpProviderGateway,
					>),
				),
			)
			.service(
				web::resource("/qris/payments/{payment_id}").route(
					web::get().to(qr_payment_status::<
						RedisQrisRepository,
						HttpProviderGateway,
					>),
				),
			)
	})
	.keep_alive(Duration::from_secs(keepalive))
	.bind(("0.0.0.0", 9999))?
	.run()
	.await
}
