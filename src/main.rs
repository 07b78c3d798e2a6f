use std::sync::Arc;

use qris_gateway::infrastructure::config::settings::Config;
use qris_gateway::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let config = Arc::new(Config::load().expect("Failed to load configuration"));
	run(config).await
}
