use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub redis_url: String,
	pub provider_base_url: String,
	pub provider_client_id: String,
	pub provider_shared_key: String,
	pub provider_timeout_ms: u64,
	pub server_keepalive: u64,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}
}

#[cfg(test)]
mod tests {
	use std::env;

	use super::*;

	#[test]
	fn test_config_load() {
		unsafe {
			env::set_var("APP_REDIS_URL", "redis://test_redis/");
			env::set_var("APP_PROVIDER_BASE_URL", "http://test_provider/");
			env::set_var("APP_PROVIDER_CLIENT_ID", "MCH-001");
			env::set_var("APP_PROVIDER_SHARED_KEY", "s3cr3t");
			env::set_var("APP_PROVIDER_TIMEOUT_MS", "1500");
			env::set_var("APP_SERVER_KEEPALIVE", "120");
		};

		let config = Config::load().expect("Failed to load config in test");

		assert_eq!(config.redis_url, "redis://test_redis/");
		assert_eq!(config.provider_base_url, "http://test_provider/");
		assert_eq!(config.provider_client_id, "MCH-001");
		assert_eq!(config.provider_shared_key, "s3cr3t");
		assert_eq!(config.provider_timeout_ms, 1500);
		assert_eq!(config.server_keepalive, 120);

		unsafe {
			env::remove_var("APP_REDIS_URL");
			env::remove_var("APP_PROVIDER_BASE_URL");
			env::remove_var("APP_PROVIDER_CLIENT_ID");
			env::remove_var("APP_PROVIDER_SHARED_KEY");
			env::remove_var("APP_PROVIDER_TIMEOUT_MS");
			env::remove_var("APP_SERVER_KEEPALIVE");
		}
	}
}
