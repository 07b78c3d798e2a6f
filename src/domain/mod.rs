pub mod provider;
pub mod qris;
pub mod repository;
