pub mod in_memory_qris_repository;
pub mod redis_qris_repository;
