#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use qris_gateway::domain::provider::{
	PaymentReceipt, ProviderError, QrInquiry, QrisProvider, TopUpReceipt,
	TransactionStatus, VoidReceipt,
};

type Scripted<T> = Arc<Mutex<VecDeque<Result<T, ProviderError>>>>;

fn next<T>(queue: &Scripted<T>) -> Result<T, ProviderError> {
	queue.lock().unwrap().pop_front().unwrap_or_else(|| {
		Err(ProviderError::Transport {
			message: "no scripted response left".to_string(),
		})
	})
}

/// Scripted provider: each operation pops the next queued response and
/// counts the call.
#[derive(Clone, Default)]
pub struct FakeProvider {
	inquiries: Scripted<QrInquiry>,
	top_ups:   Scripted<TopUpReceipt>,
	payments:  Scripted<PaymentReceipt>,
	voids:     Scripted<VoidReceipt>,
	statuses:  Scripted<TransactionStatus>,

	inquiry_calls: Arc<AtomicUsize>,
	top_up_calls:  Arc<AtomicUsize>,
	payment_calls: Arc<AtomicUsize>,
	void_calls:    Arc<AtomicUsize>,
	status_calls:  Arc<AtomicUsize>,
}

impl FakeProvider {
	pub fn queue_inquiry(&self, result: Result<QrInquiry, ProviderError>) {
		self.inquiries.lock().unwrap().push_back(result);
	}

	pub fn queue_top_up(&self, result: Result<TopUpReceipt, ProviderError>) {
		self.top_ups.lock().unwrap().push_back(result);
	}

	pub fn queue_payment(
		&self,
		result: Result<PaymentReceipt, ProviderError>,
	) {
		self.payments.lock().unwrap().push_back(result);
	}

	pub fn queue_void(&self, result: Result<VoidReceipt, ProviderError>) {
		self.voids.lock().unwrap().push_back(result);
	}

	pub fn queue_status(
		&self,
		result: Result<TransactionStatus, ProviderError>,
	) {
		self.statuses.lock().unwrap().push_back(result);
	}

	pub fn calls(&self) -> usize {
		self.inquiry_calls.load(Ordering::SeqCst)
			+ self.top_up_calls.load(Ordering::SeqCst)
			+ self.payment_calls.load(Ordering::SeqCst)
			+ self.void_calls.load(Ordering::SeqCst)
			+ self.status_calls.load(Ordering::SeqCst)
	}

	pub fn top_up_calls(&self) -> usize {
		self.top_up_calls.load(Ordering::SeqCst)
	}

	pub fn payment_calls(&self) -> usize {
		self.payment_calls.load(Ordering::SeqCst)
	}

	pub fn void_calls(&self) -> usize {
		self.void_calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl QrisProvider for FakeProvider {
	async fn inquiry(
		&self,
		_qr_code: &str,
	) -> Result<QrInquiry, ProviderError> {
		self.inquiry_calls.fetch_add(1, Ordering::SeqCst);
		next(&self.inquiries)
	}

	async fn top_up(
		&self,
		_invoice_id: &str,
		_amount: f64,
	) -> Result<TopUpReceipt, ProviderError> {
		self.top_up_calls.fetch_add(1, Ordering::SeqCst);
		next(&self.top_ups)
	}

	async fn payment(
		&self,
		_invoice_id: &str,
		_amount: f64,
	) -> Result<PaymentReceipt, ProviderError> {
		self.payment_calls.fetch_add(1, Ordering::SeqCst);
		next(&self.payments)
	}

	async fn void_top_up(
		&self,
		_provider_reference: &str,
	) -> Result<VoidReceipt, ProviderError> {
		self.void_calls.fetch_add(1, Ordering::SeqCst);
		next(&self.voids)
	}

	async fn transaction_status(
		&self,
		_invoice_id: &str,
	) -> Result<TransactionStatus, ProviderError> {
		self.status_calls.fetch_add(1, Ordering::SeqCst);
		next(&self.statuses)
	}
}
