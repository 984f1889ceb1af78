use std::{sync::Arc, time::Duration};

use regex::Regex;
use reqwest::Client;

use crate::{Error, Result};
use rove_backends::BoxFuture;
use rove_config::Audit;
use rove_domain::AuditEvent;

const MAX_INPUT_CHARS: usize = 500;

/// External append-only store for audit events. Implementations are only
/// ever invoked from a detached task; nothing awaits them on the response
/// path.
pub trait AuditSink
where
	Self: Send + Sync,
{
	fn submit<'a>(&'a self, event: &'a AuditEvent) -> BoxFuture<'a, Result<()>>;
}

/// Posts events to the configured ledger endpoint.
pub struct HttpAuditSink {
	cfg: Audit,
	auth_token: Option<String>,
	client: Client,
}
impl HttpAuditSink {
	pub fn new(cfg: Audit, auth_token: Option<String>) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()
			.map_err(|err| Error::Audit { message: err.to_string() })?;

		Ok(Self { cfg, auth_token, client })
	}

	async fn post(&self, event: &AuditEvent) -> Result<()> {
		let mut request = self.client.post(&self.cfg.url).json(event);

		if let Some(token) = &self.auth_token {
			request = request.bearer_auth(token);
		}

		request
			.send()
			.await
			.and_then(|res| res.error_for_status())
			.map_err(|err| Error::Audit { message: err.to_string() })?;

		Ok(())
	}
}
impl AuditSink for HttpAuditSink {
	fn submit<'a>(&'a self, event: &'a AuditEvent) -> BoxFuture<'a, Result<()>> {
		Box::pin(self.post(event))
	}
}

/// Stands in when auditing is disabled so the one-attempt-per-request
/// invariant holds structurally either way.
pub struct NoopAuditSink;
impl AuditSink for NoopAuditSink {
	fn submit<'a>(&'a self, event: &'a AuditEvent) -> BoxFuture<'a, Result<()>> {
		tracing::debug!(
			recommendation_id = %event.recommendation_id,
			"Audit disabled; event dropped."
		);

		Box::pin(async { Ok(()) })
	}
}

/// Fire-and-forget submission. The spawned task owns everything it needs;
/// failures are logged and never reach the response path.
pub(crate) fn submit_detached(sink: Arc<dyn AuditSink>, event: AuditEvent) {
	tokio::spawn(async move {
		if let Err(err) = sink.submit(&event).await {
			tracing::warn!(
				error = %err,
				recommendation_id = %event.recommendation_id,
				"Audit write failed; the response is unaffected."
			);
		}
	});
}

/// Scrub obvious PII before the text enters the ledger: e-mail addresses,
/// long digit runs (phone numbers, card fragments), then a length cap.
pub fn scrub_input(input: &str) -> String {
	let mut scrubbed = input.to_string();
	let patterns = [r"(?i)[\w.+-]+@[\w-]+\.[\w.]+", r"\d[\d\s().-]{6,}\d"];

	for pattern in patterns {
		if let Ok(re) = Regex::new(pattern) {
			scrubbed = re.replace_all(&scrubbed, "[redacted]").into_owned();
		}
	}

	scrubbed.chars().take(MAX_INPUT_CHARS).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scrubs_emails_and_phone_numbers() {
		let scrubbed = scrub_input("meet me, mail jane.doe@example.com or call 415-555-0123");

		assert!(!scrubbed.contains("example.com"));
		assert!(!scrubbed.contains("555"));
		assert!(scrubbed.contains("[redacted]"));
	}

	#[test]
	fn caps_input_length() {
		let scrubbed = scrub_input(&"x".repeat(2_000));

		assert_eq!(scrubbed.chars().count(), MAX_INPUT_CHARS);
	}

	#[test]
	fn leaves_task_relevant_text_alone() {
		let scrubbed = scrub_input("Vibe: relaxed, Time: 2 hours, Location: nearby");

		assert_eq!(scrubbed, "Vibe: relaxed, Time: 2 hours, Location: nearby");
	}
}
