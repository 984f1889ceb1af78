use std::{sync::Arc, time::Duration};

use serde_json::Value;
use tokio::time::{Instant, timeout};
use uuid::Uuid;

use rove_backends::{BackendAdapter, TemplatePicker, generate_offline};
use rove_domain::{Candidate, RecommendationRequest};

/// Internal marker recording which adapter, or the offline path, produced a
/// candidate. Never part of the caller-facing response body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecommendationSource {
	Backend(String),
	Offline,
}
impl RecommendationSource {
	pub fn is_offline(&self) -> bool {
		matches!(self, Self::Offline)
	}

	pub fn label(&self) -> &str {
		match self {
			Self::Backend(name) => name,
			Self::Offline => "offline",
		}
	}
}

pub(crate) enum Dispatched {
	Backend { adapter: String, payload: Value },
	Offline(Candidate),
}

/// Try adapters in priority order under one shared deadline. Quota and
/// plain failures both fall through to the next adapter; a timeout at the
/// deadline stops further attempts. Always produces something.
pub(crate) async fn dispatch(
	adapters: &[Arc<dyn BackendAdapter>],
	request: &RecommendationRequest,
	deadline: Duration,
	recommendation_id: Uuid,
	picker: &dyn TemplatePicker,
) -> Dispatched {
	let started = Instant::now();

	for adapter in adapters {
		let Some(remaining) = deadline.checked_sub(started.elapsed()) else {
			tracing::warn!("Dispatch deadline elapsed before every backend was attempted.");

			break;
		};

		match timeout(remaining, adapter.generate(request)).await {
			Ok(Ok(payload)) => {
				tracing::debug!(adapter = adapter.name(), "Backend produced a candidate payload.");

				return Dispatched::Backend { adapter: adapter.name().to_string(), payload };
			},
			Ok(Err(err)) if err.is_quota() => {
				tracing::warn!(
					adapter = adapter.name(),
					error = %err,
					"Backend hit a quota or rate limit; falling through to the next adapter."
				);
			},
			Ok(Err(err)) => {
				tracing::warn!(
					adapter = adapter.name(),
					error = %err,
					"Backend attempt failed; falling through to the next adapter."
				);
			},
			Err(_) => {
				tracing::warn!(
					adapter = adapter.name(),
					"Shared dispatch deadline elapsed mid-attempt; stopping."
				);

				break;
			},
		}
	}

	Dispatched::Offline(generate_offline(&request.user_input, recommendation_id, picker))
}
