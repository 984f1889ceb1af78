use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result, RoveService,
	audit::{scrub_input, submit_detached},
	dispatch::{Dispatched, RecommendationSource, dispatch},
	sanitize::{Verdict, normalize_candidate, validate},
};
use rove_backends::generate_offline;
use rove_domain::{
	AuditEvent, Candidate, RealtimeStatus, RecommendationRequest, TrustMetadata, TrustSignals,
	extract::extract_fragments,
	trust::{policy_permits, trust_metadata, why_now},
};

#[derive(Clone, Debug, Deserialize)]
pub struct RecommendRequest {
	/// Defaulted so a body missing the key entirely still reaches the
	/// pipeline and gets the one documented caller-visible error.
	#[serde(default, alias = "userInput")]
	pub user_input: String,
	#[serde(default)]
	pub temperature: Option<f32>,
	#[serde(default, alias = "maxTokens")]
	pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
	pub success: bool,
	pub recommendation: Candidate,
	pub trust: TrustMetadata,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub why_now: Option<String>,
}

impl RoveService {
	/// The pipeline: dispatch with ordered fallback, validate/sanitize,
	/// annotate with trust, audit asynchronously. Fails only on empty input.
	pub async fn recommend(&self, request: RecommendRequest) -> Result<RecommendResponse> {
		let user_input = request.user_input.trim().to_string();

		if user_input.is_empty() {
			return Err(Error::InvalidRequest {
				message: "user_input must be a non-empty string.".to_string(),
			});
		}

		let recommendation_id = Uuid::new_v4();
		let pipeline_request = RecommendationRequest {
			user_input,
			temperature: request.temperature.map(|t| t.clamp(0.0, 2.0)),
			max_tokens: request.max_tokens,
		};
		let deadline = std::time::Duration::from_millis(self.cfg.dispatch.deadline_ms);
		let dispatched = dispatch(
			&self.adapters,
			&pipeline_request,
			deadline,
			recommendation_id,
			self.picker.as_ref(),
		)
		.await;
		let (candidate, signals, source) = match dispatched {
			Dispatched::Backend { adapter, payload } => {
				let normalized = normalize_candidate(&payload, recommendation_id);
				// Live signal only when the backend itself said "open",
				// before any forced-open repair.
				let reported_open = normalized.realtime_status == RealtimeStatus::Open;

				match validate(normalized) {
					Verdict::Keep(kept) => {
						let signals = TrustSignals {
							ai_generated: true,
							recent_activity: reported_open,
							..TrustSignals::default()
						};

						(kept, signals, RecommendationSource::Backend(adapter))
					},
					Verdict::Replace => {
						tracing::warn!(
							adapter = adapter.as_str(),
							"Candidate failed validation; replaced with an offline result."
						);

						(
							generate_offline(
								&pipeline_request.user_input,
								recommendation_id,
								self.picker.as_ref(),
							),
							TrustSignals::default(),
							RecommendationSource::Offline,
						)
					},
				}
			},
			Dispatched::Offline(candidate) =>
				(candidate, TrustSignals::default(), RecommendationSource::Offline),
		};
		let trust = trust_metadata(signals, &self.cfg.trust);

		if !policy_permits(&self.cfg.trust, signals) {
			tracing::debug!(
				"A stricter trust policy would reject this candidate; serving it unchanged."
			);
		}

		let fragments = extract_fragments(&pipeline_request.user_input);
		let why_now = why_now(&fragments, signals);
		let event = AuditEvent {
			recommendation_id,
			user_input: scrub_input(&pipeline_request.user_input),
			trust: trust.clone(),
			policy: self.cfg.trust.clone(),
			tenant_id: self.cfg.audit.tenant_id.clone(),
			created_at: OffsetDateTime::now_utc(),
		};

		submit_detached(self.audit.clone(), event);

		tracing::info!(
			recommendation_id = %recommendation_id,
			source = source.label(),
			trust = trust.label.as_str(),
			"Served recommendation."
		);

		Ok(RecommendResponse { success: true, recommendation: candidate, trust, why_now })
	}
}
