pub mod extract;
pub mod scenario;
pub mod trust;

pub use extract::Fragments;
pub use scenario::{CategoryEngagement, Motivation, ScenarioParams, ScenarioPreset, UserHistory};
pub use trust::{TrustLevel, TrustMetadata, TrustSignals};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Caller intent, immutable once constructed.
#[derive(Clone, Debug)]
pub struct RecommendationRequest {
	pub user_input: String,
	pub temperature: Option<f32>,
	pub max_tokens: Option<u32>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
	Free,
	Low,
	Medium,
	High,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
	Indoor,
	Outdoor,
	Either,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RealtimeStatus {
	Open,
	Closed,
	Unknown,
}

/// An unvalidated recommendation, from a backend or the offline path.
/// Mutable only inside the pipeline; frozen once returned to a caller.
#[derive(Clone, Debug, Serialize)]
pub struct Candidate {
	pub recommendation_id: Uuid,
	pub title: String,
	pub description: String,
	pub duration: String,
	pub cost_tier: CostTier,
	pub location: String,
	pub setting: Setting,
	pub group_friendly: bool,
	pub realtime_status: RealtimeStatus,
	#[serde(skip)]
	pub unavailable: bool,
	pub activities: Vec<String>,
}

/// Append-only ledger record. Created once, never mutated; the input text
/// is PII-scrubbed before it gets here.
#[derive(Clone, Debug, Serialize)]
pub struct AuditEvent {
	pub recommendation_id: Uuid,
	pub user_input: String,
	pub trust: TrustMetadata,
	pub policy: rove_config::TrustPolicy,
	pub tenant_id: String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
