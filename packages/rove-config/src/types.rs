use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub dispatch: Dispatch,
	/// Priority order: the first entry is attempted first.
	#[serde(default)]
	pub backends: Vec<BackendConfig>,
	pub trust: TrustPolicy,
	pub audit: Audit,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Dispatch {
	/// Total budget shared across all backend attempts, not per attempt.
	pub deadline_ms: u64,
}
impl Default for Dispatch {
	fn default() -> Self {
		Self { deadline_ms: 30_000 }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct BackendConfig {
	pub name: String,
	pub api_base: String,
	/// Absent or empty means the standard chat-completions path.
	#[serde(default)]
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub max_tokens: u32,
	pub timeout_ms: u64,
	/// Name of the environment variable holding the API key. A backend whose
	/// variable is unset at startup is skipped, never an error.
	pub api_key_env: String,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TrustPolicy {
	pub allow_ugc_influence: bool,
	pub min_recency_hours: u32,
	pub require_verified_context: bool,
	pub min_confidence: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Audit {
	pub enabled: bool,
	pub url: String,
	pub auth_token_env: Option<String>,
	pub tenant_id: String,
	#[serde(default = "default_audit_timeout_ms")]
	pub timeout_ms: u64,
}

fn default_audit_timeout_ms() -> u64 {
	5_000
}
