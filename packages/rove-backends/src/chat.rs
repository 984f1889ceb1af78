use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{BackendAdapter, BoxFuture, Error, Result};
use rove_config::BackendConfig;
use rove_domain::RecommendationRequest;

const SYSTEM_PROMPT: &str = "\
You suggest one real-world activity. Respond with a single JSON object and \
nothing else, using the keys: title, description, duration, cost_tier \
(free|low|medium|high), location, setting (indoor|outdoor|either), \
group_friendly (bool), realtime_status (open|closed|unknown), activities \
(array of strings). The title must be plain text with no metadata.";

/// OpenAI-compatible chat-completion backend.
pub struct ChatBackend {
	cfg: BackendConfig,
	api_key: String,
	client: Client,
}
impl ChatBackend {
	pub fn new(cfg: BackendConfig, api_key: String) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self { cfg, api_key, client })
	}

	async fn call(&self, request: &RecommendationRequest) -> Result<Value> {
		let url = format!("{}{}", self.cfg.api_base, self.cfg.path);
		let body = serde_json::json!({
			"model": self.cfg.model,
			"temperature": request.temperature.unwrap_or(self.cfg.temperature),
			"max_tokens": request.max_tokens.unwrap_or(self.cfg.max_tokens),
			"messages": [
				{ "role": "system", "content": SYSTEM_PROMPT },
				{ "role": "user", "content": request.user_input },
			],
		});
		let res = self
			.client
			.post(&url)
			.headers(crate::auth_headers(&self.api_key, &self.cfg.default_headers)?)
			.json(&body)
			.send()
			.await?;

		if res.status() == StatusCode::TOO_MANY_REQUESTS {
			let message = res.text().await.unwrap_or_default();

			return Err(Error::Quota { message });
		}

		let json: Value = res.error_for_status()?.json().await?;

		parse_candidate_json(json)
	}
}
impl BackendAdapter for ChatBackend {
	fn name(&self) -> &str {
		&self.cfg.name
	}

	fn generate<'a>(&'a self, request: &'a RecommendationRequest) -> BoxFuture<'a, Result<Value>> {
		Box::pin(self.call(request))
	}
}

fn parse_candidate_json(json: Value) -> Result<Value> {
	if let Some(content) = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
	{
		let parsed: Value = serde_json::from_str(content).map_err(|_| Error::InvalidResponse {
			message: "Backend content is not valid JSON.".to_string(),
		})?;

		if !parsed.is_object() {
			return Err(Error::InvalidResponse {
				message: "Backend content is not a JSON object.".to_string(),
			});
		}

		return Ok(parsed);
	}

	if json.is_object() && json.get("title").is_some() {
		return Ok(json);
	}

	Err(Error::InvalidResponse { message: "Backend response is missing JSON content.".to_string() })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_choice_content_json() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "{\"title\": \"Picnic by the water\"}" } }
			]
		});
		let parsed = parse_candidate_json(json).expect("parse failed");

		assert_eq!(parsed.get("title").and_then(Value::as_str), Some("Picnic by the water"));
	}

	#[test]
	fn accepts_bare_candidate_objects() {
		let json = serde_json::json!({ "title": "Night market stroll" });

		assert!(parse_candidate_json(json).is_ok());
	}

	#[test]
	fn rejects_non_json_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "Sure! Here is an idea:" } }
			]
		});

		assert!(parse_candidate_json(json).is_err());
	}
}
