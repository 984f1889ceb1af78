mod error;

pub mod chat;
pub mod offline;

pub use chat::ChatBackend;
pub use error::{Error, Result, is_quota_text};
pub use offline::{FixedPicker, TemplatePicker, UniformPicker, generate_offline};

use std::{future::Future, pin::Pin};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Map, Value};

use rove_domain::RecommendationRequest;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One backend capable of producing a recommendation candidate. Adapters
/// return the raw upstream payload; normalization into a typed candidate
/// happens once, downstream, never here.
pub trait BackendAdapter
where
	Self: Send + Sync,
{
	fn name(&self) -> &str;

	fn generate<'a>(&'a self, request: &'a RecommendationRequest) -> BoxFuture<'a, Result<Value>>;
}

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}
