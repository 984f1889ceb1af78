use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Structured quota / rate-limit flag reported by an adapter.
	#[error("Quota or rate limit exceeded: {message}")]
	Quota { message: String },
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl Error {
	/// Quota detection channels: the structured flag, the standard "too many
	/// requests" status, or a textual keyword match.
	pub fn is_quota(&self) -> bool {
		if let Self::Quota { .. } = self {
			return true;
		}
		if let Self::Reqwest(err) = self
			&& err.status() == Some(StatusCode::TOO_MANY_REQUESTS)
		{
			return true;
		}

		is_quota_text(&self.to_string())
	}
}

pub fn is_quota_text(text: &str) -> bool {
	let text = text.to_lowercase();

	["quota", "rate limit", "rate-limit", "too many requests"]
		.iter()
		.any(|keyword| text.contains(keyword))
}
