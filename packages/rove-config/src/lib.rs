mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Audit, BackendConfig, Config, Dispatch, Service, TrustPolicy};

use std::{collections::HashSet, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.dispatch.deadline_ms == 0 {
		return Err(Error::Validation {
			message: "dispatch.deadline_ms must be greater than zero.".to_string(),
		});
	}

	let mut names = HashSet::new();

	for backend in &cfg.backends {
		if backend.name.trim().is_empty() {
			return Err(Error::Validation {
				message: "backends.name must be non-empty.".to_string(),
			});
		}
		if !names.insert(backend.name.as_str()) {
			return Err(Error::Validation {
				message: format!("Backend name {:?} is duplicated.", backend.name),
			});
		}
		if backend.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Backend {} api_base must be non-empty.", backend.name),
			});
		}
		if backend.model.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Backend {} model must be non-empty.", backend.name),
			});
		}
		if backend.api_key_env.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Backend {} api_key_env must be non-empty.", backend.name),
			});
		}
		if backend.timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("Backend {} timeout_ms must be greater than zero.", backend.name),
			});
		}
		if !(0.0..=2.0).contains(&backend.temperature) {
			return Err(Error::Validation {
				message: format!(
					"Backend {} temperature must be in the range 0.0-2.0.",
					backend.name
				),
			});
		}
		if backend.max_tokens == 0 {
			return Err(Error::Validation {
				message: format!(
					"Backend {} max_tokens must be greater than zero.",
					backend.name
				),
			});
		}
	}

	if !cfg.trust.min_confidence.is_finite() {
		return Err(Error::Validation {
			message: "trust.min_confidence must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.trust.min_confidence) {
		return Err(Error::Validation {
			message: "trust.min_confidence must be in the range 0.0-1.0.".to_string(),
		});
	}

	if cfg.audit.enabled {
		if cfg.audit.url.trim().is_empty() {
			return Err(Error::Validation {
				message: "audit.url must be non-empty when audit.enabled is true.".to_string(),
			});
		}
		if cfg.audit.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "audit.timeout_ms must be greater than zero.".to_string(),
			});
		}
	}
	if cfg.audit.tenant_id.trim().is_empty() {
		return Err(Error::Validation {
			message: "audit.tenant_id must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.audit
		.auth_token_env
		.as_deref()
		.map(|name| name.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.audit.auth_token_env = None;
	}
	for backend in &mut cfg.backends {
		if backend.path.trim().is_empty() {
			backend.path = "/v1/chat/completions".to_string();
		}
	}
}
