use std::{env, sync::Arc};

use rove_backends::{BackendAdapter, ChatBackend};
use rove_config::Config;
use rove_service::{AuditSink, HttpAuditSink, NoopAuditSink, RoveService};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RoveService>,
}
impl AppState {
	pub fn new(config: Config) -> color_eyre::Result<Self> {
		let adapters = build_adapters(&config);
		let audit = build_audit_sink(&config)?;
		let service = RoveService::new(config, adapters, audit);

		Ok(Self { service: Arc::new(service) })
	}
}

/// Resolve each configured backend's credential from its environment
/// variable. A missing credential skips the backend; it never errors, so a
/// credential-less deployment simply serves everything offline.
fn build_adapters(config: &Config) -> Vec<Arc<dyn BackendAdapter>> {
	let mut adapters: Vec<Arc<dyn BackendAdapter>> = Vec::new();

	for backend in &config.backends {
		let api_key = match env::var(&backend.api_key_env) {
			Ok(key) if !key.trim().is_empty() => key,
			_ => {
				tracing::info!(
					backend = backend.name.as_str(),
					env = backend.api_key_env.as_str(),
					"API key not set; backend skipped."
				);

				continue;
			},
		};

		match ChatBackend::new(backend.clone(), api_key) {
			Ok(adapter) => {
				tracing::info!(backend = backend.name.as_str(), "Backend configured.");

				adapters.push(Arc::new(adapter));
			},
			Err(err) => {
				tracing::warn!(
					backend = backend.name.as_str(),
					error = %err,
					"Backend could not be constructed; skipped."
				);
			},
		}
	}

	if adapters.is_empty() {
		tracing::info!("No backends configured; every request will use the offline generator.");
	}

	adapters
}

fn build_audit_sink(config: &Config) -> color_eyre::Result<Arc<dyn AuditSink>> {
	if !config.audit.enabled {
		return Ok(Arc::new(NoopAuditSink));
	}

	let auth_token =
		config.audit.auth_token_env.as_ref().and_then(|name| env::var(name).ok());
	let sink = HttpAuditSink::new(config.audit.clone(), auth_token)?;

	Ok(Arc::new(sink))
}
