mod error;

pub mod audit;
pub mod dispatch;
pub mod recommend;
pub mod sanitize;
pub mod scenarios;

pub use audit::{AuditSink, HttpAuditSink, NoopAuditSink};
pub use dispatch::RecommendationSource;
pub use error::{Error, Result};
pub use recommend::{RecommendRequest, RecommendResponse};
pub use scenarios::{ScenariosRequest, ScenariosResponse};

use std::sync::Arc;

use rove_backends::{BackendAdapter, TemplatePicker, UniformPicker};
use rove_config::Config;

/// The recommendation pipeline. Adapters are attempted in the order given;
/// the offline generator sits underneath everything so `recommend` never
/// fails for reasons other than malformed input.
pub struct RoveService {
	pub cfg: Config,
	adapters: Vec<Arc<dyn BackendAdapter>>,
	audit: Arc<dyn AuditSink>,
	picker: Arc<dyn TemplatePicker>,
}
impl RoveService {
	pub fn new(
		cfg: Config,
		adapters: Vec<Arc<dyn BackendAdapter>>,
		audit: Arc<dyn AuditSink>,
	) -> Self {
		Self::with_picker(cfg, adapters, audit, Arc::new(UniformPicker))
	}

	pub fn with_picker(
		cfg: Config,
		adapters: Vec<Arc<dyn BackendAdapter>>,
		audit: Arc<dyn AuditSink>,
		picker: Arc<dyn TemplatePicker>,
	) -> Self {
		Self { cfg, adapters, audit, picker }
	}
}
