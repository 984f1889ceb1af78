use serde::{Deserialize, Serialize};

use crate::extract::Fragments;
use rove_config::TrustPolicy;

/// One boolean fact each about how a candidate was produced. Computed once
/// per request, never retroactively changed.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TrustSignals {
	pub ai_generated: bool,
	pub ugc_influenced: bool,
	pub recent_activity: bool,
	pub context_verified: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
	Verified,
	Live,
	Community,
	AiAssisted,
	Curated,
}
impl TrustLevel {
	pub fn label(self) -> &'static str {
		match self {
			Self::Verified => "Verified",
			Self::Live => "Live",
			Self::Community => "Community",
			Self::AiAssisted => "AI-assisted",
			Self::Curated => "Curated",
		}
	}

	fn detail(self) -> &'static str {
		match self {
			Self::Verified => "Key details were independently verified.",
			Self::Live => "Reflects recent activity around this suggestion.",
			Self::Community => "Shaped by contributions from other users.",
			Self::AiAssisted => "Generated by an AI model without live verification.",
			Self::Curated => "Drawn from a curated offline catalog.",
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TrustMetadata {
	pub level: TrustLevel,
	pub label: String,
	pub detail: String,
	pub signals: TrustSignals,
}

/// The single source of truth mapping signal combinations to a tier.
/// Callers and the UI render this verbatim; they never re-derive it.
pub fn trust_metadata(signals: TrustSignals, _policy: &TrustPolicy) -> TrustMetadata {
	let level = if signals.context_verified {
		TrustLevel::Verified
	} else if signals.recent_activity {
		TrustLevel::Live
	} else if signals.ugc_influenced {
		TrustLevel::Community
	} else if signals.ai_generated {
		TrustLevel::AiAssisted
	} else {
		TrustLevel::Curated
	};

	TrustMetadata {
		level,
		label: level.label().to_string(),
		detail: level.detail().to_string(),
		signals,
	}
}

/// Policy gate over a candidate's signals. Deliberately not used to reject
/// anything in the shipped flow; a stricter deployment swaps the policy
/// values without touching call sites.
pub fn policy_permits(policy: &TrustPolicy, signals: TrustSignals) -> bool {
	if policy.require_verified_context && !signals.context_verified {
		return false;
	}
	if !policy.allow_ugc_influence && signals.ugc_influenced {
		return false;
	}

	true
}

/// One-sentence "why this now" explanation. Only live or verified signals
/// justify one; otherwise callers show nothing.
pub fn why_now(fragments: &Fragments, signals: TrustSignals) -> Option<String> {
	if signals.recent_activity {
		return Some(format!(
			"There has been recent activity {}, which fits a {} outing over {}.",
			fragments.location, fragments.vibe, fragments.time
		));
	}
	if signals.context_verified {
		return Some(format!(
			"Details for this spot {} were verified recently, a good match for {}.",
			fragments.location, fragments.time
		));
	}

	None
}

#[cfg(test)]
mod tests {
	use super::*;

	fn policy() -> TrustPolicy {
		TrustPolicy {
			allow_ugc_influence: true,
			min_recency_hours: 24,
			require_verified_context: false,
			min_confidence: 0.0,
		}
	}

	#[test]
	fn verified_outranks_all_other_signals() {
		let signals = TrustSignals {
			ai_generated: true,
			ugc_influenced: true,
			recent_activity: true,
			context_verified: true,
		};
		let metadata = trust_metadata(signals, &policy());

		assert_eq!(metadata.level, TrustLevel::Verified);
		assert_eq!(metadata.signals, signals);
	}

	#[test]
	fn no_signals_maps_to_curated() {
		let metadata = trust_metadata(TrustSignals::default(), &policy());

		assert_eq!(metadata.level, TrustLevel::Curated);
		assert!(!metadata.detail.is_empty());
	}

	#[test]
	fn ai_only_maps_to_ai_assisted() {
		let signals = TrustSignals { ai_generated: true, ..TrustSignals::default() };

		assert_eq!(trust_metadata(signals, &policy()).level, TrustLevel::AiAssisted);
	}

	#[test]
	fn why_now_requires_live_or_verified_signals() {
		let fragments = Fragments {
			location: "nearby".to_string(),
			time: "a few hours".to_string(),
			vibe: "spontaneous".to_string(),
		};

		assert!(why_now(&fragments, TrustSignals::default()).is_none());

		let live = TrustSignals { recent_activity: true, ..TrustSignals::default() };

		assert!(why_now(&fragments, live).is_some());
	}

	#[test]
	fn permissive_policy_never_rejects() {
		assert!(policy_permits(&policy(), TrustSignals::default()));
		assert!(policy_permits(
			&policy(),
			TrustSignals { ugc_influenced: true, ..TrustSignals::default() }
		));
	}

	#[test]
	fn strict_policy_is_structurally_enforceable() {
		let strict = TrustPolicy { require_verified_context: true, ..policy() };

		assert!(!policy_permits(&strict, TrustSignals::default()));
	}
}
