use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use rove_domain::{Candidate, CostTier, RealtimeStatus, Setting};

/// Every key a backend has been observed to report status under. Alias
/// resolution happens here, once, immediately after a payload is received;
/// no other component looks at raw keys.
const STATUS_ALIASES: [&str; 4] = ["realtime_status", "status", "availability", "open_status"];
const UNAVAILABLE_ALIASES: [&str; 3] = ["unavailable", "is_unavailable", "temporarily_closed"];

/// Internal-context markers that must never reach a user-visible field.
const MARKER_PATTERNS: [&str; 3] = [
	r"(?i)\[(?:context|ctx)[^\]]*\]",
	r"(?i)\[[^\[\]]*(?:role|mood|group)\s*=[^\[\]]*\]",
	r"(?i)\b(?:role|mood|group)\s*=\s*[\w-]+",
];

pub(crate) enum Verdict {
	Keep(Candidate),
	/// Discard wholesale; the caller substitutes an offline result that
	/// preserves the original recommendation identifier.
	Replace,
}

pub fn normalize_candidate(payload: &Value, recommendation_id: Uuid) -> Candidate {
	let title = string_field(payload, &["title", "name"]).unwrap_or_default();
	let description = string_field(payload, &["description", "narrative"]).unwrap_or_default();
	let duration =
		string_field(payload, &["duration"]).unwrap_or_else(|| "a few hours".to_string());
	let location = string_field(payload, &["location"]).unwrap_or_else(|| "nearby".to_string());
	let status = STATUS_ALIASES
		.iter()
		.find_map(|key| payload.get(key).and_then(Value::as_str))
		.map(parse_status)
		.unwrap_or(RealtimeStatus::Unknown);
	let unavailable = UNAVAILABLE_ALIASES
		.iter()
		.any(|key| payload.get(key).and_then(Value::as_bool).unwrap_or(false));
	let activities = payload
		.get("activities")
		.and_then(Value::as_array)
		.map(|items| {
			items.iter().filter_map(Value::as_str).map(str::to_string).collect::<Vec<_>>()
		})
		.unwrap_or_default();

	Candidate {
		recommendation_id,
		title,
		description,
		duration,
		cost_tier: string_field(payload, &["cost_tier", "cost"])
			.map(|raw| parse_cost_tier(&raw))
			.unwrap_or(CostTier::Low),
		location,
		setting: string_field(payload, &["setting"])
			.map(|raw| parse_setting(&raw))
			.unwrap_or(Setting::Either),
		group_friendly: payload
			.get("group_friendly")
			.and_then(Value::as_bool)
			.unwrap_or(true),
		realtime_status: status,
		unavailable,
		activities,
	}
}

/// Leakage and availability checks plus the combined keep/replace decision.
pub(crate) fn validate(mut candidate: Candidate) -> Verdict {
	if candidate.realtime_status == RealtimeStatus::Closed || candidate.unavailable {
		return Verdict::Replace;
	}
	if candidate.title.trim().is_empty() {
		return Verdict::Replace;
	}
	if contains_leakage(&candidate.title) {
		let Some(cleaned) = sanitize_title(&candidate.title) else {
			return Verdict::Replace;
		};

		candidate.title = cleaned;

		if candidate.realtime_status == RealtimeStatus::Unknown {
			candidate.realtime_status = RealtimeStatus::Open;
		}
	}

	Verdict::Keep(candidate)
}

pub fn contains_leakage(title: &str) -> bool {
	MARKER_PATTERNS
		.iter()
		.any(|pattern| Regex::new(pattern).map(|re| re.is_match(title)).unwrap_or(false))
}

/// Strip markers and tidy what remains. `None` means the title was mostly
/// marker residue and the whole candidate should be replaced.
pub fn sanitize_title(title: &str) -> Option<String> {
	let mut cleaned = title.to_string();
	let mut marker_blocks = 0;

	for pattern in MARKER_PATTERNS {
		let Ok(re) = Regex::new(pattern) else {
			continue;
		};

		marker_blocks += re.find_iter(&cleaned).count();
		cleaned = re.replace_all(&cleaned, " ").into_owned();
	}

	let cleaned = cleaned
		.split_whitespace()
		.map(|word| word.trim_matches(|c: char| "[](){}:;,.-|".contains(c)))
		.filter(|word| !word.is_empty())
		.collect::<Vec<_>>()
		.join(" ");
	let content_words =
		cleaned.split_whitespace().filter(|word| word.chars().any(char::is_alphanumeric)).count();
	let stripped_len = title.len().saturating_sub(cleaned.len());

	if cleaned.chars().count() < 3 || content_words < 2 {
		return None;
	}
	if marker_blocks >= 2 && stripped_len > cleaned.len() {
		return None;
	}

	Some(cleaned)
}

fn string_field(payload: &Value, aliases: &[&str]) -> Option<String> {
	aliases
		.iter()
		.find_map(|key| payload.get(*key).and_then(Value::as_str))
		.map(|raw| raw.trim().to_string())
		.filter(|raw| !raw.is_empty())
}

fn parse_status(raw: &str) -> RealtimeStatus {
	match raw.trim().to_lowercase().as_str() {
		"open" => RealtimeStatus::Open,
		"closed" => RealtimeStatus::Closed,
		_ => RealtimeStatus::Unknown,
	}
}

fn parse_cost_tier(raw: &str) -> CostTier {
	match raw.trim().to_lowercase().as_str() {
		"free" => CostTier::Free,
		"medium" => CostTier::Medium,
		"high" => CostTier::High,
		_ => CostTier::Low,
	}
}

fn parse_setting(raw: &str) -> Setting {
	match raw.trim().to_lowercase().as_str() {
		"indoor" => Setting::Indoor,
		"outdoor" => Setting::Outdoor,
		_ => Setting::Either,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn normalized(payload: Value) -> Candidate {
		normalize_candidate(&payload, Uuid::new_v4())
	}

	#[test]
	fn resolves_status_aliases_case_insensitively() {
		for key in STATUS_ALIASES {
			let candidate = normalized(serde_json::json!({ "title": "t", key: "CLOSED" }));

			assert_eq!(candidate.realtime_status, RealtimeStatus::Closed);
		}
	}

	#[test]
	fn resolves_unavailability_aliases() {
		for key in UNAVAILABLE_ALIASES {
			let candidate = normalized(serde_json::json!({ "title": "t", key: true }));

			assert!(candidate.unavailable);
		}
	}

	#[test]
	fn strips_a_context_block_from_a_title() {
		let cleaned = sanitize_title("[Context: Role=Traveler] Sunset kayak tour")
			.expect("Title with real content must survive sanitization.");

		assert_eq!(cleaned, "Sunset kayak tour");
		assert!(!contains_leakage(&cleaned));
	}

	#[test]
	fn strips_bare_key_value_fragments() {
		let cleaned = sanitize_title("mood=adventurous Evening climbing meetup")
			.expect("Title with real content must survive sanitization.");

		assert!(!cleaned.contains('='));
		assert!(cleaned.contains("climbing"));
	}

	#[test]
	fn rejects_titles_that_are_mostly_markers() {
		assert!(sanitize_title("[Context: Role=Traveler][Group=Solo]").is_none());
		assert!(sanitize_title("[ctx a=b] x").is_none());
	}

	#[test]
	fn closed_candidates_are_replaced() {
		let candidate = normalized(serde_json::json!({ "title": "Nice bar", "status": "Closed" }));

		assert!(matches!(validate(candidate), Verdict::Replace));
	}

	#[test]
	fn sanitized_titles_force_open_when_status_was_absent() {
		let candidate =
			normalized(serde_json::json!({ "title": "[Context: Mood=Chill] Rooftop tea house" }));
		let Verdict::Keep(kept) = validate(candidate) else {
			panic!("Sanitizable candidate must be kept.");
		};

		assert_eq!(kept.title, "Rooftop tea house");
		assert_eq!(kept.realtime_status, RealtimeStatus::Open);
	}

	#[test]
	fn clean_candidates_pass_through_untouched() {
		let candidate =
			normalized(serde_json::json!({ "title": "Morning swim", "status": "open" }));
		let Verdict::Keep(kept) = validate(candidate) else {
			panic!("Clean candidate must be kept.");
		};

		assert_eq!(kept.title, "Morning swim");
		assert_eq!(kept.realtime_status, RealtimeStatus::Open);
	}
}
