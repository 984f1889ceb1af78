use regex::Regex;

pub const DEFAULT_LOCATION: &str = "nearby";
pub const DEFAULT_TIME: &str = "a few hours";
pub const DEFAULT_VIBE: &str = "spontaneous";

/// Best-effort fragments pulled from free-text intent. Every field is
/// populated; absent fragments fall back to the defaults above.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fragments {
	pub location: String,
	pub time: String,
	pub vibe: String,
}

pub fn extract_fragments(input: &str) -> Fragments {
	let location = first_capture(
		input,
		&[
			r"(?i)\blocation\s*[:=]\s*([^,;\n]+)",
			r"(?i)\b(?:near|around)\s+(?:the\s+)?([\w']+(?:\s+[\w']+)?)",
		],
	);
	let time = first_capture(
		input,
		&[
			r"(?i)\btime\s*[:=]\s*([^,;\n]+)",
			r"(?i)\b((?:for\s+)?\d+(?:\.\d+)?\s*(?:hours?|hrs?|minutes?|mins?))\b",
			r"(?i)\b(this\s+(?:morning|afternoon|evening)|tonight)\b",
		],
	);
	let vibe = first_capture(
		input,
		&[
			r"(?i)\bvibe\s*[:=]\s*([^,;\n]+)",
			r"(?i)\b(relaxed|chill|adventurous|cozy|energetic|quiet|social|creative)\b",
		],
	);

	Fragments {
		location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
		time: time.unwrap_or_else(|| DEFAULT_TIME.to_string()),
		vibe: vibe.unwrap_or_else(|| DEFAULT_VIBE.to_string()),
	}
}

fn first_capture(input: &str, patterns: &[&str]) -> Option<String> {
	for pattern in patterns {
		let captured = Regex::new(pattern)
			.ok()
			.and_then(|re| re.captures(input))
			.and_then(|caps| caps.get(1))
			.map(|m| m.as_str().trim().trim_start_matches("for ").trim().to_string())
			.filter(|fragment| !fragment.is_empty());

		if captured.is_some() {
			return captured;
		}
	}

	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_labeled_fragments() {
		let fragments =
			extract_fragments("Vibe: relaxed, Time: 2 hours, Location: the riverfront");

		assert_eq!(fragments.vibe, "relaxed");
		assert_eq!(fragments.time, "2 hours");
		assert_eq!(fragments.location, "the riverfront");
	}

	#[test]
	fn extracts_unlabeled_fragments() {
		let fragments = extract_fragments("something adventurous near old town, maybe 3 hours");

		assert_eq!(fragments.vibe, "adventurous");
		assert_eq!(fragments.location, "old town");
		assert_eq!(fragments.time, "3 hours");
	}

	#[test]
	fn falls_back_to_defaults() {
		let fragments = extract_fragments("surprise me");

		assert_eq!(fragments.location, DEFAULT_LOCATION);
		assert_eq!(fragments.time, DEFAULT_TIME);
		assert_eq!(fragments.vibe, DEFAULT_VIBE);
	}
}
