use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::CostTier;

/// Hours before a past engagement's influence halves, roughly three days.
const ENGAGEMENT_TAU_HOURS: f64 = 72.0;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivation {
	Social,
	Recharge,
	Explore,
}
impl Motivation {
	/// Tie-break order. Also the order callers get when nothing else
	/// differentiates the categories.
	pub const FIXED_ORDER: [Self; 3] = [Self::Social, Self::Recharge, Self::Explore];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Social => "social",
			Self::Recharge => "recharge",
			Self::Explore => "explore",
		}
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioParams {
	pub duration_minutes: u32,
	pub budget_tier: CostTier,
	pub outdoor: bool,
	pub group_friendly: bool,
	pub creative: bool,
	pub relaxing: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioPreset {
	pub id: &'static str,
	pub display_name: &'static str,
	pub category: Motivation,
	pub params: ScenarioParams,
}

/// Aggregate engagement per category, owned by the caller.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserHistory {
	#[serde(default)]
	pub engagements: Vec<CategoryEngagement>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CategoryEngagement {
	pub category: Motivation,
	pub count: u32,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub last_engaged_at: Option<OffsetDateTime>,
}

/// Rank the three fixed categories for preset display order. Total and
/// stable: always a permutation of all three, ties kept in FIXED_ORDER.
pub fn prioritize(history: &UserHistory, now: OffsetDateTime, location: &str) -> [Motivation; 3] {
	let mut ranked = Motivation::FIXED_ORDER;

	ranked.sort_by(|a, b| {
		score(history, now, location, *b)
			.partial_cmp(&score(history, now, location, *a))
			.unwrap_or(Ordering::Equal)
	});

	ranked
}

/// The full preset catalog reordered to match `prioritize`'s ranking.
pub fn presets_in_order(ranking: [Motivation; 3]) -> Vec<ScenarioPreset> {
	let mut presets = catalog();

	presets.sort_by_key(|preset| {
		ranking.iter().position(|category| *category == preset.category).unwrap_or(ranking.len())
	});

	presets
}

pub fn catalog() -> Vec<ScenarioPreset> {
	vec![
		ScenarioPreset {
			id: "evening_with_friends",
			display_name: "Evening with friends",
			category: Motivation::Social,
			params: ScenarioParams {
				duration_minutes: 180,
				budget_tier: CostTier::Medium,
				outdoor: false,
				group_friendly: true,
				creative: false,
				relaxing: false,
			},
		},
		ScenarioPreset {
			id: "game_night",
			display_name: "Game night",
			category: Motivation::Social,
			params: ScenarioParams {
				duration_minutes: 150,
				budget_tier: CostTier::Low,
				outdoor: false,
				group_friendly: true,
				creative: true,
				relaxing: false,
			},
		},
		ScenarioPreset {
			id: "quiet_reset",
			display_name: "Quiet reset",
			category: Motivation::Recharge,
			params: ScenarioParams {
				duration_minutes: 90,
				budget_tier: CostTier::Free,
				outdoor: false,
				group_friendly: false,
				creative: false,
				relaxing: true,
			},
		},
		ScenarioPreset {
			id: "slow_morning_walk",
			display_name: "Slow morning walk",
			category: Motivation::Recharge,
			params: ScenarioParams {
				duration_minutes: 60,
				budget_tier: CostTier::Free,
				outdoor: true,
				group_friendly: false,
				creative: false,
				relaxing: true,
			},
		},
		ScenarioPreset {
			id: "neighborhood_discovery",
			display_name: "Neighborhood discovery",
			category: Motivation::Explore,
			params: ScenarioParams {
				duration_minutes: 120,
				budget_tier: CostTier::Low,
				outdoor: true,
				group_friendly: true,
				creative: false,
				relaxing: false,
			},
		},
		ScenarioPreset {
			id: "hands_on_workshop",
			display_name: "Hands-on workshop",
			category: Motivation::Explore,
			params: ScenarioParams {
				duration_minutes: 120,
				budget_tier: CostTier::Medium,
				outdoor: false,
				group_friendly: true,
				creative: true,
				relaxing: false,
			},
		},
	]
}

fn score(history: &UserHistory, now: OffsetDateTime, location: &str, category: Motivation) -> f64 {
	time_affinity(now.hour(), category)
		+ history_score(history, now, category)
		+ location_hint(location, category)
}

fn time_affinity(hour: u8, category: Motivation) -> f64 {
	match category {
		Motivation::Social => match hour {
			17..=23 => 2.0,
			12..=16 => 1.0,
			_ => 0.0,
		},
		Motivation::Recharge => match hour {
			5..=9 => 2.0,
			0..=4 | 21..=23 => 1.5,
			_ => 0.5,
		},
		Motivation::Explore => match hour {
			10..=16 => 2.0,
			8..=9 => 1.0,
			_ => 0.5,
		},
	}
}

fn history_score(history: &UserHistory, now: OffsetDateTime, category: Motivation) -> f64 {
	history
		.engagements
		.iter()
		.filter(|engagement| engagement.category == category)
		.map(|engagement| {
			let frequency = (1.0 + f64::from(engagement.count)).ln();
			let decay = engagement
				.last_engaged_at
				.map(|ts| {
					let elapsed_hours = ((now - ts).whole_minutes() as f64 / 60.0).max(0.0);

					(-elapsed_hours / ENGAGEMENT_TAU_HOURS).exp()
				})
				.unwrap_or(0.5);

			frequency * decay
		})
		.sum()
}

/// Coarse availability hint from the caller's location text. Reorders only;
/// a category never drops out of the ranking.
fn location_hint(location: &str, category: Motivation) -> f64 {
	let location = location.to_lowercase();
	let keywords: &[&str] = match category {
		Motivation::Social => &["downtown", "city", "bar", "plaza", "market"],
		Motivation::Recharge => &["home", "quiet", "garden", "spa", "suburb"],
		Motivation::Explore => &["park", "trail", "coast", "river", "museum"],
	};

	if keywords.iter().any(|keyword| location.contains(keyword)) { 0.5 } else { 0.0 }
}

#[cfg(test)]
mod tests {
	use super::*;
	use time::macros::datetime;

	#[test]
	fn evening_with_no_history_favors_social() {
		let ranked =
			prioritize(&UserHistory::default(), datetime!(2026-08-21 19:30 UTC), "nearby");

		assert_eq!(ranked[0], Motivation::Social);
	}

	#[test]
	fn early_morning_favors_recharge() {
		let ranked = prioritize(&UserHistory::default(), datetime!(2026-08-21 06:15 UTC), "");

		assert_eq!(ranked[0], Motivation::Recharge);
	}

	#[test]
	fn heavy_recent_engagement_outweighs_time_of_day() {
		let now = datetime!(2026-08-21 19:30 UTC);
		let history = UserHistory {
			engagements: vec![CategoryEngagement {
				category: Motivation::Explore,
				count: 40,
				last_engaged_at: Some(now - time::Duration::hours(2)),
			}],
		};
		let ranked = prioritize(&history, now, "nearby");

		assert_eq!(ranked[0], Motivation::Explore);
	}

	#[test]
	fn preset_order_follows_ranking() {
		let ranking = [Motivation::Explore, Motivation::Social, Motivation::Recharge];
		let presets = presets_in_order(ranking);

		assert_eq!(presets[0].category, Motivation::Explore);
		assert_eq!(presets.last().map(|preset| preset.category), Some(Motivation::Recharge));
	}
}
