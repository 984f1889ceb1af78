use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::RoveService;
use rove_domain::{
	Motivation, ScenarioPreset, UserHistory,
	scenario::{presets_in_order, prioritize},
};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScenariosRequest {
	#[serde(default)]
	pub history: UserHistory,
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub now: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
pub struct ScenariosResponse {
	pub categories: Vec<Motivation>,
	pub presets: Vec<ScenarioPreset>,
}

impl RoveService {
	/// Stateless ranking consumed before any recommendation request is
	/// built; presentation lays out its fixed sections in this order.
	pub fn scenarios(&self, request: ScenariosRequest) -> ScenariosResponse {
		let now = request.now.unwrap_or_else(OffsetDateTime::now_utc);
		let location = request.location.unwrap_or_default();
		let ranking = prioritize(&request.history, now, &location);

		ScenariosResponse {
			categories: ranking.to_vec(),
			presets: presets_in_order(ranking),
		}
	}
}
