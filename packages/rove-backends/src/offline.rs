use rand::Rng;
use uuid::Uuid;

use rove_domain::{
	Candidate, CostTier, RealtimeStatus, Setting,
	extract::{Fragments, extract_fragments},
};

/// Injectable template selection so offline output stays testable while
/// remaining visibly varied for end users.
pub trait TemplatePicker
where
	Self: Send + Sync,
{
	fn pick(&self, len: usize) -> usize;
}

pub struct UniformPicker;
impl TemplatePicker for UniformPicker {
	fn pick(&self, len: usize) -> usize {
		rand::thread_rng().gen_range(0..len.max(1))
	}
}

pub struct FixedPicker(pub usize);
impl TemplatePicker for FixedPicker {
	fn pick(&self, len: usize) -> usize {
		self.0 % len.max(1)
	}
}

struct Template {
	title: &'static str,
	description: &'static str,
	cost_tier: CostTier,
	setting: Setting,
	group_friendly: bool,
	activities: &'static [&'static str],
}

const TEMPLATES: &[Template] = &[
	Template {
		title: "A {vibe} wander around {location}",
		description: "Take {time} to drift through {location} with no fixed plan. Follow \
			whatever looks interesting and let the {vibe} mood set the pace.",
		cost_tier: CostTier::Free,
		setting: Setting::Outdoor,
		group_friendly: true,
		activities: &["walk a new street", "find a bench with a view", "grab a snack on the way"],
	},
	Template {
		title: "Cafe corner reset near {location}",
		description: "Claim a quiet table {location} for {time}. Bring a notebook or a book \
			and keep things {vibe}.",
		cost_tier: CostTier::Low,
		setting: Setting::Indoor,
		group_friendly: false,
		activities: &["order something new", "people-watch", "write down three ideas"],
	},
	Template {
		title: "Pick-up picnic in {location}",
		description: "Gather simple snacks and head for green space {location}. A {vibe} \
			{time} outside beats another hour on the couch.",
		cost_tier: CostTier::Low,
		setting: Setting::Outdoor,
		group_friendly: true,
		activities: &["assemble a snack bag", "find a patch of grass", "invite someone along"],
	},
	Template {
		title: "Small quest: {vibe} discoveries in {location}",
		description: "Give yourself {time} and a simple goal: find three things in {location} \
			you have never noticed before. Photograph each one.",
		cost_tier: CostTier::Free,
		setting: Setting::Either,
		group_friendly: true,
		activities: &["spot hidden details", "take three photos", "share the best find"],
	},
	Template {
		title: "Home-turf workshop: make something {vibe}",
		description: "Spend {time} making something with your hands, close to {location}. \
			Cooking, sketching, or fixing the thing you keep postponing all count.",
		cost_tier: CostTier::Free,
		setting: Setting::Indoor,
		group_friendly: false,
		activities: &["pick one small project", "set a timer", "finish it, imperfect is fine"],
	},
];

/// Deterministic, network-free candidate synthesis. Never fails; this is
/// the floor under the whole pipeline's availability guarantee.
pub fn generate_offline(input: &str, id: Uuid, picker: &dyn TemplatePicker) -> Candidate {
	let fragments = extract_fragments(input);
	let template = &TEMPLATES[picker.pick(TEMPLATES.len()) % TEMPLATES.len()];

	Candidate {
		recommendation_id: id,
		title: fill(template.title, &fragments),
		description: fill(template.description, &fragments),
		duration: fragments.time.clone(),
		cost_tier: template.cost_tier,
		location: fragments.location.clone(),
		setting: template.setting,
		group_friendly: template.group_friendly,
		realtime_status: RealtimeStatus::Open,
		unavailable: false,
		activities: template.activities.iter().map(|activity| activity.to_string()).collect(),
	}
}

fn fill(template: &str, fragments: &Fragments) -> String {
	template
		.replace("{vibe}", &fragments.vibe)
		.replace("{location}", &fragments.location)
		.replace("{time}", &fragments.time)
}
