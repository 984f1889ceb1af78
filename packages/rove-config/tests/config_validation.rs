use toml::Value;

use rove_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = r#"
[service]
http_bind = "127.0.0.1:8080"
log_level = "info"

[dispatch]
deadline_ms = 30000

[[backends]]
name = "primary"
api_base = "https://api.example.com"
path = "/v1/chat/completions"
model = "example-large"
temperature = 0.7
max_tokens = 512
timeout_ms = 8000
api_key_env = "ROVE_PRIMARY_API_KEY"

[[backends]]
name = "secondary"
api_base = "https://alt.example.com"
path = "/v1/chat/completions"
model = "example-small"
temperature = 0.7
max_tokens = 512
timeout_ms = 8000
api_key_env = "ROVE_SECONDARY_API_KEY"

[trust]
allow_ugc_influence = true
min_recency_hours = 24
require_verified_context = false
min_confidence = 0.0

[audit]
enabled = true
url = "https://ledger.example.com/v1/events"
auth_token_env = "ROVE_AUDIT_TOKEN"
tenant_id = "demo"
timeout_ms = 5000
"#;

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

fn parse(value: &Value) -> Result<Config, toml::de::Error> {
	let rendered = toml::to_string(value).expect("Failed to render config.");

	toml::from_str(&rendered)
}

fn parse_and_validate(value: &Value) -> Result<Config, Error> {
	let cfg = parse(value).expect("Failed to parse config.");

	rove_config::validate(&cfg)?;

	Ok(cfg)
}

#[test]
fn sample_config_is_valid() {
	let cfg = parse_and_validate(&sample_value()).expect("Sample config must validate.");

	assert_eq!(cfg.backends.len(), 2);
	assert_eq!(cfg.backends[0].name, "primary");
	assert_eq!(cfg.dispatch.deadline_ms, 30_000);
}

#[test]
fn rejects_zero_deadline() {
	let mut value = sample_value();

	value
		.get_mut("dispatch")
		.and_then(Value::as_table_mut)
		.expect("Sample config must include [dispatch].")
		.insert("deadline_ms".to_string(), Value::Integer(0));

	let err = parse_and_validate(&value).expect_err("Zero deadline must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_duplicate_backend_names() {
	let mut value = sample_value();
	let backends = value
		.get_mut("backends")
		.and_then(Value::as_array_mut)
		.expect("Sample config must include [[backends]].");
	let clone = backends[0].clone();

	backends.push(clone);

	let err = parse_and_validate(&value).expect_err("Duplicate backend names must be rejected.");

	assert!(err.to_string().contains("duplicated"));
}

#[test]
fn rejects_out_of_range_temperature() {
	let mut value = sample_value();

	value
		.get_mut("backends")
		.and_then(Value::as_array_mut)
		.and_then(|backends| backends.first_mut())
		.and_then(Value::as_table_mut)
		.expect("Sample config must include a backend.")
		.insert("temperature".to_string(), Value::Float(3.5));

	let err = parse_and_validate(&value).expect_err("Out-of-range temperature must be rejected.");

	assert!(err.to_string().contains("temperature"));
}

#[test]
fn rejects_out_of_range_min_confidence() {
	let mut value = sample_value();

	value
		.get_mut("trust")
		.and_then(Value::as_table_mut)
		.expect("Sample config must include [trust].")
		.insert("min_confidence".to_string(), Value::Float(1.5));

	let err = parse_and_validate(&value).expect_err("Out-of-range confidence must be rejected.");

	assert!(err.to_string().contains("min_confidence"));
}

#[test]
fn rejects_enabled_audit_without_url() {
	let mut value = sample_value();

	value
		.get_mut("audit")
		.and_then(Value::as_table_mut)
		.expect("Sample config must include [audit].")
		.insert("url".to_string(), Value::String(String::new()));

	let err = parse_and_validate(&value).expect_err("Enabled audit without url must be rejected.");

	assert!(err.to_string().contains("audit.url"));
}

#[test]
fn omitted_backend_path_gets_the_default() {
	let mut value = sample_value();

	value
		.get_mut("backends")
		.and_then(Value::as_array_mut)
		.and_then(|backends| backends.first_mut())
		.and_then(Value::as_table_mut)
		.expect("Sample config must include a backend.")
		.remove("path");

	let rendered = toml::to_string(&value).expect("Failed to render config.");
	let dir = std::env::temp_dir();
	let path = dir.join(format!("rove_config_test_{}.toml", std::process::id()));

	std::fs::write(&path, rendered).expect("Failed to write temp config.");

	let cfg = rove_config::load(&path).expect("Config without a backend path must load.");

	std::fs::remove_file(&path).ok();

	assert_eq!(cfg.backends[0].path, "/v1/chat/completions");
}

#[test]
fn no_backends_is_valid() {
	let mut value = sample_value();

	value
		.as_table_mut()
		.expect("Sample config must be a table.")
		.remove("backends");

	let cfg = parse_and_validate(&value).expect("Config without backends must validate.");

	assert!(cfg.backends.is_empty());
}
