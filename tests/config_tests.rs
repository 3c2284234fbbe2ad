use paperforge::config::{Config, GenerationOptions};
use paperforge::models::{Model, OUTPUT_TOKEN_CAP};

#[test]
fn defaults_match_the_documented_limits() {
    let config = Config::default();

    assert_eq!(config.default_model, Model::Flash);
    assert_eq!(config.max_parallel_requests, 3);
    assert_eq!(config.max_output_tokens, OUTPUT_TOKEN_CAP);
    assert_eq!(config.daily_limit, 60);
    assert!(config.section_chunking);
    assert_eq!(config.chunk_word_threshold, 100);
    assert_eq!(config.min_paper_length, 1000);
    assert_eq!(config.max_paper_length, 5000);
    assert_eq!(config.rate_limit.requests_per_minute, 60);
    assert_eq!(config.rate_limit.tokens_per_minute, 30_000);
    assert_eq!(config.rate_limit.delay_between_requests_ms, 1000);
}

#[test]
fn empty_toml_yields_the_default_configuration() {
    let config: Config = toml::from_str("").expect("empty config should parse");
    assert_eq!(config.daily_limit, Config::default().daily_limit);
    assert_eq!(config.default_model, Model::Flash);
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let config: Config = toml::from_str(
        r#"
        default_model = "pro"
        daily_limit = 10
        section_chunking = false
        "#,
    )
    .expect("partial config should parse");

    assert_eq!(config.default_model, Model::Pro);
    assert_eq!(config.daily_limit, 10);
    assert!(!config.section_chunking);
    // Untouched fields keep their defaults
    assert_eq!(config.max_parallel_requests, 3);
    assert_eq!(config.chunk_word_threshold, 100);
}

#[test]
fn config_round_trips_through_toml() {
    let mut config = Config::default();
    config.daily_limit = 25;
    config.rate_limit.delay_between_requests_ms = 250;

    let serialized = toml::to_string(&config).expect("config should serialize");
    let parsed: Config = toml::from_str(&serialized).expect("serialized config should parse");
    assert_eq!(parsed.daily_limit, 25);
    assert_eq!(parsed.rate_limit.delay_between_requests_ms, 250);
}

#[test]
fn target_length_is_clamped_to_the_configured_range() {
    let config = Config::default();
    assert_eq!(config.clamp_target_length(500), 1000);
    assert_eq!(config.clamp_target_length(3000), 3000);
    assert_eq!(config.clamp_target_length(9000), 5000);
}

#[test]
fn generation_options_defaults_are_documented_values() {
    let options = GenerationOptions::default();
    assert!((options.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(options.max_output_tokens, OUTPUT_TOKEN_CAP);
    assert_eq!(options.model, Model::Flash);
    assert_eq!(options.retry_count, 3);
}

#[test]
fn generation_options_builders_override_fields() {
    let options = GenerationOptions::default()
        .with_temperature(0.3)
        .with_model(Model::Pro)
        .with_retry_count(5);
    assert!((options.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(options.model, Model::Pro);
    assert_eq!(options.retry_count, 5);
}

#[test]
fn options_derived_from_config_follow_its_model_and_cap() {
    let mut config = Config::default();
    config.default_model = Model::Pro;
    config.max_output_tokens = 1500;

    let options = GenerationOptions::from_config(&config);
    assert_eq!(options.model, Model::Pro);
    assert_eq!(options.max_output_tokens, 1500);
    assert_eq!(options.retry_count, 3);
}
