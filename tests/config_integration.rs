//! Integration tests for configuration parsing and handling.
//!
//! These tests verify that configuration drives the URL codec.

use dashfilter::config::{ConfigError, FiltersConfig};
use dashfilter::{ConditionalOperator, DashboardFilterRule, DashboardFilters, ErrorCode, FilterTarget};

fn filters() -> DashboardFilters {
    DashboardFilters {
        dimensions: vec![DashboardFilterRule::new(
            "dim-1",
            FilterTarget::new("payments_payment_method", "payments", "payment_method"),
            ConditionalOperator::Equals,
            ["credit_card".into()],
        )],
        ..Default::default()
    }
}

/// Test minimal configuration
#[test]
fn test_config_minimal() {
    let config = FiltersConfig::from_str("").expect("Failed to parse config");
    let codec = dashfilter::codec_from_config(&config);
    assert_eq!(codec.name(), "filters");
    assert_eq!(codec.limit(), None);
}

/// Test codec settings flow into the codec
#[test]
fn test_config_codec() {
    let config_str = r#"
        [codec]
        param_name = "dashboard_filters"
        max_param_length = 50
    "#;

    let config = FiltersConfig::from_str(config_str).expect("Failed to parse config");
    let codec = dashfilter::codec_from_config(&config);

    assert_eq!(codec.name(), "dashboard_filters");
    let err = codec.to_query_pair(&filters()).unwrap_err();
    assert_eq!(err.code, ErrorCode::ParamTooLong);
}

/// Test environment overrides
#[test]
fn test_config_environment_override() {
    let config_str = r#"
        [codec]
        max_param_length = 50

        [environments.production.codec]
        param_name = "filters"
        max_param_length = 8000
    "#;

    let config: FiltersConfig = toml::from_str(config_str).expect("Failed to parse config");
    let production = config.with_environment("production").unwrap();
    let codec = dashfilter::codec_from_config(&production);

    assert!(codec.to_query_pair(&filters()).is_ok());
}

/// Test invalid values are rejected
#[test]
fn test_config_invalid_format() {
    let err = FiltersConfig::from_str("[logging]\nformat = \"xml\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

/// Test logging initialization from config does not panic when repeated
#[test]
fn test_config_init_logging() {
    let config = FiltersConfig::default();
    dashfilter::init_logging_from_config(&config);
    dashfilter::init_logging_from_config(&config);
}
