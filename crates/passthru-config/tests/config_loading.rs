//! Loading configurations from disk and wiring them into the engines.

use std::io::Write;

use approx::assert_relative_eq;
use passthru_analytics::StubDiscount;
use passthru_config::prelude::*;
use passthru_core::{Date, SpreadType};
use passthru_mbs::{generate, PayDelayConvention, PoolTerms};

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_from_path_toml() {
    let file = write_temp(
        ".toml",
        r#"
        [cash_flow]
        pay_delay = "origination_offset"
        prepay_during_io = false

        [pricing]
        default_spread_type = "ISpread"
        stub_discount = "none"

        [solver]
        initial_guess_bps = 50.0
        "#,
    );

    let config = PassthruConfig::from_path(file.path()).unwrap();

    assert_eq!(
        config.cash_flow.pay_delay,
        PayDelayConvention::OriginationOffset
    );
    assert!(!config.cash_flow.prepay_during_io);
    assert_eq!(config.pricing.default_spread_type, SpreadType::ISpread);
    assert_eq!(config.pricing.stub_discount, StubDiscount::None);
    assert_relative_eq!(config.solver.initial_guess_bps, 50.0);
    assert_eq!(config.solver.max_iterations, 1000);
}

#[test]
fn test_from_path_json() {
    let file = write_temp(".json", r#"{"solver": {"max_iterations": 25}}"#);

    let config = PassthruConfig::from_path(file.path()).unwrap();

    assert_eq!(config.solver.max_iterations, 25);
    assert_eq!(config.cash_flow, CashFlowConfig::default());
}

#[test]
fn test_saved_config_reloads() {
    let config = PassthruConfig {
        solver: SolverSettings::default().with_tolerance(1e-9),
        ..PassthruConfig::default()
    };
    let file = write_temp(".toml", &config.to_toml_string().unwrap());

    assert_eq!(PassthruConfig::from_path(file.path()).unwrap(), config);
}

#[test]
fn test_from_path_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(
        PassthruConfig::from_path(&path),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_from_path_unsupported_extension() {
    let file = write_temp(".yaml", "solver: {}");

    assert!(matches!(
        PassthruConfig::from_path(file.path()),
        Err(ConfigError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_from_path_invalid_values() {
    let file = write_temp(
        ".json",
        r#"{"solver": {"max_iterations": 0, "bump_bps": -0.5}}"#,
    );

    match PassthruConfig::from_path(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, ["solver.max_iterations", "solver.bump_bps"]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_cash_flow_config_drives_engine() {
    let settlement = Date::from_ymd(2024, 3, 1).unwrap();
    let terms = PoolTerms::builder()
        .settlement(settlement)
        .coupon(6.0)
        .remaining_term(360)
        .pay_delay(45)
        .original_balance(100_000.0)
        .build()
        .unwrap();

    let config = PassthruConfig::from_toml_str(
        "[cash_flow]\npay_delay = \"origination_offset\"\n",
    )
    .unwrap();
    let schedule = generate(&terms, &config.cash_flow.conventions()).unwrap();

    assert_eq!(schedule.first().unwrap().pay_date.day(), 16);
}
