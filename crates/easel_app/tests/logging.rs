//! Global subscriber setup
//!
//! The subscriber is process-wide, so everything runs in one test.

use easel_app::{init_logging, EaselError, SketchConfig};

#[test]
fn test_init_logging_once() {
    std::env::remove_var("RUST_LOG");

    let bad = SketchConfig {
        log_filter: "easel_paint=loud".to_string(),
        ..Default::default()
    };
    assert!(matches!(bad.init_logging(), Err(EaselError::Logging(_))));

    let config = SketchConfig::from_toml_str(r#"log_filter = "easel_paint=debug""#).unwrap();
    config.init_logging().unwrap();
    tracing::debug!(target: "easel_paint", "subscriber installed");

    assert!(matches!(init_logging("info"), Err(EaselError::Logging(_))));
}
