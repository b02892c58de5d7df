use crate::utils::get_test_data_path;
use retype::{
    config::RetypeConfig, infer_at_with, retype_ast::locator::SourceRange, try_infer_at_with,
};
use retype_type_inference::options::BinaryMismatch;

#[test]
fn test_load_fixture_config() -> anyhow::Result<()> {
    let config = RetypeConfig::load(&get_test_data_path().join("query.json"))?;
    assert_eq!(config.call_patterns.len(), 1);
    assert!(config.inference.collapse_equal_branches);

    let source = std::fs::read_to_string(get_test_data_path().join("query.ts"))?;
    let range = SourceRange::new(0, 12, 0, 15);
    assert_eq!(
        try_infer_at_with(&config.engine(), &source, range)?.to_string(),
        "Element | null"
    );
    assert_eq!(
        try_infer_at_with(&RetypeConfig::default().engine(), &source, range)?.to_string(),
        "unknown"
    );
    Ok(())
}

#[test]
fn test_policies_from_json() {
    let config = RetypeConfig::from_json_str(
        r#"{ "collapse_equal_branches": false, "binary_mismatch": "unknown" }"#,
    )
    .unwrap();
    assert_eq!(config.inference.binary_mismatch, BinaryMismatch::Unknown);
    let engine = config.engine();
    let source = "const a: any = c ? 1 : 2;\nconst b: any = 1 + \"s\";";
    assert_eq!(
        infer_at_with(&engine, source, SourceRange::new(0, 9, 0, 12)).to_string(),
        "number | number"
    );
    assert_eq!(
        infer_at_with(&engine, source, SourceRange::new(1, 9, 1, 12)).to_string(),
        "unknown"
    );
}

#[test]
fn test_simple_name_patterns_from_json() {
    let config = RetypeConfig::from_json_str(
        r#"{ "call_patterns": [
            { "callee": "document.createElement", "descriptor": "HTMLElement", "match_simple_name": true }
        ] }"#,
    )
    .unwrap();
    let source = "const el: any = frame.createElement(\"div\");";
    assert_eq!(
        infer_at_with(&config.engine(), source, SourceRange::new(0, 10, 0, 13)).to_string(),
        "HTMLElement"
    );
}

#[test]
fn test_config_round_trips_through_json() {
    let config = RetypeConfig::from_json_str(
        r#"{ "max_depth": 12, "call_patterns": [{ "callee": "f", "descriptor": "string" }] }"#,
    )
    .unwrap();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(RetypeConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn test_missing_file() {
    let error = RetypeConfig::load(&get_test_data_path().join("missing.json")).unwrap_err();
    assert!(error.to_string().contains("failed to read config file"));
}
