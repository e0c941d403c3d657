use api_contract::{
    AnalysisInput, CellDto, GroupStatusInput, GroupStatusRowDto, ServiceResult, TrendDataInput,
};
use serde_json::Value;
use std::collections::BTreeMap;

#[test]
fn service_result_is_camel_case() {
    let result = ServiceResult::success("corr-1", "value");
    let value = serde_json::to_value(result).expect("serialize");
    assert!(value.get("correlationId").is_some());
    assert!(value.get("status").is_some());
    assert!(value.get("correlation_id").is_none());
}

#[test]
fn group_status_input_defaults_missing_fields() {
    let payload = r#"{"groupName":"North"}"#;
    let input: GroupStatusInput = serde_json::from_str(payload).expect("parse");
    assert_eq!(input.group_name, "North");
    assert!(input.view_id.is_empty());
    assert!(input.user_id.is_none());
}

#[test]
fn analysis_input_accepts_card_date_alias() {
    let payload = r#"{"assetId":"6f1c1e3a-4a8f-4a0c-9d0e-2c8b3a6f8a10","cardDateMs":1700000000000}"#;
    let input: AnalysisInput = serde_json::from_str(payload).expect("parse");
    assert_eq!(input.date_ms, Some(1_700_000_000_000));
    assert!(input.customer_id.is_nil());
}

#[test]
fn trend_data_input_missing_asset_is_nil() {
    let payload = r#"{"itemKey":"casing","startMs":0,"endMs":10}"#;
    let input: TrendDataInput = serde_json::from_str(payload).expect("parse");
    assert!(input.asset_id.is_nil());
    assert_eq!(input.item_key, "casing");
}

#[test]
fn row_cells_serialize_as_map() {
    let mut cells = BTreeMap::new();
    cells.insert(
        "1".to_string(),
        CellDto {
            value: Some(12.5),
            text: "12.5 psi".to_string(),
            ..CellDto::default()
        },
    );
    let row = GroupStatusRowDto {
        node_id: "well-1".to_string(),
        asset_id: "a".to_string(),
        cells,
    };
    let value = serde_json::to_value(row).expect("serialize");
    let cell = value.get("cells").and_then(|c| c.get("1")).expect("cell");
    assert!(matches!(cell.get("value"), Some(Value::Number(_))));
    assert!(cell.get("backColor").is_some());
}
