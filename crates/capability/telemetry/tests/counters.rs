use prodmon_telemetry::{metrics, new_correlation_id, record_grid_rows, record_service_request};

#[test]
fn correlation_ids_are_unique() {
    let first = new_correlation_id();
    let second = new_correlation_id();
    assert!(!first.is_empty());
    assert_ne!(first, second);
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_service_request();
    record_grid_rows(3);
    let after = metrics().snapshot();
    assert!(after.service_requests >= before.service_requests + 1);
    assert!(after.grid_rows_built >= before.grid_rows_built + 3);
}
