use api_contract::{ApiResponse, ServiceResult};

#[test]
fn api_response_success() {
    let response = ApiResponse::success("ok");
    assert!(response.success);
    assert!(response.data.is_some());
    assert!(response.error.is_none());
}

#[test]
fn api_response_error() {
    let response = ApiResponse::<()>::error("REQUEST.FAILED", "view id is required");
    assert!(!response.success);
    assert!(response.data.is_none());
    assert!(response.error.is_some());
}

#[test]
fn service_result_success_carries_value() {
    let result = ServiceResult::success("corr-1", 7);
    assert!(result.status);
    assert_eq!(result.value, Some(7));
    assert!(result.message.is_none());
    assert_eq!(result.correlation_id, "corr-1");
}

#[test]
fn service_result_failure_carries_message() {
    let result = ServiceResult::<i32>::failure("corr-1", "View id is required.");
    assert!(!result.status);
    assert!(result.value.is_none());
    assert_eq!(result.message.as_deref(), Some("View id is required."));
}
