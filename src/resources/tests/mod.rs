use std::sync::Arc;

use super::*;
use crate::api::ApiClient;

pub(crate) mod fixtures;

mod manual_webhook;

use fixtures::FakeApi;

/// The double, and the same double as the handlers see it.
fn fake_api() -> (Arc<FakeApi>, Arc<dyn ApiClient>) {
    let api = Arc::new(FakeApi::new());
    let client: Arc<dyn ApiClient> = api.clone();
    (api, client)
}

#[test]
fn test_state_id_required() {
    let err = state_id(&Value::Null).unwrap_err();
    assert_eq!(err.iter().next().unwrap().detail, "attribute 'id' must be set to a known value");
    assert!(state_id(&Value::known(String::new())).is_err());
    assert_eq!(state_id(&Value::known("af-1".to_string())).unwrap(), "af-1");
}

#[test]
fn test_found_maps_not_found_to_none() {
    let missing: Result<(), ProviderError> = Err(ProviderError::upstream(
        "read",
        "access flow",
        Some("af-1"),
        crate::api::ApiError::Status {
            status: 404,
            body: String::new(),
        },
    ));
    assert_eq!(found("apono_access_flow", "af-1", missing).unwrap(), None);

    let failing: Result<(), ProviderError> = Err(ProviderError::upstream(
        "read",
        "access flow",
        Some("af-1"),
        crate::api::ApiError::Transport("connection reset".into()),
    ));
    assert!(found("apono_access_flow", "af-1", failing).is_err());
}
