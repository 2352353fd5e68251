use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::*;
use crate::models::{
    AuthenticationConfigModel, HttpRequestModel, ManualWebhookModel, OAuthModel, WebhookTypeModel,
};

fn plan() -> ManualWebhookModel {
    ManualWebhookModel {
        name: Value::known("open ticket".to_string()),
        active: Value::known(true),
        webhook_type: Value::known(WebhookTypeModel {
            http_request: Some(HttpRequestModel {
                url: "https://hooks.example.com/tickets".into(),
                method: "POST".into(),
                headers: BTreeMap::new(),
            }),
            integration: None,
        }),
        timeout_in_sec: Value::known(Decimal::from(30)),
        authentication_config: Value::known(AuthenticationConfigModel {
            oauth: Some(OAuthModel {
                client_id: "apono".into(),
                client_secret: Some("s3cret".into()),
                token_endpoint_url: "https://auth.example.com/token".into(),
                scopes: Vec::new(),
            }),
        }),
        ..Default::default()
    }
}

fn client_secret(model: &ManualWebhookModel) -> Option<String> {
    model
        .authentication_config
        .as_known()
        .and_then(|a| a.oauth.as_ref())
        .and_then(|o| o.client_secret.clone())
}

#[test]
fn test_client_secret_survives_refresh() {
    let (_api, client) = fake_api();
    let resource = ManualWebhookResource::new(client);
    let ctx = RequestContext::new();

    let state = resource.create(&ctx, &plan()).unwrap();
    assert_eq!(client_secret(&state).as_deref(), Some("s3cret"));

    let refreshed = resource.read(&ctx, &state).unwrap().unwrap();
    assert_eq!(client_secret(&refreshed).as_deref(), Some("s3cret"));

    let imported = resource.import_state(&ctx, "wh-1").unwrap();
    assert_eq!(client_secret(&imported), None);
}

#[test]
fn test_update_leaves_body_template_alone() {
    let (api, client) = fake_api();
    let resource = ManualWebhookResource::new(client);
    let ctx = RequestContext::new();
    let prior = resource.create(&ctx, &plan()).unwrap();
    let plan = ManualWebhookModel {
        active: Value::known(false),
        body_template: Value::Unknown,
        ..prior.clone()
    };

    let state = resource.update(&ctx, &plan, &prior).unwrap();

    assert_eq!(state.active, Value::known(false));
    assert!(api.updates()[0].get("body_template").is_none());
}

#[test]
fn test_validate_rejects_unknown_method() {
    let (_api, client) = fake_api();
    let resource = ManualWebhookResource::new(client);
    let mut plan = plan();
    if let Value::Known(webhook_type) = &mut plan.webhook_type {
        if let Some(request) = webhook_type.http_request.as_mut() {
            request.method = "FETCH".into();
        }
    }

    let diags = resource.validate_config(&plan);

    assert_eq!(
        diags.iter().next().unwrap().attribute.as_deref(),
        Some("type.http_request.method")
    );
}

#[test]
fn test_state_matches_plan_after_create() {
    let (_api, client) = fake_api();
    let resource = ManualWebhookResource::new(client);
    let ctx = RequestContext::new();
    let plan = ManualWebhookModel {
        body_template: Value::known("{\"user\": \"{{ user.email }}\"}".to_string()),
        ..plan()
    };

    let state = resource.create(&ctx, &plan).unwrap();

    assert_eq!(
        state,
        ManualWebhookModel {
            id: state.id.clone(),
            ..plan
        }
    );
    assert_eq!(resource.read(&ctx, &state).unwrap(), Some(state));
}

#[test]
fn test_empty_body_template_rejected_before_create() {
    let (api, client) = fake_api();
    let resource = ManualWebhookResource::new(client);
    let plan = ManualWebhookModel {
        body_template: Value::known(String::new()),
        ..plan()
    };

    let diags = resource.create(&RequestContext::new(), &plan).unwrap_err();

    assert_eq!(
        diags.iter().next().unwrap().attribute.as_deref(),
        Some("body_template")
    );
    assert_eq!(api.calls("create_manual_webhook"), 0);
}

#[test]
fn test_lowercase_method_rejected_before_create() {
    let (api, client) = fake_api();
    let resource = ManualWebhookResource::new(client);
    let mut plan = plan();
    if let Value::Known(webhook_type) = &mut plan.webhook_type {
        if let Some(request) = webhook_type.http_request.as_mut() {
            request.method = "post".into();
        }
    }

    let diags = resource.create(&RequestContext::new(), &plan).unwrap_err();

    assert_eq!(
        diags.iter().next().unwrap().detail,
        "invalid value for 'type.http_request.method': 'post' must be written as 'POST'"
    );
    assert_eq!(api.calls("create_manual_webhook"), 0);
}
