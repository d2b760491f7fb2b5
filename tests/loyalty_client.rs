//! Integration tests for the loyalty API client.
//!
//! These tests use wiremock to mock HTTP responses and verify that the
//! aggregate client makes correct requests end to end.

use std::time::Duration;

use loyalty_api::error::StatusError;
use loyalty_api::middleware::{BoxFuture, Middleware};
use loyalty_api::models::{AccountCreate, BalanceAdjustment, CouponListParams};
use loyalty_api::{ApiError, LoyaltyApi, RequestConfig};
use reqwest::header::HeaderValue;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn account_body(id: &str, balance: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "owner_name": "Alice",
        "email": "alice@example.com",
        "balance": balance,
        "points": 120,
        "tier": "gold",
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-02-01T00:00:00Z"
    })
}

async fn api_for(mock_server: &MockServer) -> LoyaltyApi {
    LoyaltyApi::new(Url::parse(&mock_server.uri()).unwrap()).unwrap()
}

/// Reading an account issues a bodiless GET to the id-substituted path.
#[tokio::test]
async fn test_accounts_read_path_and_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/42/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_body("42", 17.5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server).await;
    let account = api.accounts.read("42").await.unwrap().data;
    assert_eq!(account.id, "42");
    assert_eq!(account.balance, 17.5);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty(), "GET must not carry a body");
}

/// A 404 surfaces as a status error carrying the backend detail, not as a
/// transport failure.
#[tokio::test]
async fn test_accounts_read_missing_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/42/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "detail": "Not found." })),
        )
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server).await;
    let err = api.accounts.read("42").await.unwrap_err();
    match err {
        ApiError::Status(StatusError { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

/// The balance adjustment body is validated before the network call; an
/// invalid amount never produces a request.
#[tokio::test]
async fn test_update_balance_validates_before_posting() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/7/update-balance/"))
        .and(body_json(serde_json::json!({ "amount": 5.0, "reason": "refund" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_body("7", 22.5)))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server).await;

    let invalid = BalanceAdjustment {
        amount: f64::NAN,
        reason: None,
    };
    let err = api.accounts.update_balance("7", &invalid).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());

    let valid = BalanceAdjustment {
        amount: 5.0,
        reason: Some("refund".to_string()),
    };
    let account = api.accounts.update_balance("7", &valid).await.unwrap().data;
    assert_eq!(account.balance, 22.5);
}

/// Create bodies that fail validation also never reach the wire.
#[tokio::test]
async fn test_create_validates_before_posting() {
    let mock_server = MockServer::start().await;
    let api = api_for(&mock_server).await;

    let body = AccountCreate {
        owner_name: "Alice".to_string(),
        email: "not-an-email".to_string(),
        initial_balance: Some(10.0),
    };
    let err = api.accounts.create(&body).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

struct Tag(&'static str);

impl Middleware for Tag {
    fn name(&self) -> &'static str {
        self.0
    }

    fn on_request<'a>(
        &'a self,
        mut config: RequestConfig,
    ) -> BoxFuture<'a, Result<RequestConfig, ApiError>> {
        Box::pin(async move {
            let trace = config
                .headers()
                .get("x-trace")
                .and_then(|v| v.to_str().ok())
                .map(|v| format!("{v},{}", self.0))
                .unwrap_or_else(|| self.0.to_string());
            config
                .headers_mut()
                .insert("x-trace", HeaderValue::from_str(&trace).unwrap());
            Ok(config)
        })
    }
}

/// Global middleware runs before the per-resource stage; the header trail
/// shows the order.
#[tokio::test]
async fn test_middleware_defaults_run_before_client_stages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_body("1", 0.0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = LoyaltyApi::builder(Url::parse(&mock_server.uri()).unwrap())
        .with_middleware(Tag("global"))
        .build()
        .unwrap();
    api.accounts.read("1").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let trace = requests[0].headers.get("x-trace").unwrap();
    assert_eq!(trace, "global");
    // The per-resource context stage ran after the global stage
    assert_eq!(requests[0].headers.get("x-api-context").unwrap(), "accounts");
}

/// Repeating a GET against a stable mock yields the same answer; the call
/// has no client-side state.
#[tokio::test]
async fn test_get_is_idempotent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/42/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_body("42", 9.0)))
        .expect(3)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server).await;
    for _ in 0..3 {
        let account = api.accounts.read("42").await.unwrap().data;
        assert_eq!(account.balance, 9.0);
    }
}

/// A response slower than the configured timeout aborts with a timeout
/// error.
#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/42/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(account_body("42", 1.0))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let api = LoyaltyApi::builder(Url::parse(&mock_server.uri()).unwrap())
        .timeout(Duration::from_millis(10))
        .build()
        .unwrap();
    let err = api.accounts.read("42").await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "got {err:?}");
}

/// List filters land as query parameters; list-valued filters repeat the
/// key.
#[tokio::test]
async fn test_coupon_list_query_encoding() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coupons/"))
        .and(query_param("redeemable_only", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 0,
            "next": null,
            "previous": null,
            "results": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server).await;
    let params = CouponListParams {
        redeemable_only: Some(true),
        codes: vec!["A".to_string(), "B".to_string()],
        ..Default::default()
    };
    let page = api.coupons.list(&params).await.unwrap().data;
    assert_eq!(page.count, 0);

    let requests = mock_server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert!(query.contains("code=A") && query.contains("code=B"));
}

/// Deleting answers 204 with no body.
#[tokio::test]
async fn test_delete_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/branches/br_1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server).await;
    let response = api.branches.delete("br_1").await.unwrap();
    assert_eq!(response.status, 204);
}

/// Notification bulk action posts without a body and decodes the receipt.
#[tokio::test]
async fn test_mark_all_read() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/notifications/mark-all-read/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "marked": 4 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server).await;
    let receipt = api.notifications.mark_all_read().await.unwrap().data;
    assert_eq!(receipt.marked, 4);
}

/// License verification treats an invalid key as data, not an error.
#[tokio::test]
async fn test_license_verify_invalid_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/licenses/verify/"))
        .and(body_json(serde_json::json!({ "key": "LIC-0000" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "valid": false,
            "reason": "revoked"
        })))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server).await;
    let verification = api
        .licenses
        .verify(&loyalty_api::models::LicenseVerifyRequest {
            key: "LIC-0000".to_string(),
        })
        .await
        .unwrap()
        .data;
    assert!(!verification.valid);
    assert_eq!(verification.reason.as_deref(), Some("revoked"));
}

/// Bearer auth from the builder reaches the wire on every resource.
#[tokio::test]
async fn test_bearer_token_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/campaigns/c_1/"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "c_1",
            "name": "Double Points",
            "status": "active",
            "starts_at": "2026-01-01T00:00:00Z",
            "reward_points": 10
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = LoyaltyApi::builder(Url::parse(&mock_server.uri()).unwrap())
        .bearer_token("t0ken")
        .build()
        .unwrap();
    let campaign = api.campaigns.read("c_1").await.unwrap().data;
    assert_eq!(campaign.reward_points, 10);
}
