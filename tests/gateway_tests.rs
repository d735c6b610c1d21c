//! Gateway tests: the real reqwest repository against a stub server
//!
//! Covers the wire shapes the gateway expects and every envelope depth it answers with.

use rstest::rstest;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use music_client_tests::stub_gateway::{
    proxy_envelope, LOGIN_PATH, PROFILE_PATH, QUERY_PATH, REGISTER_PATH, SUBSCRIPTION_PATH,
};
use music_client_tests::test_utils::{random_email, random_token};
use music_client_tests::{StubGateway, TestClient};
use shared::config::GatewayEndpoints;
use shared::models::auth::requests::{LoginRequest, RegisterRequest};
use shared::models::music::{QueryFilters, RemoveSubscriptionRequest, SubscribeRequest};
use shared::models::session::SessionContext;
use shared::repositories::errors::gateway_errors::GatewayError;
use shared::repositories::music_api_repository::{HttpMusicApiRepository, MusicApiRepository};

fn ctx(token: &str) -> SessionContext {
    SessionContext {
        token: token.to_string(),
    }
}

#[tokio::test]
async fn test_login_sends_json_credentials_without_token_header() {
    let gateway = StubGateway::start().await;
    let email = random_email();
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .and(body_json(json!({ "email": email, "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let client = TestClient::new(&gateway.uri());
    let response = client
        .api
        .login(&LoginRequest {
            email: email.clone(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.body.success);
    let requests = gateway.received("POST", LOGIN_PATH).await;
    assert!(requests[0].headers.get("X-Session-Token").is_none());
}

#[tokio::test]
async fn test_register_sends_user_name_field() {
    let gateway = StubGateway::start().await;
    Mock::given(method("POST"))
        .and(path(REGISTER_PATH))
        .and(body_json(json!({
            "email": "new@example.com",
            "user_name": "newbie",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let client = TestClient::new(&gateway.uri());
    let response = client
        .api
        .register(&RegisterRequest {
            email: "new@example.com".to_string(),
            user_name: "newbie".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    assert!(response.is_created());
    assert!(!response.body.success);
}

#[rstest]
#[case::plain(json!({ "success": true, "user_name": "Listener" }))]
#[case::string(Value::String(json!({ "success": true, "user_name": "Listener" }).to_string()))]
#[case::proxy(proxy_envelope(200, &json!({ "success": true, "user_name": "Listener" })))]
#[case::proxy_as_string(Value::String(
    proxy_envelope(200, &json!({ "success": true, "user_name": "Listener" })).to_string()
))]
#[tokio::test]
async fn test_profile_decodes_every_envelope_depth(#[case] payload: Value) {
    let gateway = StubGateway::start().await;
    let token = random_token();
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(header("X-Session-Token", token.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let client = TestClient::new(&gateway.uri());
    let response = client.api.profile(&ctx(&token)).await.unwrap();

    assert!(response.body.success);
    assert_eq!(response.body.user_name.as_deref(), Some("Listener"));
}

#[tokio::test]
async fn test_query_sends_all_four_filters_even_when_empty() {
    let gateway = StubGateway::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(header("X-Session-Token", "tok"))
        .and(body_json(json!({
            "title": "",
            "year": "1989",
            "artist": "",
            "album": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": [
                { "title": "Style", "artist": "Taylor Swift", "year": "1989", "album": "1989",
                  "img_url": "https://img.example.com/TaylorSwift.jpg" }
            ]
        })))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let client = TestClient::new(&gateway.uri());
    let filters = QueryFilters {
        year: "1989".to_string(),
        ..QueryFilters::default()
    };
    let response = client.api.query(&ctx("tok"), &filters).await.unwrap();

    let results = response.body.results.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Style");
    assert_eq!(
        results[0].img_url.as_deref(),
        Some("https://img.example.com/TaylorSwift.jpg")
    );
}

#[tokio::test]
async fn test_subscription_endpoint_methods_and_bodies() {
    let gateway = StubGateway::start().await;
    Mock::given(method("GET"))
        .and(path(SUBSCRIPTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&gateway.server)
        .await;
    Mock::given(method("POST"))
        .and(path(SUBSCRIPTION_PATH))
        .and(body_json(json!({ "title": "Rock &amp; Roll", "year": "1971" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "uuid": "u-9" })))
        .expect(1)
        .mount(&gateway.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(SUBSCRIPTION_PATH))
        .and(body_json(json!({ "uuid": "u-9" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let client = TestClient::new(&gateway.uri());
    let ctx = ctx("tok");

    let listed = client.api.list_subscriptions(&ctx).await.unwrap();
    assert!(listed.body.subscriptions.is_none());

    let subscribed = client
        .api
        .subscribe(
            &ctx,
            &SubscribeRequest {
                title: "Rock &amp; Roll".to_string(),
                year: "1971".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(subscribed.body.uuid.as_deref(), Some("u-9"));

    let removed = client
        .api
        .remove_subscription(
            &ctx,
            &RemoveSubscriptionRequest {
                uuid: "u-9".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(removed.is_success());

    for request in gateway.server.received_requests().await.unwrap() {
        assert_eq!(
            request.headers.get("X-Session-Token").unwrap().to_str().unwrap(),
            "tok"
        );
    }
}

#[tokio::test]
async fn test_client_error_body_is_still_decoded() {
    let gateway = StubGateway::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Wrong password"
        })))
        .mount(&gateway.server)
        .await;

    let client = TestClient::new(&gateway.uri());
    let response = client
        .api
        .login(&LoginRequest {
            email: random_email(),
            password: "bad".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    assert_eq!(response.body.message.as_deref(), Some("Wrong password"));
}

#[tokio::test]
async fn test_server_error_maps_to_gateway_error() {
    let gateway = StubGateway::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&gateway.server)
        .await;

    let client = TestClient::new(&gateway.uri());
    let result = client.api.profile(&ctx("tok")).await;

    match result {
        Err(GatewayError::Server { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected server error, got {:?}", other.map(|r| r.status)),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let gateway = StubGateway::start().await;
    Mock::given(method("POST"))
        .and(path(REGISTER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&gateway.server)
        .await;

    let client = TestClient::new(&gateway.uri());
    let result = client
        .api
        .register(&RegisterRequest {
            email: random_email(),
            user_name: "u".to_string(),
            password: "p".to_string(),
        })
        .await;

    assert!(matches!(result, Err(GatewayError::Decode(_))));
}

#[tokio::test]
async fn test_slow_gateway_times_out_as_transport_error() {
    let gateway = StubGateway::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&gateway.server)
        .await;

    let api = HttpMusicApiRepository::new(
        GatewayEndpoints::with_base_url(&gateway.uri()),
        Duration::from_millis(50),
    )
    .unwrap();
    let result = api.profile(&ctx("tok")).await;

    assert!(matches!(result, Err(GatewayError::Transport(_))));
}

#[tokio::test]
async fn test_unreachable_gateway_is_a_transport_error() {
    let api = HttpMusicApiRepository::new(
        GatewayEndpoints::with_base_url("http://127.0.0.1:9"),
        Duration::from_secs(2),
    )
    .unwrap();

    let result = api.list_subscriptions(&ctx("tok")).await;
    assert!(matches!(result, Err(GatewayError::Transport(_))));
}
