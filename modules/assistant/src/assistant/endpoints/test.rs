use crate::test::caller;
use actix_web::test::TestRequest;
use jsonpath_rust::JsonPath;
use serde_json::{json, Value};
use test_context::test_context;
use test_log::test;
use vocero_test_context::{call::CallService, VoceroContext};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn platform_assistant(id: &str) -> Value {
    json!({
        "id": id,
        "name": "support",
        "firstMessage": "Hi, how can I help?",
        "model": {"provider": "openai", "model": "gpt-4o"},
        "voice": {"provider": "11labs", "voiceId": "nova"},
    })
}

#[test_context(VoceroContext)]
#[test(actix_web::test)]
async fn assistant_round_trip(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/assistant"))
        .respond_with(ResponseTemplate::new(201).set_body_json(platform_assistant("as-1")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/assistant/as-1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let app = caller(ctx, &server).await?;

    // create

    let request = TestRequest::post()
        .uri("/api/v1/assistant")
        .set_json(json!({
            "name": "support",
            "welcomeMessage": "Hi, how can I help?",
            "systemPrompt": "You are a support agent.",
            "language": "en",
            "voiceId": "nova",
        }))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(
        response.query("$.platformAssistantId").unwrap(),
        [&json!("as-1")]
    );
    let id = response.query("$.id").unwrap()[0]
        .as_str()
        .unwrap()
        .to_string();

    // position and theme fall back to their defaults

    assert_eq!(
        response.query("$.position").unwrap(),
        [&json!("bottom-right")]
    );
    assert_eq!(response.query("$.theme").unwrap(), [&json!("light")]);

    // list and get

    let request = TestRequest::get().uri("/api/v1/assistant").to_request();
    let response: Value = app.call_and_read_body_json(request).await;
    assert_eq!(response.query("$.total").unwrap(), [&json!(1)]);

    let request = TestRequest::get()
        .uri(&format!("/api/v1/assistant/{id}"))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;
    assert_eq!(response.query("$.name").unwrap(), [&json!("support")]);

    // delete, idempotent

    let request = TestRequest::delete()
        .uri(&format!("/api/v1/assistant/{id}"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);

    let request = TestRequest::get()
        .uri(&format!("/api/v1/assistant/{id}"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);

    Ok(())
}

#[test_context(VoceroContext)]
#[test(actix_web::test)]
async fn platform_failure_maps_to_bad_gateway(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/assistant"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "out of capacity"})),
        )
        .mount(&server)
        .await;

    let app = caller(ctx, &server).await?;

    let request = TestRequest::post()
        .uri("/api/v1/assistant")
        .set_json(json!({
            "name": "support",
            "welcomeMessage": "Hi",
            "systemPrompt": "You are a support agent.",
            "language": "en",
            "voiceId": "nova",
        }))
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_GATEWAY);

    Ok(())
}
