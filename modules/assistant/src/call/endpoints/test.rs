use crate::test::caller;
use actix_web::test::TestRequest;
use jsonpath_rust::JsonPath;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde_json::{json, Value};
use test_context::test_context;
use test_log::test;
use vocero_entity::assistant;
use vocero_test_context::{call::CallService, VoceroContext};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test_context(VoceroContext)]
#[test(actix_web::test)]
async fn call_round_trip(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    let assistant = ctx.seed_assistant("anonymous", "support", "as-1").await?;

    Mock::given(method("POST"))
        .and(path("/call"))
        .and(body_partial_json(json!({"assistantId": "as-1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "call-1",
            "status": "queued",
            "webCallUrl": "https://call.example.com/call-1",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/call/call-1/stop"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "call-1", "status": "ended"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = caller(ctx, &server).await?;

    let request = TestRequest::post()
        .uri("/api/v1/call")
        .set_json(json!({"assistantId": assistant.id}))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(response.query("$.id").unwrap(), [&json!("call-1")]);
    assert_eq!(
        response.query("$.webCallUrl").unwrap(),
        [&json!("https://call.example.com/call-1")]
    );

    let request = TestRequest::post()
        .uri("/api/v1/call/call-1/stop")
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(response.query("$.status").unwrap(), [&json!("ended")]);

    Ok(())
}

#[test_context(VoceroContext)]
#[test(actix_web::test)]
async fn inactive_assistants_do_not_take_calls(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    let seeded = ctx.seed_assistant("anonymous", "support", "as-1").await?;
    assistant::ActiveModel {
        id: sea_orm::ActiveValue::Unchanged(seeded.id),
        active: Set(false),
        ..Default::default()
    }
    .update(&ctx.db)
    .await?;

    let app = caller(ctx, &server).await?;

    let request = TestRequest::post()
        .uri("/api/v1/call")
        .set_json(json!({"assistantId": seeded.id}))
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    Ok(())
}
