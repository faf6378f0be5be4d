use crate::test::caller;
use actix_web::test::TestRequest;
use jsonpath_rust::JsonPath;
use serde_json::{json, Value};
use test_context::test_context;
use test_log::test;
use vocero_test_context::{call::CallService, VoceroContext};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn platform_assistant(tool_ids: Value) -> Value {
    json!({
        "id": "as-1",
        "name": "support",
        "firstMessage": "Hi",
        "model": {"provider": "openai", "model": "gpt-4o"},
        "voice": {"provider": "11labs", "voiceId": "nova"},
        "toolIds": tool_ids,
    })
}

#[test_context(VoceroContext)]
#[test(actix_web::test)]
async fn tool_is_attached_and_detached(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    let assistant = ctx.seed_assistant("anonymous", "support", "as-1").await?;

    Mock::given(method("POST"))
        .and(path("/tool"))
        .and(body_partial_json(
            json!({"type": "function", "function": {"name": "lookup_order"}}),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "tool-1",
            "type": "function",
            "function": {"name": "lookup_order", "description": "Look up an order"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assistant/as-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(platform_assistant(json!([]))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    // attaching must carry the new tool id
    Mock::given(method("PATCH"))
        .and(path("/assistant/as-1"))
        .and(body_partial_json(json!({"toolIds": ["tool-1"]})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(platform_assistant(json!(["tool-1"]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = caller(ctx, &server).await?;

    let request = TestRequest::post()
        .uri(&format!("/api/v1/assistant/{}/tool", assistant.id))
        .set_json(json!({
            "name": "lookup_order",
            "description": "Look up an order",
            "serverUrl": "https://hooks.example.com/orders",
        }))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(response.query("$.id").unwrap(), [&json!("tool-1")]);

    // detaching: the assistant is patched without the tool, then the tool is deleted

    server.reset().await;

    Mock::given(method("GET"))
        .and(path("/assistant/as-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(platform_assistant(json!(["tool-1"]))),
        )
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/assistant/as-1"))
        .and(body_partial_json(json!({"toolIds": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(platform_assistant(json!([]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tool/tool-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = TestRequest::delete()
        .uri(&format!("/api/v1/assistant/{}/tool/tool-1", assistant.id))
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);

    Ok(())
}
