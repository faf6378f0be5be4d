use crate::test::caller;
use actix_web::test::TestRequest;
use jsonpath_rust::JsonPath;
use serde_json::{json, Value};
use test_context::test_context;
use test_log::test;
use vocero_test_context::{call::CallService, VoceroContext};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn platform_assistant(file_ids: Value) -> Value {
    json!({
        "id": "as-1",
        "name": "support",
        "firstMessage": "Hi",
        "model": {"provider": "openai", "model": "gpt-4o"},
        "voice": {"provider": "11labs", "voiceId": "nova"},
        "fileIds": file_ids,
    })
}

#[test_context(VoceroContext)]
#[test(actix_web::test)]
async fn file_round_trip(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    let assistant = ctx.seed_assistant("anonymous", "support", "as-1").await?;

    Mock::given(method("POST"))
        .and(path("/file"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "file-1",
            "name": "faq.txt",
            "bytes": 14,
            "status": "processed",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/assistant/as-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(platform_assistant(json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/assistant/as-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(platform_assistant(json!(["file-1"]))),
        )
        .mount(&server)
        .await;

    let app = caller(ctx, &server).await?;

    // upload

    let request = TestRequest::post()
        .uri(&format!(
            "/api/v1/assistant/{}/file?fileName=faq.txt&contentType=text/plain",
            assistant.id
        ))
        .set_payload("q: how?\na: yes")
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(
        response.query("$.platformFileId").unwrap(),
        [&json!("file-1")]
    );
    assert_eq!(response.query("$.size").unwrap(), [&json!(14)]);
    assert_eq!(response.query("$.processed").unwrap(), [&json!(true)]);
    let id = response.query("$.id").unwrap()[0]
        .as_str()
        .unwrap()
        .to_string();

    // list

    let request = TestRequest::get()
        .uri(&format!("/api/v1/assistant/{}/file", assistant.id))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(response.query("$.total").unwrap(), [&json!(1)]);
    assert_eq!(
        response.query("$.items[0].fileName").unwrap(),
        [&json!("faq.txt")]
    );

    // delete

    Mock::given(method("DELETE"))
        .and(path("/file/file-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = TestRequest::delete()
        .uri(&format!("/api/v1/file/{id}"))
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);

    let request = TestRequest::get()
        .uri(&format!("/api/v1/assistant/{}/file", assistant.id))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;
    assert_eq!(response.query("$.total").unwrap(), [&json!(0)]);

    Ok(())
}

#[test_context(VoceroContext)]
#[test(actix_web::test)]
async fn empty_uploads_are_rejected(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    let assistant = ctx.seed_assistant("anonymous", "support", "as-1").await?;
    let app = caller(ctx, &server).await?;

    let request = TestRequest::post()
        .uri(&format!(
            "/api/v1/assistant/{}/file?fileName=faq.txt",
            assistant.id
        ))
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    Ok(())
}
