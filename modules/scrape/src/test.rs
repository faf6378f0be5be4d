use crate::{
    endpoints::configure_with,
    provider::{CrawlClient, CrawlConfig},
    service::{PollPolicy, ScrapeService},
};
use actix_web::test::TestRequest;
use jsonpath_rust::JsonPath;
use serde_json::{json, Value};
use std::time::Duration;
use test_context::test_context;
use test_log::test;
use vocero_module_platform::{PlatformClient, PlatformConfig};
use vocero_test_context::{call, call::CallService, VoceroContext};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn caller(
    ctx: &VoceroContext,
    provider: &MockServer,
    platform: &MockServer,
) -> anyhow::Result<impl CallService> {
    let provider = CrawlClient::new(&CrawlConfig {
        url: provider.uri(),
        token: Some("crawl-token".into()),
        timeout: 5,
    })?;
    let platform = PlatformClient::new(&PlatformConfig {
        url: platform.uri(),
        token: Some("platform-token".into()),
        timeout: 5,
    })?;

    let service = ScrapeService::new(ctx.db.clone(), provider, platform).with_poll(PollPolicy {
        interval: Duration::from_millis(10),
        attempts: 3,
    });

    call::caller(|svc| configure_with(svc, service, None)).await
}

#[test_context(VoceroContext)]
#[test(actix_web::test)]
async fn scrape_endpoint_round_trip(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let provider = MockServer::start().await;
    let platform = MockServer::start().await;

    let assistant = ctx.seed_assistant("anonymous", "support", "as-1").await?;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobId": "job-1"})))
        .mount(&provider)
        .await;
    Mock::given(method("GET"))
        .and(path("/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "pages": [{"url": "https://example.com", "title": "Example", "text": "Hello"}],
        })))
        .mount(&provider)
        .await;
    Mock::given(method("POST"))
        .and(path("/file"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": "file-1", "name": "support-website.txt"})),
        )
        .mount(&platform)
        .await;
    Mock::given(method("GET"))
        .and(path("/assistant/as-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "as-1",
            "name": "support",
            "firstMessage": "Hi",
            "model": {"provider": "openai", "model": "gpt-4o"},
            "voice": {"provider": "11labs", "voiceId": "nova"},
        })))
        .mount(&platform)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/assistant/as-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "as-1",
            "name": "support",
            "firstMessage": "Hi",
            "model": {"provider": "openai", "model": "gpt-4o"},
            "voice": {"provider": "11labs", "voiceId": "nova"},
        })))
        .mount(&platform)
        .await;

    let app = caller(ctx, &provider, &platform).await?;

    // start the scrape, driving it to completion within the request

    let request = TestRequest::post()
        .uri("/api/v1/scrape")
        .set_json(json!({
            "assistantId": assistant.id,
            "url": "https://example.com",
        }))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(response.query("$.status").unwrap(), [&json!("completed")]);
    assert_eq!(response.query("$.pageCount").unwrap(), [&json!(1)]);

    // the record must show up in the listing

    let request = TestRequest::get().uri("/api/v1/scrape").to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(response.query("$.total").unwrap(), [&json!(1)]);
    assert_eq!(
        response.query("$.items[0].url").unwrap(),
        [&json!("https://example.com")]
    );

    // and its status endpoint must report the terminal state

    let id = response.query("$.items[0].id").unwrap()[0]
        .as_str()
        .unwrap()
        .to_string();
    let request = TestRequest::get()
        .uri(&format!("/api/v1/scrape/{id}/status"))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(response.query("$.status").unwrap(), [&json!("completed")]);

    Ok(())
}

#[test_context(VoceroContext)]
#[test(actix_web::test)]
async fn invalid_url_is_a_bad_request(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let provider = MockServer::start().await;
    let platform = MockServer::start().await;

    let assistant = ctx.seed_assistant("anonymous", "support", "as-1").await?;
    let app = caller(ctx, &provider, &platform).await?;

    let request = TestRequest::post()
        .uri("/api/v1/scrape")
        .set_json(json!({
            "assistantId": assistant.id,
            "url": "not a url",
        }))
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    Ok(())
}
