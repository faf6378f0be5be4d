use super::*;
use crate::model::{ModelMessage, VoiceDefinition};
use serde_json::json;
use test_log::test;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> PlatformConfig {
    PlatformConfig {
        url: server.uri(),
        token: Some("platform-token".into()),
        timeout: 5,
    }
}

fn definition() -> AssistantDefinition {
    AssistantDefinition {
        name: "support".into(),
        first_message: "Hi, how can I help?".into(),
        model: crate::model::ModelDefinition {
            messages: vec![ModelMessage::system("You are a support agent.")],
            ..Default::default()
        },
        voice: VoiceDefinition {
            provider: "11labs".into(),
            voice_id: "nova".into(),
        },
        ..Default::default()
    }
}

#[test(tokio::test)]
async fn create_assistant() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/assistant"))
        .and(header("authorization", "Bearer platform-token"))
        .and(body_partial_json(json!({"name": "support"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "as-1",
            "name": "support",
            "firstMessage": "Hi, how can I help?",
            "model": {"provider": "openai", "model": "gpt-4o"},
            "voice": {"provider": "11labs", "voiceId": "nova"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PlatformClient::new(&config(&server))?;
    let assistant = client.create_assistant(&definition()).await?;

    assert_eq!(assistant.id, "as-1");
    assert_eq!(assistant.definition.name, "support");

    Ok(())
}

#[test(tokio::test)]
async fn upstream_error_carries_message() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/assistant"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "voice not available"})),
        )
        .mount(&server)
        .await;

    let client = PlatformClient::new(&config(&server))?;
    let err = client
        .create_assistant(&definition())
        .await
        .expect_err("must fail");

    match err {
        Error::Upstream { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "voice not available");
        }
        _ => panic!("unexpected error: {err}"),
    }

    Ok(())
}

#[test(tokio::test)]
async fn delete_missing_assistant_is_ok() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/assistant/as-gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = PlatformClient::new(&config(&server))?;
    client.delete_assistant("as-gone").await?;

    Ok(())
}

#[test(tokio::test)]
async fn upload_file() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/file"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "file-1",
            "name": "notes.txt",
            "bytes": 11,
            "status": "processed",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PlatformClient::new(&config(&server))?;
    let file = client
        .upload_file("notes.txt", "text/plain", b"hello world".to_vec())
        .await?;

    assert_eq!(file.id, "file-1");
    assert!(file.is_processed());

    Ok(())
}

#[test(tokio::test)]
async fn call_round_trip() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/call"))
        .and(body_partial_json(json!({"assistantId": "as-1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "call-1",
            "status": "queued",
            "webCallUrl": "https://call.example.com/call-1",
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/call/call-1/stop"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "call-1", "status": "ended"})),
        )
        .mount(&server)
        .await;

    let client = PlatformClient::new(&config(&server))?;

    let call = client
        .start_call(&CallRequest {
            assistant_id: "as-1".into(),
            metadata: None,
        })
        .await?;
    assert_eq!(call.status, "queued");
    assert_eq!(
        call.web_call_url.as_deref(),
        Some("https://call.example.com/call-1")
    );

    let call = client.stop_call(&call.id).await?;
    assert_eq!(call.status, "ended");

    Ok(())
}
