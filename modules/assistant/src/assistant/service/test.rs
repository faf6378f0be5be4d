use super::*;
use crate::test::platform_client;
use serde_json::json;
use test_context::test_context;
use test_log::test;
use vocero_test_context::VoceroContext;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> AssistantRequest {
    AssistantRequest {
        name: "support".into(),
        welcome_message: "Hi, how can I help?".into(),
        system_prompt: "You are a support agent.".into(),
        language: "en".into(),
        voice_id: "nova".into(),
        position: "bottom-right".into(),
        theme: "light".into(),
        active: true,
    }
}

fn platform_assistant(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "support",
        "firstMessage": "Hi, how can I help?",
        "model": {"provider": "openai", "model": "gpt-4o"},
        "voice": {"provider": "11labs", "voiceId": "nova"},
    })
}

#[test_context(VoceroContext)]
#[test(tokio::test)]
async fn create_records_the_platform_id(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/assistant"))
        .and(body_partial_json(json!({
            "name": "support",
            "model": {"messages": [{"role": "system", "content": "You are a support agent."}]},
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(platform_assistant("as-1")))
        .expect(1)
        .mount(&server)
        .await;

    let service = AssistantService::new(ctx.db.clone(), platform_client(&server)?);

    let created = service.create("user-a", request()).await?;
    assert_eq!(created.platform_assistant_id, "as-1");
    assert!(created.active);

    // and it shows up in the listing, scoped to the owner

    let listed = service.list("user-a", Paginated::default()).await?;
    assert_eq!(listed.total, 1);

    let listed = service.list("user-b", Paginated::default()).await?;
    assert_eq!(listed.total, 0);

    Ok(())
}

#[test_context(VoceroContext)]
#[test(tokio::test)]
async fn update_carries_over_platform_attachments(
    ctx: &VoceroContext,
) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    let assistant = ctx.seed_assistant("user-a", "support", "as-1").await?;

    Mock::given(method("GET"))
        .and(path("/assistant/as-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "as-1",
            "name": "support",
            "firstMessage": "Hi",
            "model": {"provider": "openai", "model": "gpt-4o"},
            "voice": {"provider": "11labs", "voiceId": "nova"},
            "toolIds": ["tool-1"],
            "fileIds": ["file-1"],
        })))
        .mount(&server)
        .await;

    // files and tools attached on the platform must survive the update
    Mock::given(method("PATCH"))
        .and(path("/assistant/as-1"))
        .and(body_partial_json(json!({
            "toolIds": ["tool-1"],
            "fileIds": ["file-1"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(platform_assistant("as-1")))
        .expect(1)
        .mount(&server)
        .await;

    let service = AssistantService::new(ctx.db.clone(), platform_client(&server)?);

    let updated = service
        .update(
            "user-a",
            assistant.id,
            AssistantRequest {
                name: "sales".into(),
                ..request()
            },
        )
        .await?;

    assert_eq!(updated.name, "sales");

    Ok(())
}

#[test_context(VoceroContext)]
#[test(tokio::test)]
async fn delete_removes_platform_assistant_first(
    ctx: &VoceroContext,
) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    let assistant = ctx.seed_assistant("user-a", "support", "as-1").await?;

    Mock::given(method("DELETE"))
        .and(path("/assistant/as-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let service = AssistantService::new(ctx.db.clone(), platform_client(&server)?);

    assert!(service.delete("user-a", assistant.id).await?);
    assert!(service.get("user-a", assistant.id).await?.is_none());

    // deleting again is a no-op
    assert!(!service.delete("user-a", assistant.id).await?);

    Ok(())
}

#[test_context(VoceroContext)]
#[test(tokio::test)]
async fn foreign_assistants_are_invisible(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;

    let assistant = ctx.seed_assistant("user-a", "support", "as-1").await?;
    let service = AssistantService::new(ctx.db.clone(), platform_client(&server)?);

    assert!(service.get("user-b", assistant.id).await?.is_none());
    assert!(matches!(
        service.update("user-b", assistant.id, request()).await,
        Err(Error::NotFound)
    ));
    assert!(!service.delete("user-b", assistant.id).await?);

    Ok(())
}

#[test_context(VoceroContext)]
#[test(tokio::test)]
async fn empty_name_is_rejected(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;
    let service = AssistantService::new(ctx.db.clone(), platform_client(&server)?);

    let err = service
        .create(
            "user-a",
            AssistantRequest {
                name: "  ".into(),
                ..request()
            },
        )
        .await
        .expect_err("must be rejected");
    assert!(matches!(err, Error::BadRequest(_)));

    Ok(())
}
