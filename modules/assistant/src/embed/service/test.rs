use super::*;
use test_context::test_context;
use test_log::test;
use vocero_test_context::VoceroContext;

#[test_context(VoceroContext)]
#[test(tokio::test)]
async fn embed_config_resolves_active_mappings_only(
    ctx: &VoceroContext,
) -> Result<(), anyhow::Error> {
    let assistant = ctx.seed_assistant("user-a", "support", "as-1").await?;
    let service = EmbedService::new(ctx.db.clone());

    let embed = service
        .create(
            "user-a",
            EmbedRequest {
                assistant_id: assistant.id,
            },
        )
        .await?;
    assert!(embed.active);

    // the widget can resolve the configuration anonymously

    let config = service
        .config(&embed.embed_id)
        .await?
        .expect("must resolve");
    assert_eq!(config.platform_assistant_id, "as-1");
    assert_eq!(config.name, "support");

    // a disabled embed stops resolving

    let updated = service
        .update(
            "user-a",
            embed.id,
            EmbedUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await?;
    assert!(!updated.active);
    assert!(service.config(&embed.embed_id).await?.is_none());

    // unknown ids never resolve

    assert!(service.config("no-such-embed").await?.is_none());

    Ok(())
}

#[test_context(VoceroContext)]
#[test(tokio::test)]
async fn embeds_are_scoped_by_user(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let assistant = ctx.seed_assistant("user-a", "support", "as-1").await?;
    let service = EmbedService::new(ctx.db.clone());

    let err = service
        .create(
            "user-b",
            EmbedRequest {
                assistant_id: assistant.id,
            },
        )
        .await
        .expect_err("foreign assistants must not be embeddable");
    assert!(matches!(err, Error::NotFound));

    let embed = service
        .create(
            "user-a",
            EmbedRequest {
                assistant_id: assistant.id,
            },
        )
        .await?;

    assert!(!service.delete("user-b", embed.id).await?);
    assert!(service.delete("user-a", embed.id).await?);

    let listed = service.list("user-a", Paginated::default()).await?;
    assert_eq!(listed.total, 0);

    Ok(())
}

#[test_context(VoceroContext)]
#[test(tokio::test)]
async fn repointing_an_embed_checks_ownership(ctx: &VoceroContext) -> Result<(), anyhow::Error> {
    let ours = ctx.seed_assistant("user-a", "support", "as-1").await?;
    let theirs = ctx.seed_assistant("user-b", "sales", "as-2").await?;
    let service = EmbedService::new(ctx.db.clone());

    let embed = service
        .create(
            "user-a",
            EmbedRequest {
                assistant_id: ours.id,
            },
        )
        .await?;

    let err = service
        .update(
            "user-a",
            embed.id,
            EmbedUpdate {
                assistant_id: Some(theirs.id),
                ..Default::default()
            },
        )
        .await
        .expect_err("must not point at a foreign assistant");
    assert!(matches!(err, Error::NotFound));

    Ok(())
}
