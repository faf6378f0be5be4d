use crate::{
    embed::{
        model::{EmbedConfig, EmbedRequest, EmbedSummary, EmbedUpdate},
        service::EmbedService,
    },
    Error,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use utoipa::OpenApi;
use uuid::Uuid;
use vocero_auth::{
    authenticator::user::UserInformation, authorizer::Require, CreateEmbed, DeleteEmbed, ReadEmbed,
    UpdateEmbed,
};
use vocero_common::model::{Paginated, PaginatedResults};

#[derive(OpenApi)]
#[openapi(
    paths(create, all, update, delete, config),
    components(schemas(
        EmbedRequest,
        EmbedUpdate,
        EmbedSummary,
        EmbedConfig,
        PaginatedResults<EmbedSummary>,
    )),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    context_path = "/api/v1/embed",
    tag = "embed",
    operation_id = "createEmbed",
    request_body = EmbedRequest,
    responses(
        (status = 201, description = "Created the embed mapping", body = EmbedSummary),
        (status = 404, description = "The assistant could not be found"),
    ),
)]
#[post("")]
/// Create an embed mapping
pub(crate) async fn create(
    service: web::Data<EmbedService>,
    user: UserInformation,
    web::Json(request): web::Json<EmbedRequest>,
    _: Require<CreateEmbed>,
) -> Result<impl Responder, Error> {
    let created = service.create(user.subject(), request).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    context_path = "/api/v1/embed",
    tag = "embed",
    operation_id = "listEmbeds",
    params(
        Paginated,
    ),
    responses(
        (status = 200, description = "The caller's embed mappings", body = PaginatedResults<EmbedSummary>),
    ),
)]
#[get("")]
/// List embed mappings
pub(crate) async fn all(
    service: web::Data<EmbedService>,
    user: UserInformation,
    web::Query(paginated): web::Query<Paginated>,
    _: Require<ReadEmbed>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(service.list(user.subject(), paginated).await?))
}

#[utoipa::path(
    context_path = "/api/v1/embed",
    tag = "embed",
    operation_id = "updateEmbed",
    request_body = EmbedUpdate,
    params(
        ("id", Path, description = "Opaque ID of the embed mapping"),
    ),
    responses(
        (status = 200, description = "Updated the embed mapping", body = EmbedSummary),
        (status = 404, description = "The embed mapping could not be found"),
    ),
)]
#[put("/{id}")]
/// Update an embed mapping
pub(crate) async fn update(
    service: web::Data<EmbedService>,
    user: UserInformation,
    id: web::Path<Uuid>,
    web::Json(update): web::Json<EmbedUpdate>,
    _: Require<UpdateEmbed>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(service.update(user.subject(), *id, update).await?))
}

#[utoipa::path(
    context_path = "/api/v1/embed",
    tag = "embed",
    operation_id = "deleteEmbed",
    params(
        ("id", Path, description = "Opaque ID of the embed mapping"),
    ),
    responses(
        (status = 204, description = "The embed mapping is gone"),
    ),
)]
#[delete("/{id}")]
/// Delete an embed mapping
pub(crate) async fn delete(
    service: web::Data<EmbedService>,
    user: UserInformation,
    id: web::Path<Uuid>,
    _: Require<DeleteEmbed>,
) -> Result<impl Responder, Error> {
    service.delete(user.subject(), *id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    context_path = "/api/v1/widget",
    tag = "embed",
    operation_id = "getEmbedConfig",
    params(
        ("embed_id", Path, description = "Public embed ID"),
    ),
    responses(
        (status = 200, description = "The widget configuration", body = EmbedConfig),
        (status = 404, description = "The embed is unknown or inactive"),
    ),
)]
#[get("/{embed_id}/config")]
/// Fetch the widget configuration for an embed
///
/// This endpoint is public, the widget calls it without credentials.
pub(crate) async fn config(
    service: web::Data<EmbedService>,
    embed_id: web::Path<String>,
) -> Result<impl Responder, Error> {
    match service.config(&embed_id).await? {
        Some(config) => Ok(HttpResponse::Ok().json(config)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}
