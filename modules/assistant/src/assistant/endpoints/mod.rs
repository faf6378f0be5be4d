#[cfg(test)]
mod test;

use crate::{
    assistant::{
        model::{AssistantRequest, AssistantSummary},
        service::AssistantService,
    },
    Error,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use utoipa::OpenApi;
use uuid::Uuid;
use vocero_auth::{
    authenticator::user::UserInformation, authorizer::Require, CreateAssistant, DeleteAssistant,
    ReadAssistant, UpdateAssistant,
};
use vocero_common::model::{Paginated, PaginatedResults};

#[derive(OpenApi)]
#[openapi(
    paths(create, all, get, update, delete),
    components(schemas(
        AssistantRequest,
        AssistantSummary,
        PaginatedResults<AssistantSummary>,
    )),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    context_path = "/api/v1/assistant",
    tag = "assistant",
    operation_id = "createAssistant",
    request_body = AssistantRequest,
    responses(
        (status = 201, description = "Created the assistant", body = AssistantSummary),
        (status = 400, description = "The request was not acceptable"),
        (status = 502, description = "The voice platform failed"),
    ),
)]
#[post("")]
/// Create a new assistant
pub(crate) async fn create(
    service: web::Data<AssistantService>,
    user: UserInformation,
    web::Json(request): web::Json<AssistantRequest>,
    _: Require<CreateAssistant>,
) -> Result<impl Responder, Error> {
    let created = service.create(user.subject(), request).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    context_path = "/api/v1/assistant",
    tag = "assistant",
    operation_id = "listAssistants",
    params(
        Paginated,
    ),
    responses(
        (status = 200, description = "The caller's assistants", body = PaginatedResults<AssistantSummary>),
    ),
)]
#[get("")]
/// List assistants
pub(crate) async fn all(
    service: web::Data<AssistantService>,
    user: UserInformation,
    web::Query(paginated): web::Query<Paginated>,
    _: Require<ReadAssistant>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(service.list(user.subject(), paginated).await?))
}

#[utoipa::path(
    context_path = "/api/v1/assistant",
    tag = "assistant",
    operation_id = "getAssistant",
    params(
        ("id", Path, description = "Opaque ID of the assistant"),
    ),
    responses(
        (status = 200, description = "The assistant", body = AssistantSummary),
        (status = 404, description = "The assistant could not be found"),
    ),
)]
#[get("/{id}")]
/// Retrieve an assistant
pub(crate) async fn get(
    service: web::Data<AssistantService>,
    user: UserInformation,
    id: web::Path<Uuid>,
    _: Require<ReadAssistant>,
) -> Result<impl Responder, Error> {
    match service.get(user.subject(), *id).await? {
        Some(assistant) => Ok(HttpResponse::Ok().json(assistant)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

#[utoipa::path(
    context_path = "/api/v1/assistant",
    tag = "assistant",
    operation_id = "updateAssistant",
    request_body = AssistantRequest,
    params(
        ("id", Path, description = "Opaque ID of the assistant"),
    ),
    responses(
        (status = 200, description = "Updated the assistant", body = AssistantSummary),
        (status = 404, description = "The assistant could not be found"),
        (status = 502, description = "The voice platform failed"),
    ),
)]
#[put("/{id}")]
/// Update an existing assistant
pub(crate) async fn update(
    service: web::Data<AssistantService>,
    user: UserInformation,
    id: web::Path<Uuid>,
    web::Json(request): web::Json<AssistantRequest>,
    _: Require<UpdateAssistant>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        service.update(user.subject(), *id, request).await?,
    ))
}

#[utoipa::path(
    context_path = "/api/v1/assistant",
    tag = "assistant",
    operation_id = "deleteAssistant",
    params(
        ("id", Path, description = "Opaque ID of the assistant"),
    ),
    responses(
        (status = 204, description = "The assistant is gone"),
    ),
)]
#[delete("/{id}")]
/// Delete an assistant
pub(crate) async fn delete(
    service: web::Data<AssistantService>,
    user: UserInformation,
    id: web::Path<Uuid>,
    _: Require<DeleteAssistant>,
) -> Result<impl Responder, Error> {
    service.delete(user.subject(), *id).await?;
    Ok(HttpResponse::NoContent().finish())
}
