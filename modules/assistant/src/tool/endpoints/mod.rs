#[cfg(test)]
mod test;

use crate::{
    tool::{
        model::{ToolRequest, ToolSummary},
        service::ToolService,
    },
    Error,
};
use actix_web::{delete, post, web, HttpResponse, Responder};
use utoipa::OpenApi;
use uuid::Uuid;
use vocero_auth::{authenticator::user::UserInformation, authorizer::Require, UpdateAssistant};

#[derive(OpenApi)]
#[openapi(
    paths(create, delete),
    components(schemas(ToolRequest, ToolSummary)),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    context_path = "/api/v1/assistant",
    tag = "tool",
    operation_id = "createTool",
    request_body = ToolRequest,
    params(
        ("id", Path, description = "Opaque ID of the assistant"),
    ),
    responses(
        (status = 201, description = "Created the tool", body = ToolSummary),
        (status = 404, description = "The assistant could not be found"),
        (status = 502, description = "The voice platform failed"),
    ),
)]
#[post("/{id}/tool")]
/// Create a tool for an assistant
pub(crate) async fn create(
    service: web::Data<ToolService>,
    user: UserInformation,
    id: web::Path<Uuid>,
    web::Json(request): web::Json<ToolRequest>,
    _: Require<UpdateAssistant>,
) -> Result<impl Responder, Error> {
    let created = service.create(user.subject(), *id, request).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    context_path = "/api/v1/assistant",
    tag = "tool",
    operation_id = "deleteTool",
    params(
        ("id", Path, description = "Opaque ID of the assistant"),
        ("tool_id", Path, description = "Platform ID of the tool"),
    ),
    responses(
        (status = 204, description = "The tool is gone"),
        (status = 404, description = "The assistant could not be found"),
    ),
)]
#[delete("/{id}/tool/{tool_id}")]
/// Delete a tool of an assistant
pub(crate) async fn delete(
    service: web::Data<ToolService>,
    user: UserInformation,
    path: web::Path<(Uuid, String)>,
    _: Require<UpdateAssistant>,
) -> Result<impl Responder, Error> {
    let (id, tool_id) = path.into_inner();
    service.delete(user.subject(), id, &tool_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
