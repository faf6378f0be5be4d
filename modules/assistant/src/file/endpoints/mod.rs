#[cfg(test)]
mod test;

use crate::{
    file::{
        model::{FileSummary, UploadQuery},
        service::FileService,
    },
    Error,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use utoipa::OpenApi;
use uuid::Uuid;
use vocero_auth::{
    authenticator::user::UserInformation, authorizer::Require, CreateFile, DeleteFile, ReadFile,
};
use vocero_common::model::{Paginated, PaginatedResults};

#[derive(OpenApi)]
#[openapi(
    paths(upload, all, delete),
    components(schemas(FileSummary, PaginatedResults<FileSummary>)),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    context_path = "/api/v1/assistant",
    tag = "file",
    operation_id = "uploadFile",
    request_body = Vec<u8>,
    params(
        ("id", Path, description = "Opaque ID of the assistant"),
        UploadQuery,
    ),
    responses(
        (status = 201, description = "Uploaded the file", body = FileSummary),
        (status = 400, description = "The upload was not acceptable"),
        (status = 404, description = "The assistant could not be found"),
        (status = 502, description = "The voice platform failed"),
    ),
)]
#[post("/{id}/file")]
/// Upload a knowledge file for an assistant
pub(crate) async fn upload(
    service: web::Data<FileService>,
    user: UserInformation,
    id: web::Path<Uuid>,
    web::Query(query): web::Query<UploadQuery>,
    content: web::Bytes,
    _: Require<CreateFile>,
) -> Result<impl Responder, Error> {
    let content_type = query
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let uploaded = service
        .upload(
            user.subject(),
            *id,
            &query.file_name,
            &content_type,
            content.to_vec(),
        )
        .await?;

    Ok(HttpResponse::Created().json(uploaded))
}

#[utoipa::path(
    context_path = "/api/v1/assistant",
    tag = "file",
    operation_id = "listFiles",
    params(
        ("id", Path, description = "Opaque ID of the assistant"),
        Paginated,
    ),
    responses(
        (status = 200, description = "The assistant's files", body = PaginatedResults<FileSummary>),
        (status = 404, description = "The assistant could not be found"),
    ),
)]
#[get("/{id}/file")]
/// List the knowledge files of an assistant
pub(crate) async fn all(
    service: web::Data<FileService>,
    user: UserInformation,
    id: web::Path<Uuid>,
    web::Query(paginated): web::Query<Paginated>,
    _: Require<ReadFile>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        service.list(user.subject(), *id, paginated).await?,
    ))
}

#[utoipa::path(
    context_path = "/api/v1/file",
    tag = "file",
    operation_id = "deleteFile",
    params(
        ("id", Path, description = "Opaque ID of the file"),
    ),
    responses(
        (status = 204, description = "The file is gone"),
    ),
)]
#[delete("/{id}")]
/// Delete a knowledge file
pub(crate) async fn delete(
    service: web::Data<FileService>,
    user: UserInformation,
    id: web::Path<Uuid>,
    _: Require<DeleteFile>,
) -> Result<impl Responder, Error> {
    service.delete(user.subject(), *id).await?;
    Ok(HttpResponse::NoContent().finish())
}
