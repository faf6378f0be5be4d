#[cfg(test)]
mod test;

use crate::{
    call::{model::StartCallRequest, service::CallService},
    Error,
};
use actix_web::{post, web, HttpResponse, Responder};
use utoipa::OpenApi;
use vocero_auth::{authenticator::user::UserInformation, authorizer::Require, StartCall, StopCall};
use vocero_module_platform::model::PlatformCall;

#[derive(OpenApi)]
#[openapi(
    paths(start, stop),
    components(schemas(StartCallRequest, PlatformCall)),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    context_path = "/api/v1/call",
    tag = "call",
    operation_id = "startCall",
    request_body = StartCallRequest,
    responses(
        (status = 201, description = "The call session", body = PlatformCall),
        (status = 404, description = "The assistant could not be found"),
        (status = 502, description = "The voice platform failed"),
    ),
)]
#[post("")]
/// Start a call session
pub(crate) async fn start(
    service: web::Data<CallService>,
    user: UserInformation,
    web::Json(request): web::Json<StartCallRequest>,
    _: Require<StartCall>,
) -> Result<impl Responder, Error> {
    let call = service.start(user.subject(), request).await?;
    Ok(HttpResponse::Created().json(call))
}

#[utoipa::path(
    context_path = "/api/v1/call",
    tag = "call",
    operation_id = "stopCall",
    params(
        ("call_id", Path, description = "Platform ID of the call session"),
    ),
    responses(
        (status = 200, description = "The stopped call session", body = PlatformCall),
        (status = 502, description = "The voice platform failed"),
    ),
)]
#[post("/{call_id}/stop")]
/// Stop a call session
pub(crate) async fn stop(
    service: web::Data<CallService>,
    call_id: web::Path<String>,
    _: Require<StopCall>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(service.stop(&call_id).await?))
}
