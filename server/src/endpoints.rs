use actix_web::{get, web};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_actix_web::service_config::ServiceConfig;
use vocero_auth::authenticator::Authenticator;
use vocero_common::db::Database;
use vocero_module_platform::PlatformClient;
use vocero_module_scrape::provider::CrawlClient;

/// mount all API endpoints
pub fn configure(
    svc: &mut ServiceConfig,
    db: Database,
    platform: PlatformClient,
    crawl: CrawlClient,
    auth: Option<Arc<Authenticator>>,
) {
    vocero_module_assistant::endpoints::configure(svc, db.clone(), platform.clone(), auth.clone());
    vocero_module_scrape::endpoints::configure(svc, db, crawl, platform, auth);

    svc.service(utoipa_actix_web::scope("/.well-known/vocero").service(info));
}

#[derive(OpenApi)]
#[openapi(paths(info), tags())]
pub struct ApiDoc;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, utoipa::ToSchema)]
struct Info {
    name: &'static str,
    version: &'static str,
}

#[utoipa::path(
    context_path = "/.well-known/vocero",
    tag = "info",
    responses(
        (status = 200, description = "Get information", body = inline(Info)),
    ),
)]
#[get("")]
/// Get service information
async fn info() -> web::Json<Info> {
    web::Json(Info {
        name: "vocero",
        version: env!("CARGO_PKG_VERSION"),
    })
}
