use crate::{
    model::{ScrapeRequest, ScrapeSummary},
    provider::CrawlClient,
    service::ScrapeService,
    Error,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;
use vocero_auth::{
    authenticator::Authenticator, authorizer::Require, CreateScrape, ReadScrape,
};
use vocero_common::{
    db::Database,
    model::{Paginated, PaginatedResults},
};
use vocero_entity::scraped_website;
use vocero_infrastructure::app::new_auth;
use vocero_module_platform::PlatformClient;

/// mount the "scrape" module
pub fn configure(
    svc: &mut utoipa_actix_web::service_config::ServiceConfig,
    db: Database,
    provider: CrawlClient,
    platform: PlatformClient,
    auth: Option<Arc<Authenticator>>,
) {
    configure_with(svc, ScrapeService::new(db, provider, platform), auth);
}

pub fn configure_with(
    svc: &mut utoipa_actix_web::service_config::ServiceConfig,
    service: ScrapeService,
    auth: Option<Arc<Authenticator>>,
) {
    svc.app_data(web::Data::new(service)).service(
        utoipa_actix_web::scope("/api/v1/scrape")
            .map(|scope| scope.wrap(new_auth(auth)))
            .service(start)
            .service(all)
            .service(status),
    );
}

#[derive(OpenApi)]
#[openapi(
    paths(start, all, status),
    components(schemas(
        crate::model::ScrapeRequest,
        crate::model::ScrapeSummary,
        scraped_website::Status,
        PaginatedResults<ScrapeSummary>,
    )),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    context_path = "/api/v1/scrape",
    tag = "scrape",
    operation_id = "startScrape",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "The scrape finished", body = ScrapeSummary),
        (status = 400, description = "The URL was not acceptable"),
        (status = 404, description = "The assistant could not be found"),
        (status = 502, description = "The crawl provider or voice platform failed"),
        (status = 504, description = "The crawl did not finish within the polling budget"),
    ),
)]
#[post("")]
/// Scrape a website into an assistant's knowledge
async fn start(
    service: web::Data<ScrapeService>,
    user: vocero_auth::authenticator::user::UserInformation,
    web::Json(request): web::Json<ScrapeRequest>,
    _: Require<CreateScrape>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        service.start_scrape(user.subject(), request).await?,
    ))
}

#[utoipa::path(
    context_path = "/api/v1/scrape",
    tag = "scrape",
    operation_id = "listScrapes",
    params(
        Paginated,
    ),
    responses(
        (status = 200, description = "The caller's scrape records", body = PaginatedResults<ScrapeSummary>),
    ),
)]
#[get("")]
/// List scrape records
async fn all(
    service: web::Data<ScrapeService>,
    user: vocero_auth::authenticator::user::UserInformation,
    web::Query(paginated): web::Query<Paginated>,
    _: Require<ReadScrape>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(service.list(user.subject(), paginated).await?))
}

#[utoipa::path(
    context_path = "/api/v1/scrape",
    tag = "scrape",
    operation_id = "getScrapeStatus",
    params(
        ("id", Path, description = "Opaque ID of the scrape record"),
    ),
    responses(
        (status = 200, description = "The refreshed scrape record", body = ScrapeSummary),
        (status = 404, description = "The scrape record could not be found"),
    ),
)]
#[get("/{id}/status")]
/// Refresh a scrape record from the crawl provider
async fn status(
    service: web::Data<ScrapeService>,
    user: vocero_auth::authenticator::user::UserInformation,
    id: web::Path<Uuid>,
    _: Require<ReadScrape>,
) -> Result<impl Responder, Error> {
    let summary = service.refresh_status(user.subject(), *id).await?;
    Ok(HttpResponse::Ok().json(summary))
}
