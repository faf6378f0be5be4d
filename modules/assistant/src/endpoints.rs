use crate::{
    assistant::{self, service::AssistantService},
    call::{self, service::CallService},
    embed::{self, service::EmbedService},
    file::{self, service::FileService},
    tool::{self, service::ToolService},
};
use actix_web::web;
use std::sync::Arc;
use vocero_auth::authenticator::Authenticator;
use vocero_common::db::Database;
use vocero_infrastructure::app::new_auth;
use vocero_module_platform::PlatformClient;

/// mount the assistant, file, tool, call and embed modules
pub fn configure(
    svc: &mut utoipa_actix_web::service_config::ServiceConfig,
    db: Database,
    platform: PlatformClient,
    auth: Option<Arc<Authenticator>>,
) {
    svc.app_data(web::Data::new(AssistantService::new(
        db.clone(),
        platform.clone(),
    )))
    .app_data(web::Data::new(FileService::new(db.clone(), platform.clone())))
    .app_data(web::Data::new(ToolService::new(db.clone(), platform.clone())))
    .app_data(web::Data::new(CallService::new(db.clone(), platform)))
    .app_data(web::Data::new(EmbedService::new(db)))
    .service(
        utoipa_actix_web::scope("/api/v1/assistant")
            .map(|scope| scope.wrap(new_auth(auth.clone())))
            .service(assistant::endpoints::create)
            .service(assistant::endpoints::all)
            .service(assistant::endpoints::get)
            .service(assistant::endpoints::update)
            .service(assistant::endpoints::delete)
            .service(file::endpoints::upload)
            .service(file::endpoints::all)
            .service(tool::endpoints::create)
            .service(tool::endpoints::delete),
    )
    .service(
        utoipa_actix_web::scope("/api/v1/file")
            .map(|scope| scope.wrap(new_auth(auth.clone())))
            .service(file::endpoints::delete),
    )
    .service(
        utoipa_actix_web::scope("/api/v1/call")
            .map(|scope| scope.wrap(new_auth(auth.clone())))
            .service(call::endpoints::start)
            .service(call::endpoints::stop),
    )
    .service(
        utoipa_actix_web::scope("/api/v1/embed")
            .map(|scope| scope.wrap(new_auth(auth)))
            .service(embed::endpoints::create)
            .service(embed::endpoints::all)
            .service(embed::endpoints::update)
            .service(embed::endpoints::delete),
    )
    // the widget configuration is looked up anonymously
    .service(utoipa_actix_web::scope("/api/v1/widget").service(embed::endpoints::config));
}
