use crate::app::TestApp;
use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    web::Bytes,
    App, Error,
};
use serde::de::DeserializeOwned;
use std::future::Future;
use utoipa_actix_web::AppExt;

/// A trait wrapping an `impl Service` in a way that we can pass it as a reference.
pub trait CallService {
    fn call_service(&self, s: Request) -> impl Future<Output = ServiceResponse>;
    fn call_and_read_body(&self, r: Request) -> impl Future<Output = Bytes>;
    fn call_and_read_body_json<T: DeserializeOwned>(&self, r: Request) -> impl Future<Output = T>;
}

impl<S, B> CallService for S
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody + 'static,
    B::Error: std::fmt::Debug,
{
    async fn call_service(&self, r: Request) -> ServiceResponse {
        actix_web::test::call_service(self, r)
            .await
            .map_into_boxed_body()
    }

    async fn call_and_read_body(&self, r: Request) -> Bytes {
        actix_web::test::call_and_read_body(self, r).await
    }

    async fn call_and_read_body_json<T: DeserializeOwned>(&self, r: Request) -> T {
        actix_web::test::call_and_read_body_json(self, r).await
    }
}

/// Create a caller for a set of configured services, with authorization stubbed out.
pub async fn caller<F>(configurator: F) -> anyhow::Result<impl CallService>
where
    F: FnOnce(&mut utoipa_actix_web::service_config::ServiceConfig),
{
    let (app, _openapi) = App::new()
        .into_utoipa_app()
        .add_test_authorizer()
        .configure(configurator)
        .split_for_parts();

    Ok(actix_web::test::init_service(app).await)
}
