use crate::app::{new_app, AppOptions};
use crate::endpoint::Endpoint;
use actix_cors::Cors;
use actix_web::dev::{ServiceFactory, ServiceRequest};
use actix_web::{
    web::{self, JsonConfig},
    App, HttpServer,
};
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use anyhow::{anyhow, Context};
use bytesize::ByteSize;
use clap::{value_parser, Arg, ArgMatches, Args, Command, Error, FromArgMatches};
use prometheus::Registry;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::net::{IpAddr, Ipv6Addr, SocketAddr, TcpListener};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::openapi::Info;
use utoipa_actix_web::AppExt;
use utoipa_rapidoc::RapiDoc;
use vocero_auth::{authenticator::Authenticator, authorizer::Authorizer};
use vocero_common::model::BinaryByteSize;

const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 8080);

#[derive(Clone, Debug)]
pub struct BindPort<E: Endpoint> {
    /// The port to listen on
    pub bind_port: u16,

    _marker: Marker<E>,
}

impl<E: Endpoint> Deref for BindPort<E> {
    type Target = u16;

    fn deref(&self) -> &Self::Target {
        &self.bind_port
    }
}

impl<E: Endpoint> Default for BindPort<E> {
    fn default() -> Self {
        Self {
            bind_port: E::PORT,
            _marker: Default::default(),
        }
    }
}

impl<E: Endpoint> Args for BindPort<E> {
    fn augment_args(cmd: Command) -> Command {
        Self::augment_args_for_update(cmd)
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        cmd.arg(
            Arg::new("http-server-bind-port")
                .short('p')
                .long("http-server-bind-port")
                .help("The port to listen on")
                .value_parser(value_parser!(u16))
                .default_value(E::PORT.to_string()),
        )
    }
}

impl<E: Endpoint> FromArgMatches for BindPort<E> {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, Error> {
        Ok(Self {
            bind_port: matches
                .get_one::<u16>("http-server-bind-port")
                .cloned()
                .unwrap_or(E::port()),
            _marker: Default::default(),
        })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), Error> {
        if let Some(port) = matches.get_one::<u16>("http-server-bind-port") {
            self.bind_port = *port;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[command(
    rename_all_env = "SCREAMING_SNAKE_CASE",
    next_help_heading = "HTTP endpoint"
)]
#[group(id = "http")]
pub struct HttpServerConfig<E>
where
    E: Endpoint + Send + Sync,
{
    /// The number of worker threads, defaults to zero, which falls back to the number of cores.
    #[arg(
        id = "http-server-workers",
        long,
        env = "HTTP_SERVER_WORKERS",
        default_value_t = 0
    )]
    pub workers: usize,

    /// The address to listen on
    #[arg(
        id = "http-server-bind-address",
        long,
        env = "HTTP_SERVER_BIND_ADDR",
        default_value_t = default::bind_addr(),
    )]
    pub bind_addr: String,

    // This is required due to: https://github.com/clap-rs/clap/issues/5127
    #[command(flatten)]
    pub bind_port: BindPort<E>,

    /// The overall request limit
    #[arg(
        id = "http-server-request-limit",
        long,
        env = "HTTP_SERVER_REQUEST_LIMIT",
        default_value_t = default::request_limit(),
    )]
    pub request_limit: BinaryByteSize,

    /// The JSON request limit
    #[arg(
        id = "http-server-json-limit",
        long,
        env = "HTTP_SERVER_JSON_LIMIT",
        default_value_t = default::json_limit(),
    )]
    pub json_limit: BinaryByteSize,

    #[arg(skip)]
    _marker: Marker<E>,
}

mod default {
    use super::*;

    pub fn bind_addr() -> String {
        "::1".to_string()
    }

    pub const fn request_limit() -> BinaryByteSize {
        BinaryByteSize(ByteSize::mib(10))
    }

    pub const fn json_limit() -> BinaryByteSize {
        BinaryByteSize(ByteSize::mib(2))
    }
}

impl<E: Endpoint> Default for HttpServerConfig<E>
where
    E: Endpoint + Send + Sync,
{
    fn default() -> Self {
        Self {
            workers: 0,
            bind_addr: default::bind_addr(),
            bind_port: BindPort::<E>::default(),
            request_limit: default::request_limit(),
            json_limit: default::json_limit(),
            _marker: Default::default(),
        }
    }
}

#[derive(Debug)]
struct Marker<E>(PhantomData<E>);

impl<E> Default for Marker<E> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<E> Clone for Marker<E> {
    fn clone(&self) -> Self {
        Default::default()
    }
}

impl<E> TryFrom<HttpServerConfig<E>> for HttpServerBuilder
where
    E: Endpoint + Send + Sync,
{
    type Error = anyhow::Error;

    fn try_from(value: HttpServerConfig<E>) -> Result<Self, Self::Error> {
        let addr = SocketAddr::new(
            IpAddr::from_str(&value.bind_addr).context("parse bind address")?,
            value.bind_port.bind_port,
        );

        Ok(HttpServerBuilder::new()
            .workers(value.workers)
            .bind(addr)
            .request_limit(value.request_limit.0 .0 as _)
            .json_limit(value.json_limit.0 .0 as _))
    }
}

pub type ConfiguratorFn =
    dyn Fn(&mut utoipa_actix_web::service_config::ServiceConfig) + Send + Sync;

pub struct HttpServerBuilder {
    configurator: Option<Arc<ConfiguratorFn>>,

    bind: Bind,

    metrics_factory: Option<Arc<dyn Fn() -> anyhow::Result<PrometheusMetrics> + Send + Sync>>,
    cors_factory: Option<Arc<dyn Fn() -> Cors + Send + Sync>>,
    authenticator: Option<Arc<Authenticator>>,
    authorizer: Option<Authorizer>,

    workers: usize,
    json_limit: Option<usize>,
    request_limit: Option<usize>,

    openapi_info: Option<Info>,
}

pub enum Bind {
    /// Use the provided listener
    Listener(TcpListener),
    /// Bind to the provided address and port
    Address(SocketAddr),
}

impl Default for HttpServerBuilder {
    fn default() -> Self {
        HttpServerBuilder::new()
    }
}

impl HttpServerBuilder {
    pub fn new() -> Self {
        Self {
            configurator: None,
            bind: Bind::Address(DEFAULT_ADDR),
            metrics_factory: None,
            cors_factory: Some(Arc::new(Cors::permissive)),
            authenticator: None,
            authorizer: None,
            workers: 0,
            json_limit: None,
            request_limit: None,
            openapi_info: None,
        }
    }

    /// Set a custom CORS factory.
    ///
    /// The default is [`Cors::permissive`].
    pub fn cors<F>(mut self, cors_factory: F) -> Self
    where
        F: Fn() -> Cors + Send + Sync + 'static,
    {
        self.cors_factory = Some(Arc::new(cors_factory));
        self
    }

    pub fn cors_disabled(mut self) -> Self {
        self.cors_factory = None;
        self
    }

    pub fn default_authenticator(mut self, authenticator: Option<Arc<Authenticator>>) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn authorizer(mut self, authorizer: Authorizer) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    pub fn openapi_info(mut self, openapi_info: Info) -> Self {
        self.openapi_info = Some(openapi_info);
        self
    }

    pub fn configure<F>(mut self, configurator: F) -> Self
    where
        F: Fn(&mut utoipa_actix_web::service_config::ServiceConfig) + Send + Sync + 'static,
    {
        self.configurator = Some(Arc::new(configurator));
        self
    }

    pub fn metrics(mut self, registry: impl Into<Registry>, namespace: impl AsRef<str>) -> Self {
        let metrics = PrometheusMetricsBuilder::new(namespace.as_ref())
            .registry(registry.into())
            .endpoint("/metrics")
            .build();

        self.metrics_factory = Some(Arc::new(move || {
            metrics.as_ref().cloned().map_err(|err| anyhow!("{err}"))
        }));

        self
    }

    pub fn listen(mut self, listener: TcpListener) -> Self {
        self.bind = Bind::Listener(listener);
        self
    }

    pub fn bind(mut self, addr: impl Into<SocketAddr>) -> Self {
        self.bind = Bind::Address(addr.into());
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn json_limit(mut self, json_limit: usize) -> Self {
        self.json_limit = Some(json_limit);
        self
    }

    pub fn request_limit(mut self, request_limit: usize) -> Self {
        self.request_limit = Some(request_limit);
        self
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let metrics = self
            .metrics_factory
            .as_ref()
            .map(|factory| factory())
            .transpose()?;

        if let Some(limit) = self.request_limit {
            log::info!("Payload limit: {}", BinaryByteSize::from(limit));
        }
        if let Some(limit) = self.json_limit {
            log::info!("JSON limit: {}", BinaryByteSize::from(limit));
        }

        let mut http = HttpServer::new(move || {
            let cors = self.cors_factory.as_ref().map(|factory| factory());

            let mut json = JsonConfig::default();
            if let Some(limit) = self.json_limit {
                json = json.limit(limit);
            }

            let mut app = new_app(AppOptions {
                cors,
                metrics: metrics.clone(),
                authenticator: self.authenticator.clone(),
                authorizer: self
                    .authorizer
                    .clone()
                    .unwrap_or_else(|| Authorizer::new(None)),
                logger: Some(actix_web::middleware::Logger::default()),
            })
            .app_data(json)
            .into_utoipa_app();

            // configure payload limit

            if let Some(limit) = self.request_limit {
                app = app.app_data(web::PayloadConfig::new(limit));
            }

            // configure application

            let app = app.configure(|svc| {
                if let Some(config) = &self.configurator {
                    config(svc);
                }
            });

            app.apply_openapi(self.openapi_info.clone())
        });

        if self.workers > 0 {
            log::info!("Using {} worker(s)", self.workers);
            http = http.workers(self.workers);
        }

        match self.bind {
            Bind::Listener(listener) => {
                log::info!("Binding to provided listener: {listener:?}");
                http = http.listen(listener).context("listen")?;
            }
            Bind::Address(addr) => {
                log::info!("Binding to: {addr}");
                http = http.bind(addr).context("bind")?;
            }
        }

        Ok(http.run().await?)
    }
}

pub trait ApplyOpenApi<T> {
    /// Turn a [`utoipa_actix_web::UtoipaApp`] into an [`App`] by applying the API spec
    fn apply_openapi(self, openapi_info: Option<Info>) -> App<T>;
}

impl<T> ApplyOpenApi<T> for utoipa_actix_web::UtoipaApp<T>
where
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
{
    fn apply_openapi(self, openapi_info: Option<Info>) -> App<T> {
        let (app, mut openapi) = self.split_for_parts();
        if let Some(info) = openapi_info {
            openapi.info = info;
        }

        // register the OpenAPI UI

        app.service(RapiDoc::with_openapi("/openapi.json", openapi).path("/openapi/"))
            .service(web::redirect("/openapi", "/openapi/"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug)]
    pub struct MockEndpoint;

    impl Endpoint for MockEndpoint {
        const PORT: u16 = 1234;
        const PATH: &'static str = "";
    }

    #[test]
    fn default_config_converts() {
        HttpServerBuilder::try_from(HttpServerConfig::<MockEndpoint>::default()).unwrap();
    }
}
