pub mod endpoints;
pub mod openapi;

use anyhow::Context;
use std::{process::ExitCode, sync::Arc, time::Duration};
use utoipa::openapi::{Info, License};
use vocero_auth::{auth::AuthConfigArguments, authenticator::Authenticator, authorizer::Authorizer};
use vocero_common::{
    config::Database,
    db::{self, CreationMode},
};
use vocero_infrastructure::{
    app::http::{HttpServerBuilder, HttpServerConfig},
    endpoint::Vocero,
    health::{checks::Local, Check},
    Infrastructure, InfrastructureConfig, InitContext,
};
use vocero_module_platform::{PlatformClient, PlatformConfig};
use vocero_module_scrape::provider::{CrawlClient, CrawlConfig};

const SERVICE_ID: &str = "vocero-api";

/// Run the API server
#[derive(clap::Args, Debug)]
pub struct Run {
    #[arg(long, env)]
    pub devmode: bool,

    /// The database creation mode
    #[arg(long, env, value_enum, default_value_t = CreationMode::Default)]
    pub creation: CreationMode,

    // flattened commands must go last
    //
    #[command(flatten)]
    pub database: Database,

    #[command(flatten)]
    pub infra: InfrastructureConfig,

    #[command(flatten)]
    pub auth: AuthConfigArguments,

    #[command(flatten)]
    pub http: HttpServerConfig<Vocero>,

    #[command(flatten)]
    pub platform: PlatformConfig,

    #[command(flatten)]
    pub crawl: CrawlConfig,
}

struct InitData {
    db: db::Database,
    authenticator: Option<Arc<Authenticator>>,
    authorizer: Authorizer,
    platform: PlatformClient,
    crawl: CrawlClient,
    http: HttpServerConfig<Vocero>,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        // logging is only active once the infrastructure run method has been called
        Infrastructure::from(self.infra.clone())
            .run(
                SERVICE_ID,
                { |context| async move { InitData::new(context, self).await } },
                |context| async move { context.init_data.run().await },
            )
            .await?;

        Ok(ExitCode::SUCCESS)
    }
}

/// A common database check
fn spawn_db_check(db: db::Database) -> anyhow::Result<impl Check> {
    Local::spawn_periodic("no database connection", Duration::from_secs(1), {
        move || {
            let db = db.clone();
            async move {
                tokio::time::timeout(Duration::from_secs(5), async move {
                    db.ping().await.is_ok()
                })
                .await
                .unwrap_or(false)
            }
        }
    })
}

impl InitData {
    async fn new(context: InitContext, run: Run) -> anyhow::Result<Self> {
        let (authn, authz) = run
            .auth
            .split(run.devmode)?
            .map(|(authn, authz)| (Some(authn), Some(authz)))
            .unwrap_or((None, None));

        let authenticator = Authenticator::from_config(authn).await?.map(Arc::new);
        let authorizer = Authorizer::new(authz);

        if authenticator.is_none() {
            log::warn!("Authentication is disabled");
        }

        let db = match run.creation {
            CreationMode::Default => db::Database::new(&run.database).await?,
            CreationMode::Bootstrap => db::Database::bootstrap(&run.database).await?,
        };

        let check = spawn_db_check(db.clone())?;
        context.health.readiness.register("database", check).await;

        let platform = PlatformClient::new(&run.platform).context("configure voice platform")?;
        let crawl = CrawlClient::new(&run.crawl).context("configure crawl provider")?;

        Ok(InitData {
            db,
            authenticator,
            authorizer,
            platform,
            crawl,
            http: run.http,
        })
    }

    async fn run(self) -> anyhow::Result<()> {
        let db = self.db;
        let platform = self.platform;
        let crawl = self.crawl;
        let authenticator = self.authenticator;

        HttpServerBuilder::try_from(self.http)?
            .authorizer(self.authorizer)
            .metrics(prometheus::default_registry().clone(), "vocero_api")
            .openapi_info(openapi_info())
            .configure(move |svc| {
                endpoints::configure(
                    svc,
                    db.clone(),
                    platform.clone(),
                    crawl.clone(),
                    authenticator.clone(),
                );
            })
            .run()
            .await
    }
}

pub(crate) fn openapi_info() -> Info {
    let mut info = Info::new("Vocero", env!("CARGO_PKG_VERSION"));
    info.description = Some("The voice assistant backend".into());
    info.license = {
        let mut license = License::new("Apache License 2.0");
        license.identifier = Some("Apache-2.0".into());
        Some(license)
    };
    info
}
