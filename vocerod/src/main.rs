use clap::Parser;
use postgresql_embedded::PostgreSQL;
use std::env;
use std::process::{ExitCode, Termination};
use tokio::task::JoinSet;
use vocero_common::config::DbStrategy;
use vocero_common::db::CreationMode;

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "vocerod",
    long_about = None
)]
pub struct Vocerod {
    #[command(flatten)]
    run: vocero_server::Run,
}

impl Vocerod {
    async fn run(self) -> ExitCode {
        match self.run_command().await {
            Ok(code) => code,
            Err(err) => {
                log::error!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        log::error!("Caused by:");
                    }
                    log::error!("\t{err}");
                }

                ExitCode::FAILURE
            }
        }
    }

    async fn run_command(mut self) -> anyhow::Result<ExitCode> {
        // to keep in scope while running.
        let mut managed_db = None;

        if matches!(self.run.database.db_strategy, DbStrategy::Managed) {
            println!("setting up managed DB");
            use postgresql_embedded::Settings;

            let current_dir = env::current_dir()?;
            let work_dir = current_dir.join(".vocero");
            let db_dir = work_dir.join("postgres");
            let settings = Settings {
                username: self.run.database.username.clone(),
                password: self.run.database.password.clone(),
                temporary: false,
                installation_dir: db_dir.clone(),
                ..Default::default()
            };

            let mut postgresql = PostgreSQL::new(settings);
            postgresql.setup().await?;
            postgresql.start().await?;

            let port = postgresql.settings().port;
            self.run.database.port = port;
            self.run.creation = CreationMode::Bootstrap;

            managed_db.replace(postgresql);

            println!("postgresql installed under {:?}", db_dir);
            println!("running on port {}", port);
        }

        let mut handles = JoinSet::new();
        handles.spawn_local(self.run.run());

        while let Some(result) = handles.join_next().await {
            match result {
                Ok(result) => match result {
                    Ok(_) => {}
                    Err(err) => {
                        log::error!("error {:?}", err);
                    }
                },
                Err(err) => {
                    log::error!("fundamental error {:?}", err);
                }
            }
        }

        drop(managed_db);

        Ok(ExitCode::SUCCESS)
    }
}

#[actix_web::main]
async fn main() -> impl Termination {
    Vocerod::parse().run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Vocerod::command().debug_assert();
    }
}
