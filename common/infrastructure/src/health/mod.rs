pub mod checks;

use futures::future::BoxFuture;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use tokio::sync::RwLock;

/// A single health check.
pub trait Check: Send + Sync + 'static {
    type Error: Display;

    fn run(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

trait DynCheck: Send + Sync {
    fn run(&self) -> BoxFuture<'_, Result<(), String>>;
}

impl<C: Check> DynCheck for C {
    fn run(&self) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async { Check::run(self).await.map_err(|err| err.to_string()) })
    }
}

/// A named set of health checks.
#[derive(Default)]
pub struct Checks {
    checks: RwLock<BTreeMap<String, Box<dyn DynCheck>>>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CheckResults {
    /// The outcome per check, `null` meaning "up"
    pub results: BTreeMap<String, Option<String>>,
}

impl CheckResults {
    pub fn all_up(&self) -> bool {
        self.results.values().all(Option::is_none)
    }
}

impl Checks {
    pub async fn register(&self, name: impl Into<String>, check: impl Check) {
        self.checks
            .write()
            .await
            .insert(name.into(), Box::new(check));
    }

    pub async fn run(&self) -> CheckResults {
        let checks = self.checks.read().await;

        let mut results = BTreeMap::new();
        for (name, check) in checks.iter() {
            results.insert(name.clone(), check.run().await.err());
        }

        CheckResults { results }
    }
}

/// The checks of the three health endpoints.
#[derive(Default)]
pub struct HealthChecks {
    pub startup: Checks,
    pub liveness: Checks,
    pub readiness: Checks,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::health::checks::Probe;

    #[tokio::test]
    async fn empty_is_up() {
        let checks = Checks::default();
        assert!(checks.run().await.all_up());
    }

    #[tokio::test]
    async fn probe_toggles() {
        let (probe, check) = Probe::new("not ready yet");

        let checks = Checks::default();
        checks.register("probe", check).await;

        let results = checks.run().await;
        assert!(!results.all_up());
        assert_eq!(
            results.results.get("probe"),
            Some(&Some("not ready yet".to_string()))
        );

        probe.set(true);
        assert!(checks.run().await.all_up());
    }
}
