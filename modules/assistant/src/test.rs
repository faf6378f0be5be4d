use crate::endpoints::configure;
use vocero_module_platform::{PlatformClient, PlatformConfig};
use vocero_test_context::{call, call::CallService, VoceroContext};
use wiremock::MockServer;

/// Build a caller for all endpoints of this module, with the platform mocked out.
pub async fn caller(
    ctx: &VoceroContext,
    platform: &MockServer,
) -> anyhow::Result<impl CallService> {
    let platform = platform_client(platform)?;
    call::caller(|svc| configure(svc, ctx.db.clone(), platform, None)).await
}

pub fn platform_client(server: &MockServer) -> anyhow::Result<PlatformClient> {
    PlatformClient::new(&PlatformConfig {
        url: server.uri(),
        token: Some("platform-token".into()),
        timeout: 5,
    })
}
