//! Server side token validation

#[cfg(feature = "actix")]
pub mod actix;
pub mod config;
pub mod error;
pub mod user;

use crate::{
    authenticator::{
        config::{AuthenticatorClientConfig, AuthenticatorConfig},
        error::AuthenticationError,
        user::UserDetails,
    },
    Permission,
};
use anyhow::Context;
use biscuit::{jws::Compact, Empty, SingleOrMultiple};
use futures::future::try_join_all;
use openid::{Claims, Client, CompactJson, Discovered, StandardClaims, Userinfo};
use std::collections::{HashMap, HashSet};
use tracing::instrument;
use url::Url;

/// An access token, decoded into the extended claims
pub type AccessToken = Compact<AccessTokenClaims, Empty>;

/// The claims of an access token: the standard OIDC set, plus whatever else the issuer adds
/// (most importantly the `scope` claim).
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct AccessTokenClaims {
    #[serde(flatten)]
    pub claims: StandardClaims,
    #[serde(flatten)]
    pub extended: serde_json::Value,
}

impl AccessTokenClaims {
    /// The space-delimited scopes granted to the token.
    pub fn scope(&self) -> &str {
        self.extended
            .get("scope")
            .and_then(|scope| scope.as_str())
            .unwrap_or_default()
    }
}

impl CompactJson for AccessTokenClaims {}

impl Claims for AccessTokenClaims {
    fn iss(&self) -> &Url {
        self.claims.iss()
    }

    fn sub(&self) -> &str {
        self.claims.sub()
    }

    fn aud(&self) -> &SingleOrMultiple<String> {
        self.claims.aud()
    }

    fn exp(&self) -> i64 {
        self.claims.exp()
    }

    fn iat(&self) -> i64 {
        self.claims.iat()
    }

    fn auth_time(&self) -> Option<i64> {
        self.claims.auth_time()
    }

    fn nonce(&self) -> Option<&String> {
        self.claims.nonce()
    }

    fn at_hash(&self) -> Option<&String> {
        self.claims.at_hash()
    }

    fn c_hash(&self) -> Option<&String> {
        self.claims.c_hash()
    }

    fn userinfo(&self) -> &Userinfo {
        self.claims.userinfo()
    }

    fn acr(&self) -> Option<&String> {
        self.claims.acr()
    }

    fn amr(&self) -> Option<&Vec<String>> {
        self.claims.amr()
    }

    fn azp(&self) -> Option<&String> {
        self.claims.azp()
    }
}

/// A single client we accept tokens from.
pub struct AuthenticatorClient {
    client: Client<Discovered, AccessTokenClaims>,
    audience: Option<String>,
    scope_mappings: HashMap<String, Vec<String>>,
}

impl AuthenticatorClient {
    pub async fn new(
        config: AuthenticatorClientConfig,
        client: reqwest::Client,
    ) -> anyhow::Result<Self> {
        let issuer = Url::parse(&config.issuer_url)
            .with_context(|| format!("failed to parse issuer URL: {}", config.issuer_url))?;

        let client = Client::discover_with_client(client, config.client_id, None, None, issuer)
            .await
            .context("failed to discover OIDC client")?;

        Ok(Self {
            client,
            audience: config.required_audience,
            scope_mappings: config.scope_mappings,
        })
    }

    /// Validate a token against this client, returning the resulting user details.
    pub fn validate_token(&self, token: &mut AccessToken) -> Result<UserDetails, AuthenticationError> {
        self.client.decode_token(token).map_err(|err| {
            log::debug!("failed to decode token: {err}");
            AuthenticationError::Failed
        })?;

        self.client
            .validate_token(token, None, None)
            .map_err(|err| {
                log::debug!("failed to validate token: {err}");
                AuthenticationError::Failed
            })?;

        let claims = token.payload().map_err(|err| {
            log::debug!("failed to access token payload: {err}");
            AuthenticationError::Failed
        })?;

        self.validate_audience(claims)?;

        Ok(UserDetails {
            id: claims.sub().to_string(),
            permissions: self.permissions_from_scope(claims.scope()),
        })
    }

    fn validate_audience(&self, claims: &AccessTokenClaims) -> Result<(), AuthenticationError> {
        let Some(audience) = &self.audience else {
            return Ok(());
        };

        if claims.aud().contains(audience) {
            Ok(())
        } else {
            log::debug!("token does not carry the required audience: {audience}");
            Err(AuthenticationError::Failed)
        }
    }

    /// Turn the scopes of the token into permissions, using the configured mappings.
    ///
    /// Scopes without a mapping, and mapped entries which are not actual permissions, are
    /// silently ignored.
    fn permissions_from_scope(&self, scope: &str) -> HashSet<Permission> {
        scope
            .split(' ')
            .filter(|scope| !scope.is_empty())
            .flat_map(|scope| self.scope_mappings.get(scope).into_iter().flatten())
            .filter_map(|permission| match Permission::try_from(permission.clone()) {
                Ok(permission) => Some(permission),
                Err(_) => {
                    log::debug!("scope mapping to unknown permission: {permission}");
                    None
                }
            })
            .collect()
    }
}

/// An authenticator, validating incoming tokens against a set of accepted clients.
pub struct Authenticator {
    pub clients: Vec<AuthenticatorClient>,
}

impl Authenticator {
    pub async fn from_config(config: Option<AuthenticatorConfig>) -> anyhow::Result<Option<Self>> {
        let Some(config) = config else {
            return Ok(None);
        };

        Ok(Some(Self::from_configs(config.clients).await?))
    }

    pub async fn from_configs(
        configs: impl IntoIterator<Item = AuthenticatorClientConfig>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::new();
        let clients = try_join_all(
            configs
                .into_iter()
                .map(|config| AuthenticatorClient::new(config, client.clone())),
        )
        .await?;

        Ok(Self { clients })
    }

    /// Validate a bearer token against all accepted clients.
    #[instrument(level = "debug", skip_all, err)]
    pub async fn validate_token<S: AsRef<str>>(
        &self,
        token: S,
    ) -> Result<UserDetails, AuthenticationError> {
        let mut token: AccessToken = Compact::new_encoded(token.as_ref());

        for client in &self.clients {
            if let Ok(details) = client.validate_token(&mut token) {
                return Ok(details);
            }
        }

        Err(AuthenticationError::Failed)
    }
}
