use crate::{default::default_scope_mappings, devmode};
use std::collections::HashMap;

/// The overall authenticator configuration, a set of accepted clients.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct AuthenticatorConfig {
    /// The clients to accept tokens from
    pub clients: Vec<AuthenticatorClientConfig>,
}

impl Default for AuthenticatorConfig {
    /// The devmode configuration, aligned with the local Keycloak deployment.
    fn default() -> Self {
        Self {
            clients: devmode::CLIENT_IDS
                .iter()
                .map(|client_id| AuthenticatorClientConfig {
                    client_id: client_id.to_string(),
                    issuer_url: devmode::issuer_url(),
                    required_audience: None,
                    scope_mappings: default_scope_mappings(),
                })
                .collect(),
        }
    }
}

/// Configuration of a single client.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct AuthenticatorClientConfig {
    /// The ID of the client
    #[serde(rename = "clientId")]
    pub client_id: String,

    /// The issuer URL, used for discovering the token endpoints and keys
    #[serde(rename = "issuerUrl")]
    pub issuer_url: String,

    /// An audience which must be present in the token
    #[serde(
        default,
        rename = "requiredAudience",
        skip_serializing_if = "Option::is_none"
    )]
    pub required_audience: Option<String>,

    /// Mapping of scopes to permissions
    #[serde(default = "default_scope_mappings", rename = "scopeMappings")]
    pub scope_mappings: HashMap<String, Vec<String>>,
}

/// A client configuration directly from the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq, clap::Args)]
#[command(rename_all_env = "SCREAMING_SNAKE_CASE")]
#[group(id = "SingleAuthenticatorClientConfig")]
pub struct SingleAuthenticatorClientConfig {
    /// The clients IDs to allow
    #[arg(
        id = "authentication-client-id",
        long = "authentication-client-id",
        env = "AUTHENTICATOR_OIDC_CLIENT_IDS",
        value_delimiter = ','
    )]
    pub client_ids: Vec<String>,

    /// The issuer URL of the clients
    #[arg(
        id = "authentication-issuer-url",
        long = "authentication-issuer-url",
        env = "AUTHENTICATOR_OIDC_ISSUER_URL",
        default_value = ""
    )]
    pub issuer_url: String,

    /// An audience which must be present in the token
    #[arg(
        id = "authentication-required-audience",
        long = "authentication-required-audience",
        env = "AUTHENTICATOR_OIDC_REQUIRED_AUDIENCE"
    )]
    pub required_audience: Option<String>,
}

impl SingleAuthenticatorClientConfig {
    pub fn expand(self) -> impl Iterator<Item = AuthenticatorClientConfig> {
        let issuer_url = self.issuer_url;
        let required_audience = self.required_audience;

        self.client_ids
            .into_iter()
            .map(move |client_id| AuthenticatorClientConfig {
                client_id,
                issuer_url: issuer_url.clone(),
                required_audience: required_audience.clone(),
                scope_mappings: default_scope_mappings(),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expand_clients() {
        let config = SingleAuthenticatorClientConfig {
            client_ids: vec!["frontend".into(), "widget".into()],
            issuer_url: "https://auth.example.com/realms/vocero".into(),
            required_audience: Some("vocero-api".into()),
        };

        let clients = config.expand().collect::<Vec<_>>();
        assert_eq!(clients.len(), 2);
        assert!(clients.iter().all(|client| {
            client.issuer_url == "https://auth.example.com/realms/vocero"
                && client.required_audience.as_deref() == Some("vocero-api")
        }));
    }
}
