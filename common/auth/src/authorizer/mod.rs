mod require;
pub use require::*;

use crate::{
    authenticator::{error::AuthorizationError, user::UserInformation},
    Permission,
};

#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct AuthorizerConfig {
    /// Disable authorization, allowing any caller to perform any operation
    #[serde(default)]
    pub disabled: bool,
}

/// Enforce permissions on users.
///
/// Created without a configuration (which happens when authentication is turned off), the
/// authorizer lets everything pass.
#[derive(Clone, Debug, Default)]
pub struct Authorizer {
    enforcing: bool,
}

impl Authorizer {
    pub fn new(config: Option<AuthorizerConfig>) -> Self {
        Self {
            enforcing: config.map(|config| !config.disabled).unwrap_or_default(),
        }
    }

    pub fn require(
        &self,
        user: &UserInformation,
        permission: Permission,
    ) -> Result<(), AuthorizationError> {
        if !self.enforcing {
            return Ok(());
        }

        match user {
            UserInformation::Authenticated(details) if details.require(permission) => Ok(()),
            _ => Err(AuthorizationError::Failed(permission)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::authenticator::user::UserDetails;

    #[test]
    fn permissive_without_config() {
        let authorizer = Authorizer::new(None);
        assert!(authorizer
            .require(&UserInformation::Anonymous, Permission::CreateAssistant)
            .is_ok());
    }

    #[test]
    fn enforcing_with_config() {
        let authorizer = Authorizer::new(Some(AuthorizerConfig { disabled: false }));

        assert!(authorizer
            .require(&UserInformation::Anonymous, Permission::CreateAssistant)
            .is_err());

        let user = UserInformation::Authenticated(UserDetails {
            id: "user".into(),
            permissions: [Permission::CreateAssistant].into(),
        });
        assert!(authorizer
            .require(&user, Permission::CreateAssistant)
            .is_ok());
        assert!(authorizer
            .require(&user, Permission::DeleteAssistant)
            .is_err());
    }
}
