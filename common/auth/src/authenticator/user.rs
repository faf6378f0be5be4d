use crate::Permission;
use std::collections::HashSet;

/// Details of an authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UserDetails {
    /// The subject of the token, the stable user identifier
    pub id: String,
    /// The effective permissions, mapped from the token scopes
    pub permissions: HashSet<Permission>,
}

impl UserDetails {
    pub fn require(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum UserInformation {
    Authenticated(UserDetails),
    #[default]
    Anonymous,
}

impl UserInformation {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Authenticated(details) => Some(&details.id),
            Self::Anonymous => None,
        }
    }

    /// The stable identity of the caller.
    ///
    /// Falls back to a fixed identity when running without authentication, so that per-user
    /// data still lands in a consistent place.
    pub fn subject(&self) -> &str {
        match self {
            Self::Authenticated(details) => &details.id,
            Self::Anonymous => "anonymous",
        }
    }

    pub fn permissions(&self) -> Option<&HashSet<Permission>> {
        match self {
            Self::Authenticated(details) => Some(&details.permissions),
            Self::Anonymous => None,
        }
    }
}

#[cfg(feature = "actix")]
mod actix {
    use super::*;
    use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};

    impl FromRequest for UserInformation {
        type Error = actix_web::Error;
        type Future = core::future::Ready<Result<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
            core::future::ready(Ok(req
                .extensions()
                .get::<UserInformation>()
                .cloned()
                .unwrap_or(UserInformation::Anonymous)))
        }
    }
}
