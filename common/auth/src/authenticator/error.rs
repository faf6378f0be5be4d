#[derive(Clone, Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("authentication failed")]
    Failed,
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum AuthorizationError {
    #[error("missing permission: {0}")]
    Failed(crate::Permission),
}

#[cfg(feature = "actix")]
mod actix {
    use super::*;
    use actix_http::body::BoxBody;
    use actix_web::{HttpResponse, ResponseError};
    use vocero_common::error::ErrorInformation;

    impl ResponseError for AuthenticationError {
        fn error_response(&self) -> HttpResponse<BoxBody> {
            HttpResponse::Unauthorized()
                .json(ErrorInformation::new("NotAuthenticated", self))
        }
    }

    impl ResponseError for AuthorizationError {
        fn error_response(&self) -> HttpResponse<BoxBody> {
            HttpResponse::Forbidden().json(ErrorInformation::new("NotAuthorized", self))
        }
    }
}
