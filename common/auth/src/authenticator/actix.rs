use crate::authenticator::{user::UserInformation, Authenticator};
use actix_web::{dev::ServiceRequest, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

/// Validate the bearer token of a request, attaching the user information on success.
pub async fn openid_validator(
    req: ServiceRequest,
    auth: BearerAuth,
    authenticator: Arc<Authenticator>,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    match authenticator.validate_token(auth.token()).await {
        Ok(details) => {
            req.extensions_mut()
                .insert(UserInformation::Authenticated(details));
            Ok(req)
        }
        Err(err) => Err((err.into(), req)),
    }
}
