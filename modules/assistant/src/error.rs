use actix_http::StatusCode;
use actix_web::body::BoxBody;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use vocero_common::error::ErrorInformation;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("record not found")]
    NotFound,
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Database(anyhow::Error),
    #[error(transparent)]
    Platform(#[from] vocero_module_platform::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        Self::Database(value.into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Platform(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Any(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let error = match self {
            Self::NotFound => "NotFound",
            Self::BadRequest(_) => "BadRequest",
            Self::Platform(_) => "VoicePlatform",
            Self::Database(_) => "Database",
            Self::Any(_) => "Internal",
        };

        HttpResponse::build(self.status_code()).json(ErrorInformation::new(error, self))
    }
}
