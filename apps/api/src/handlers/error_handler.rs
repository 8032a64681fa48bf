use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use application::{AppError, ErrorResponse};
use std::fmt;

/// Wrapper around AppError to implement ResponseError (which is defined in actix-web)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl fmt::Display for HttpAppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl ResponseError for HttpAppError {
    fn status_code(&self) -> StatusCode {
        let code = self.0.status_code();
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_code = self.0.error_code();

        if status_code.is_server_error() {
            tracing::error!(
                error_code = error_code,
                error_message = %self.0,
                "Internal Server Error: {:?}",
                self.0
            );
        } else if status_code == StatusCode::UNAUTHORIZED || status_code == StatusCode::FORBIDDEN {
            tracing::warn!(
                error_code = error_code,
                error_message = %self.0,
                "Auth Error"
            );
        }

        HttpResponse::build(status_code).json(ErrorResponse::from(&self.0))
    }
}

/// Turns malformed JSON bodies into the standard 400 error body.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    HttpAppError(AppError::Validation(err.to_string())).into()
}

/// Same for query strings.
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    HttpAppError(AppError::Validation(err.to_string())).into()
}

/// Same for path segments such as malformed ids.
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    HttpAppError(AppError::Validation(err.to_string())).into()
}
