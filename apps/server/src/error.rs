use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pension_core::errors::{ConfigError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Config(ConfigError::UnknownInstrument(_))
                | CoreError::Config(ConfigError::UnknownSleeve(_)) => StatusCode::NOT_FOUND,
                CoreError::MarketData(_) => StatusCode::BAD_GATEWAY,
                CoreError::Config(_) | CoreError::ConfigIO(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
