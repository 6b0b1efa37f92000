// In crates/web-server/src/error.rs

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::types::ErrorBody;

#[derive(Error, Debug)]
pub enum Error {
    /// Request parameters or price history rejected by the evaluation core.
    #[error(transparent)]
    Evaluation(#[from] core_types::Error),

    /// The request body is not valid JSON for the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Market data error: {0}")]
    MarketData(#[from] api_client::Error),

    #[error("Failed to bind server address: {0}")]
    ServerBindError(std::io::Error),

    #[error("Server error: {0}")]
    ServeError(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Evaluation(_) => StatusCode::BAD_REQUEST,
            Error::InvalidBody(rejection) => rejection.status(),
            Error::MarketData(api_client::Error::SymbolNotFound(_))
            | Error::MarketData(api_client::Error::EmptyHistory { .. }) => StatusCode::NOT_FOUND,
            Error::MarketData(_) => StatusCode::BAD_GATEWAY,
            Error::ServerBindError(_) | Error::ServeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed.");
        } else {
            tracing::warn!(error = %self, "Request rejected.");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
