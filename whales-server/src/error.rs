use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// An error from the API
#[derive(Debug, PartialEq, Eq)]
pub struct Error {
    /// The status code the response rides on.
    status: StatusCode,

    /// What we tell the client.
    message: String,
}

impl Error {
    /// Construct an error with the default status
    pub fn custom(message: &str) -> Self {
        Self::custom_with_status(message, StatusCode::BAD_REQUEST)
    }

    /// Construct an error with a specific status code
    pub fn custom_with_status(message: &str, status: StatusCode) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Pull the error apart for assertions.
    #[cfg(test)]
    pub fn into_parts(self) -> (StatusCode, String) {
        (self.status, self.message)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}
