//! Success envelope shared by all module handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `{ message, data? }` body returned on success
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> ApiResponse<T> {
    /// 200 with a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status: StatusCode::OK,
        }
    }

    /// 201 with the created resource
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status: StatusCode::CREATED,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl ApiResponse<()> {
    /// 200 with only a message
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            status: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_only_omits_data() {
        let body = serde_json::to_value(ApiResponse::message_only("Book deleted")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Book deleted" }));
    }

    #[test]
    fn created_reports_201() {
        let response = ApiResponse::created("Book added", vec![1, 2]);
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }

    #[test]
    fn ok_serializes_payload() {
        let body = serde_json::to_value(ApiResponse::ok("Books retrieved", vec!["a"])).unwrap();
        assert_eq!(body["data"][0], "a");
        assert_eq!(body["message"], "Books retrieved");
    }
}
