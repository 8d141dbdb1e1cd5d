use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Outcome of a form submission: `303 See Other` to the page to show next,
/// with the message that page should display.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FlashRedirect {
    pub level: FlashLevel,
    pub message: String,
    pub redirect_to: String,
}

impl FlashRedirect {
    pub fn new(level: FlashLevel, redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            redirect_to: redirect_to.into(),
        }
    }

    pub fn success(redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, redirect_to, message)
    }

    pub fn info(redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, redirect_to, message)
    }

    pub fn warning(redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, redirect_to, message)
    }

    pub fn error(redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Error, redirect_to, message)
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, self.redirect_to.clone())],
            Json(self),
        )
            .into_response()
    }
}
