use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use sea_orm::DbErr;

use crate::views::ErrorPage;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// No valid admin session; the visitor is sent to the login form.
    Unauthenticated,
    NotFound(String),
    Internal(String),
}

impl AppError {
    /// The error page for this error, or the redirect that replaces it.
    fn into_page(self) -> Result<(StatusCode, ErrorPage), Redirect> {
        let page = match self {
            AppError::Unauthenticated => return Err(Redirect::to("/login")),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorPage {
                    status: 400,
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorPage {
                    status: 404,
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorPage {
                        status: 500,
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        };
        Ok(page)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, page) = match self.into_page() {
            Ok(page) => page,
            Err(redirect) => return redirect.into_response(),
        };

        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, page.message).into_response()
            }
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(format!("Template error: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {err}"))
    }
}
