/*
 * Responsibility
 * - アプリ共通の AppError 定義 (Business / BindingMissing / それ以外)
 * - IntoResponse 実装: 分類 → ログ → { success: false, code, message } を返す唯一の出口
 * - KV / sqlx / extractor (JSON body, path) のエラーを統一的に変換
 */
pub mod classify;

use std::fmt;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::bindings::Binding;
use crate::repos::error::RepoError;
use crate::services::kv::KvError;

pub use classify::{ClassifiedError, ErrorKind, classify};

/// Code carried in the failure envelope: numeric status-like codes or
/// symbolic business codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl ErrorCode {
    /// The HTTP status this code stands for, if it is a 4xx/5xx status.
    pub fn http_status(&self) -> Option<StatusCode> {
        match self {
            ErrorCode::Number(n) => u16::try_from(*n)
                .ok()
                .and_then(|n| StatusCode::from_u16(n).ok())
                .filter(|s| s.is_client_error() || s.is_server_error()),
            ErrorCode::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(n) => write!(f, "{n}"),
            ErrorCode::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<i64> for ErrorCode {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<StatusCode> for ErrorCode {
    fn from(status: StatusCode) -> Self {
        Self::Number(status.as_u16().into())
    }
}

impl From<&str> for ErrorCode {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ErrorCode {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// The only body ever returned on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn fail(message: impl Into<String>, code: impl Into<ErrorCode>) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&ClassifiedError> for ErrorEnvelope {
    fn from(c: &ClassifiedError) -> Self {
        Self::fail(c.message.clone(), c.code.clone())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Expected failure; message is user-facing by construction.
    #[error("{code}: {message}")]
    Biz { code: ErrorCode, message: String },
    #[error("{0} binding is not configured")]
    BindingMissing(Binding),
    /// Anything else. `code` is set when the failing layer declared one.
    #[error("{error}")]
    Internal {
        code: Option<ErrorCode>,
        error: anyhow::Error,
    },
}

impl AppError {
    pub fn biz(message: impl Into<String>) -> Self {
        Self::biz_with_code(StatusCode::BAD_REQUEST, message)
    }

    pub fn biz_with_code(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        Self::Biz {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::biz_with_code(StatusCode::NOT_FOUND, format!("{resource} not found."))
    }

    pub fn internal(error: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            code: None,
            error: error.into(),
        }
    }

    pub fn with_code(code: impl Into<ErrorCode>, error: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            code: Some(code.into()),
            error: error.into(),
        }
    }

    /// Classify, log and build the failure envelope.
    pub fn respond(&self) -> (StatusCode, ErrorEnvelope) {
        let classified = classify(self);

        match classified.kind {
            ErrorKind::Business => tracing::info!("{}", classified.message),
            ErrorKind::BindingMissing | ErrorKind::Unclassified => tracing::error!(
                kind = ?classified.kind,
                status = classified.status.as_u16(),
                "{:?}",
                self
            ),
        }

        (classified.status, ErrorEnvelope::from(&classified))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, envelope) = self.respond();
        (status, Json(envelope)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error)
    }
}

impl From<KvError> for AppError {
    fn from(e: KvError) -> Self {
        Self::internal(e)
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Db(_) => Self::internal(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Client supplied a malformed body; axum's text is safe to return.
        Self::biz_with_code(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::biz_with_code(rejection.status(), rejection.body_text())
    }
}
