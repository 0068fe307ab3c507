/*
 * Responsibility
 * - AppError を Business / BindingMissing / Unclassified に分類する
 * - HTTP status と envelope に載せる code / message を決める
 * - 型で判定できない外部エラーは、未バインド参照時のランタイム診断文字列と完全一致で判定する
 */
use axum::http::StatusCode;

use super::{AppError, ErrorCode};
use crate::bindings::Binding;

/// Runtime diagnostics produced when code dereferences an unbound resource.
///
/// Only exact matches count. A runtime that words these differently will have
/// its errors reported as Unclassified.
const UNBOUND_DIAGNOSTICS: [(&str, Binding); 3] = [
    (
        "Cannot read properties of undefined (reading 'get')",
        Binding::Kv,
    ),
    (
        "Cannot read properties of undefined (reading 'put')",
        Binding::Kv,
    ),
    (
        "Cannot read properties of undefined (reading 'prepare')",
        Binding::Database,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Expected, caller-facing failure. Message and code are safe to return.
    Business,
    /// A required external binding was not configured.
    BindingMissing,
    Unclassified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

impl ClassifiedError {
    fn binding_missing(binding: Binding) -> Self {
        Self {
            kind: ErrorKind::BindingMissing,
            status: StatusCode::BAD_GATEWAY,
            code: ErrorCode::from(StatusCode::BAD_GATEWAY),
            message: binding.unbound_message().to_string(),
        }
    }
}

/// Map a runtime diagnostic to the binding it reports as missing.
pub fn unbound_binding(message: &str) -> Option<Binding> {
    UNBOUND_DIAGNOSTICS
        .iter()
        .find(|(diagnostic, _)| *diagnostic == message)
        .map(|(_, binding)| *binding)
}

pub fn classify(err: &AppError) -> ClassifiedError {
    match err {
        AppError::Biz { code, message } => ClassifiedError {
            kind: ErrorKind::Business,
            status: code.http_status().unwrap_or(StatusCode::BAD_REQUEST),
            code: code.clone(),
            message: message.clone(),
        },
        AppError::BindingMissing(binding) => ClassifiedError::binding_missing(*binding),
        AppError::Internal { code, error } => {
            let message = error.to_string();
            if let Some(binding) = unbound_binding(&message) {
                return ClassifiedError::binding_missing(binding);
            }

            let code = code
                .clone()
                .unwrap_or_else(|| ErrorCode::from(StatusCode::INTERNAL_SERVER_ERROR));
            ClassifiedError {
                kind: ErrorKind::Unclassified,
                status: code
                    .http_status()
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                code,
                message,
            }
        }
    }
}
