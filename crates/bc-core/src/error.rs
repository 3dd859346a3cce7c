//! Error taxonomy shared by every API-facing port.
//!
//! Field validation errors live in [`crate::form::ValidationErrors`] and never
//! reach this type; `ApiError` covers transport failures, server rejections and
//! unexpected responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when talking to the backend.
///
/// Erros produzidos na comunicação com o backend.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("server rejected request with status {code}")]
    Status { code: u16, message: Option<String> },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(code: u16) -> Self {
        ApiError::Status {
            code,
            message: None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Transport failures the user can retry without changing input.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Timeout | ApiError::Network(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }
}

pub const TIMEOUT_MESSAGE: &str =
    "O servidor demorou muito para responder. Tente novamente em instantes.";
pub const NETWORK_MESSAGE: &str =
    "Não foi possível conectar ao servidor. Verifique sua conexão com a internet.";
pub const GENERIC_MESSAGE: &str = "Ocorreu um erro inesperado. Tente novamente.";

/// Status code → user-facing message table with per-call overrides.
///
/// Unmapped statuses and unexpected errors fall back to [`GENERIC_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessages {
    by_status: BTreeMap<u16, String>,
    fallback: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        let by_status = [
            (400, "Alguns dados enviados são inválidos. Revise o formulário."),
            (401, "Sua sessão expirou. Faça login novamente."),
            (403, "Você não tem permissão para realizar esta ação."),
            (404, "O recurso solicitado não foi encontrado."),
            (409, "Já existe um cadastro com estes dados."),
            (413, "Os arquivos enviados são grandes demais."),
            (422, "Não foi possível processar os dados enviados."),
            (429, "Muitas tentativas. Aguarde um pouco e tente novamente."),
            (500, "Erro interno do servidor. Tente novamente mais tarde."),
            (502, "O servidor está indisponível no momento."),
            (503, "O serviço está temporariamente indisponível."),
        ]
        .into_iter()
        .map(|(code, text)| (code, text.to_string()))
        .collect();

        Self {
            by_status,
            fallback: GENERIC_MESSAGE.to_string(),
        }
    }
}

impl ErrorMessages {
    /// Replace (or add) the message for a single status code.
    pub fn with_override(mut self, code: u16, message: impl Into<String>) -> Self {
        self.by_status.insert(code, message.into());
        self
    }

    pub fn with_fallback(mut self, message: impl Into<String>) -> Self {
        self.fallback = message.into();
        self
    }

    pub fn message_for(&self, err: &ApiError) -> String {
        match err {
            ApiError::Timeout => TIMEOUT_MESSAGE.to_string(),
            ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
            ApiError::Status { code, .. } => self
                .by_status
                .get(code)
                .cloned()
                .unwrap_or_else(|| self.fallback.clone()),
            ApiError::Decode(_) | ApiError::InvalidPayload(_) | ApiError::Unexpected(_) => {
                self.fallback.clone()
            }
        }
    }
}
