use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{EngineError, RegistryError};

/// Стабильный код ошибки для клиента.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    NotPlayersTurn,
    UnknownPlayer,
    IllegalCheck,
    NothingToCall,
    RaiseBelowMinimum,
    InsufficientPlayers,
    InvalidCardCount,
    HandInProgress,
    NoActiveHand,
    DuplicatePlayer,
    TableFull,
    UnknownAction,
    /// Неправильные входные данные (например, битый JSON).
    BadRequest,
    RoomNotFound,
    RoomExists,
    /// Внутренняя ошибка сервера.
    Internal,
}

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::BadRequest, message)
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let kind = match &err {
            EngineError::NotPlayersTurn { .. } => ApiErrorKind::NotPlayersTurn,
            EngineError::UnknownPlayer(_) => ApiErrorKind::UnknownPlayer,
            EngineError::IllegalCheck { .. } => ApiErrorKind::IllegalCheck,
            EngineError::NothingToCall => ApiErrorKind::NothingToCall,
            EngineError::RaiseBelowMinimum { .. } => ApiErrorKind::RaiseBelowMinimum,
            EngineError::InsufficientPlayers { .. } => ApiErrorKind::InsufficientPlayers,
            EngineError::InvalidCardCount(_) => ApiErrorKind::InvalidCardCount,
            EngineError::HandInProgress => ApiErrorKind::HandInProgress,
            EngineError::NoActiveHand => ApiErrorKind::NoActiveHand,
            EngineError::DuplicatePlayer(_) => ApiErrorKind::DuplicatePlayer,
            EngineError::TableFull { .. } => ApiErrorKind::TableFull,
            EngineError::UnknownAction(_) | EngineError::MissingRaiseAmount => {
                ApiErrorKind::UnknownAction
            }
            EngineError::InvalidConfig(_) => ApiErrorKind::BadRequest,
            EngineError::Shoe(_) => ApiErrorKind::Internal,
        };
        ApiError::new(kind, err.to_string())
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Engine(e) => e.into(),
            RegistryError::RoomNotFound(_) => ApiError::new(ApiErrorKind::RoomNotFound, err.to_string()),
            RegistryError::RoomExists(_) => ApiError::new(ApiErrorKind::RoomExists, err.to_string()),
            RegistryError::Poisoned(_) => ApiError::new(ApiErrorKind::Internal, err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(err.to_string())
    }
}
