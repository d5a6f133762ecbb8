//! Structured error payload shared by the mock backends

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category tag on a backend error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Auth,
    Permission,
    Geo,
    Format,
    NotFound,
    Copyright,
    Policy,
    Licensing,
}

/// Error payload returned by a backend call.
///
/// Never shown to the user raw; the engine logs it at debug level and asks
/// the language model to restate `message` in plain terms. The `code` and
/// `message` fields round-trip through serde as the platform's
/// `{code, message}` error shape.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message} (code {code})")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, code: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }
}
