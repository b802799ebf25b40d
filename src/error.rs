use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Rejected at the file-selection boundary; workflow state untouched.
    Validation,
    /// Network or service failure; terminal for the current session.
    Transport,
    /// Command issued against the wrong lifecycle state.
    State,
}

#[derive(Debug, Serialize)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        AppError {
            kind: ErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        AppError {
            kind: ErrorKind::State,
            message: message.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::state(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::transport(err.to_string())
    }
}
