use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Validation(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Authentication(String),
    NotFound(String),
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// True when the server rejected the request as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Http { status: 401, .. })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Validation(message) => write!(formatter, "{message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Authentication(message) => {
                write!(formatter, "Authentication failed: {message}")
            }
            AppError::NotFound(message) => write!(formatter, "Not found: {message}"),
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}
