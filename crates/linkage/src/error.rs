use std::fmt;

use crate::model::Side;

#[derive(Debug)]
pub enum LinkError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, empty region list, chained abbreviation, etc.).
    ConfigValidation(String),
    /// Missing required column in input data.
    MissingColumn { side: Side, column: String },
    /// Malformed CSV input or CSV serialization failure.
    Csv { side: Option<Side>, message: String },
    /// JSON report serialization failure.
    Json(String),
}

impl LinkError {
    pub(crate) fn csv(side: Option<Side>, err: impl fmt::Display) -> Self {
        Self::Csv { side, message: err.to_string() }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { side, column } => {
                write!(f, "{side} dataset: missing column '{column}'")
            }
            Self::Csv { side: Some(side), message } => {
                write!(f, "{side} dataset: CSV error: {message}")
            }
            Self::Csv { side: None, message } => write!(f, "CSV error: {message}"),
            Self::Json(msg) => write!(f, "JSON serialization error: {msg}"),
        }
    }
}

impl std::error::Error for LinkError {}
