use crate::config::ConfigError;
use crate::dataset::{DatasetError, UnknownParty};
use crate::report::UnknownTopic;
use crate::session::{AnswerImportError, WeightOverrideError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Dataset(DatasetError),
    Answers(AnswerImportError),
    Weight(WeightOverrideError),
    Party(UnknownParty),
    Topic(UnknownTopic),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::Dataset(err) => write!(f, "dataset error: {}", err),
            AppError::Answers(err) => write!(f, "answers error: {}", err),
            AppError::Weight(err) => write!(f, "weight error: {}", err),
            AppError::Party(err) => write!(f, "party error: {}", err),
            AppError::Topic(err) => write!(f, "topic error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Dataset(err) => Some(err),
            AppError::Answers(err) => Some(err),
            AppError::Weight(err) => Some(err),
            AppError::Party(err) => Some(err),
            AppError::Topic(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<DatasetError> for AppError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value)
    }
}

impl From<AnswerImportError> for AppError {
    fn from(value: AnswerImportError) -> Self {
        Self::Answers(value)
    }
}

impl From<WeightOverrideError> for AppError {
    fn from(value: WeightOverrideError) -> Self {
        Self::Weight(value)
    }
}

impl From<UnknownParty> for AppError {
    fn from(value: UnknownParty) -> Self {
        Self::Party(value)
    }
}

impl From<UnknownTopic> for AppError {
    fn from(value: UnknownTopic) -> Self {
        Self::Topic(value)
    }
}
