//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use unawaited::EngineError;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to walk {path}: {source}")]
    Discovery {
        path: Utf8PathBuf,
        source: walkdir::Error,
    },
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),
    #[error("failed to read {path}: {source}")]
    ReadSource { path: Utf8PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    WriteSource { path: Utf8PathBuf, source: io::Error },
    #[error("failed to analyse {path}: {source}")]
    Analysis {
        path: Utf8PathBuf,
        source: EngineError,
    },
    #[error("refusing to write {path}: the fixed file does not parse cleanly ({message})")]
    FixValidation { path: Utf8PathBuf, message: String },
    #[error("failed to serialise report: {0}")]
    Serialise(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Emit(#[from] io::Error),
}
