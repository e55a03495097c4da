use thiserror::Error;
use uuid::Uuid;

use crate::validation::FieldError;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("export target not found: {0}")]
    ExportTargetMissing(String),

    #[error("export target is not visible or not rendered ({width}x{height})")]
    ExportTargetHidden { width: u32, height: u32 },

    #[error("capture produced invalid image data: {0}")]
    InvalidCapture(String),

    #[error("PDF assembly failed: {0}")]
    PdfAssembly(String),

    #[error("model service call failed: {0}")]
    ModelCall(String),

    #[error("malformed model reply: {0}")]
    ModelReply(String),

    #[error("{0} is already in progress")]
    OperationInFlight(&'static str),

    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    #[error("invalid photo: {0}")]
    InvalidPhoto(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("unknown {kind} entry: {id}")]
    UnknownEntry { kind: &'static str, id: Uuid },

    #[error("responsibility index {0} out of range")]
    IndexOutOfRange(usize),

    #[error("resume failed validation ({} field error(s))", .0.len())]
    Validation(Vec<FieldError>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BuilderError>;
