use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Sheet metadata error: {0}")]
    Meta(String),

    #[error("Output check error: {0}")]
    Check(String),

    #[error("Config error: {0}")]
    Config(String),
}
