use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpoonError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("File read failed: {0}")]
    FileReadError(String),

    #[error("State file error: {0}")]
    StateError(String),

    #[error("Invalid ignore pattern: {0}")]
    PatternError(String),

    #[error("Tokenizer Error: {0}")]
    TokenizerError(String),

    #[error("No tree node for path: {0}")]
    NodeNotFound(String),
}

impl From<std::io::Error> for SpoonError {
    fn from(err: std::io::Error) -> Self {
        SpoonError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for SpoonError {
    fn from(err: serde_json::Error) -> Self {
        SpoonError::StateError(err.to_string())
    }
}

impl From<glob::PatternError> for SpoonError {
    fn from(err: glob::PatternError) -> Self {
        SpoonError::PatternError(err.to_string())
    }
}
