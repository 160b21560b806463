use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoolscapError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<confique::Error> for FoolscapError {
    fn from(err: confique::Error) -> Self {
        FoolscapError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FoolscapError>;
