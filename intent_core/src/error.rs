//! Error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Pattern error in \"{variant}\" for {intent}: {source}")]
    Pattern {
        variant: String,
        intent: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("No handler registered for intent {0}")]
    UnhandledIntent(String),

    #[error("Handler error in {intent}: {message}")]
    Handler { intent: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
