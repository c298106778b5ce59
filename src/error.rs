//! Error types for voiceover

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for voiceover
#[derive(Error, Debug)]
pub enum VoiceoverError {
    /// Synthesis was asked for blank text. No backend was tried.
    #[error("Text is empty")]
    EmptyInput,

    #[error("Failed to create output directory {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single backend attempt failed. The chain recovers from this.
    #[error("Speech backend error: {0}")]
    Backend(String),

    /// Every backend in the chain was unavailable or failed.
    #[error("{0}")]
    NoBackendAvailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for voiceover operations
pub type Result<T> = std::result::Result<T, VoiceoverError>;

impl From<String> for VoiceoverError {
    fn from(s: String) -> Self {
        VoiceoverError::Other(s)
    }
}

impl From<&str> for VoiceoverError {
    fn from(s: &str) -> Self {
        VoiceoverError::Other(s.to_string())
    }
}

impl From<reqwest::Error> for VoiceoverError {
    fn from(e: reqwest::Error) -> Self {
        VoiceoverError::Backend(format!("HTTP error: {}", e))
    }
}

impl From<hound::Error> for VoiceoverError {
    fn from(e: hound::Error) -> Self {
        VoiceoverError::Backend(format!("Invalid WAV output: {}", e))
    }
}

impl From<serde_json::Error> for VoiceoverError {
    fn from(e: serde_json::Error) -> Self {
        VoiceoverError::Other(format!("JSON error: {}", e))
    }
}
