use crate::font::TypefaceError;

/// Track names could not be retrieved or understood.
#[derive(Debug, thiserror::Error)]
pub enum DataFetchError {
    #[error("track request failed: {0}")]
    Transport(String),
    #[error("track endpoint answered with status {0}")]
    Status(u16),
    #[error("track payload is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("track payload contains no tracks")]
    Empty,
}

/// The typeface resource could not be loaded or parsed.
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("font request failed: {0}")]
    Transport(String),
    #[error("font endpoint answered with status {0}")]
    Status(u16),
    #[error(transparent)]
    Typeface(#[from] TypefaceError),
}

/// Startup was cancelled before any scene object existed.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("track data unavailable: {0}")]
    Tracks(#[from] DataFetchError),
    #[error("font unavailable: {0}")]
    Font(#[from] FontLoadError),
}
