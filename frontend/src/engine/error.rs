use thiserror::Error;

/// Everything that can go wrong while wiring the engine to the page.
///
/// None of these are fatal. Callers log them and fall back to the static
/// initial state (light theme, unrevealed text).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no window available")]
    NoWindow,
    #[error("failed to register {event} listener: {message}")]
    Listener { event: &'static str, message: String },
    #[error("failed to request animation frame: {0}")]
    AnimationFrame(String),
    #[error("region {0} is already registered")]
    DuplicateRegion(String),
    #[error("invalid scroll config: {0}")]
    InvalidConfig(String),
    #[error("malformed scroll config: {0}")]
    ConfigJson(#[from] serde_json::Error),
}
