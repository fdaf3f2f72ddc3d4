use thiserror::Error;

/// The two misuse conditions surfaced to callers. Everything else about
/// generation is infallible.
#[derive(Debug, Error)]
pub enum RandomizerError {
    #[error("[Randomizer] Error: Missing type description")]
    MissingDescription,

    #[error("specimen does not match the requested type: {0}")]
    Conversion(#[from] serde_json::Error),
}
