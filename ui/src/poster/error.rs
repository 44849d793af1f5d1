use thiserror::Error;

/// Failures of the poster pipeline. The modal only distinguishes "could not
/// generate" from export problems; the payload text is for logs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PosterError {
    #[error("Poster generation failed: {0}")]
    Render(String),

    #[error("Unable to encode poster: {0}")]
    Encode(String),

    #[error("Unable to save poster: {0}")]
    Download(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}
