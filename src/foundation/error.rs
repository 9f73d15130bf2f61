pub type ForgeResult<T> = Result<T, ForgeError>;

/// Errors produced by the forge pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ForgeError {
    /// Invalid caller-supplied input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization failed (surface sizing, pixel buffer mismatch).
    #[error("render error: {0}")]
    Render(String),

    /// Font discovery or text shaping failed.
    #[error("font error: {0}")]
    Font(String),

    /// Image encoding or file output failed.
    #[error("export error: {0}")]
    Export(String),

    /// `export` was called before any render completed.
    #[error("nothing has been rendered yet")]
    NothingRendered,

    /// A selector was handed an empty option list. Always a programming defect.
    #[error("selection from an empty option set: {0}")]
    EmptySelection(&'static str),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ForgeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
