/// Crate-wide result alias.
pub type ScrollyResult<T> = Result<T, ScrollyError>;

/// Every failure surfaced by the library.
///
/// Nothing is recovered locally: a failed fetch, a missing column, or an unknown pie key aborts the
/// scene that triggered it and leaves the canvas in whatever state it had reached.
#[derive(thiserror::Error, Debug)]
pub enum ScrollyError {
    /// Invalid configuration or out-of-range input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A tabular resource could not be read or lacks a required column.
    #[error("data error: {0}")]
    Data(String),

    /// A named record was looked up and does not exist.
    #[error("record not found: {0}")]
    RecordNotFound(String),

    /// SVG parsing, rasterization, or image encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollyError {
    /// Build a [`ScrollyError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollyError::Data`].
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`ScrollyError::RecordNotFound`].
    pub fn record_not_found(msg: impl Into<String>) -> Self {
        Self::RecordNotFound(msg.into())
    }

    /// Build a [`ScrollyError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScrollyError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<csv::Error> for ScrollyError {
    fn from(e: csv::Error) -> Self {
        Self::Data(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ScrollyError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(ScrollyError::data("x").to_string().contains("data error:"));
        assert!(
            ScrollyError::record_not_found("x")
                .to_string()
                .contains("record not found:")
        );
        assert!(ScrollyError::render("x").to_string().contains("render error:"));
        assert!(
            ScrollyError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ScrollyError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
