//! Error types for comicbook

use thiserror::Error;

/// Upper bound on the number of panels a single run may request
pub const MAX_PANELS: usize = 9;

/// The main error type for comicbook operations
#[derive(Debug, Error)]
pub enum ComicError {
    #[error("Story text is empty")]
    EmptyStory,

    #[error("Panel count must be between 1 and {max}, got {value}")]
    InvalidPanelCount { value: usize, max: usize },

    #[error("No panels were generated")]
    NoPanelsGenerated,

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for comicbook operations
pub type Result<T> = std::result::Result<T, ComicError>;

impl ComicError {
    /// Check a requested panel count against `1..=MAX_PANELS`
    pub fn check_panel_count(value: usize) -> Result<usize> {
        if (1..=MAX_PANELS).contains(&value) {
            Ok(value)
        } else {
            Err(ComicError::InvalidPanelCount {
                value,
                max: MAX_PANELS,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_count_bounds() {
        assert_eq!(ComicError::check_panel_count(1).unwrap(), 1);
        assert_eq!(ComicError::check_panel_count(9).unwrap(), 9);
        assert!(ComicError::check_panel_count(0).is_err());
        assert!(ComicError::check_panel_count(10).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ComicError::InvalidPanelCount { value: 12, max: 9 };
        assert_eq!(err.to_string(), "Panel count must be between 1 and 9, got 12");
        assert_eq!(
            ComicError::NoPanelsGenerated.to_string(),
            "No panels were generated"
        );
    }
}
