//! Export-specific error types.

use std::path::PathBuf;

/// Errors that can occur while producing or writing the export document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Document could not be rendered as JSON
    #[error("Failed to serialize export document: {0}")]
    SerializationFailed(String),

    /// No export has been generated yet
    #[error("No export has been generated")]
    NothingGenerated,

    /// Failed to write the export file
    #[error("Failed to write export to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_display() {
        let error = ExportError::SerializationFailed("bad float".to_string());
        assert!(error.to_string().contains("bad float"));

        let error = ExportError::NothingGenerated;
        assert!(error.to_string().contains("No export"));

        let error = ExportError::WriteFailed {
            path: PathBuf::from("/out/application.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(error.to_string().contains("/out/application.json"));
    }
}
