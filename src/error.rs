//! Crate-wide error type.
//!
//! Each module reports failures through its own error enum; [`AppError`]
//! wraps all of them so library callers can propagate any of them with `?`.

pub use crate::config::ConfigError;
pub use crate::export::ExportError;
pub use crate::state::StateError;
pub use crate::store::StoreError;

/// Any failure surfaced by the library.
///
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The document store could not be read or written.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// An edit could not be applied to the document.
    #[error("Edit rejected: {0}")]
    State(#[from] StateError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A global logger was already installed.
    #[error("Logger error: {0}")]
    Logger(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Category;

    fn fails_with(error: impl Into<AppError>) -> AppResult<()> {
        Err(error.into())
    }

    #[test]
    fn module_errors_convert_with_question_mark() {
        fn save() -> AppResult<()> {
            fails_with(StateError::KindMismatch {
                kind: "group",
                category: Category::Services,
            })?;
            Ok(())
        }
        let error = save().unwrap_err();
        assert!(matches!(error, AppError::State(_)));
        assert!(error.to_string().starts_with("Edit rejected"));
    }

    #[test]
    fn wrapped_messages_keep_the_cause() {
        let cases: Vec<(AppError, &str)> = vec![
            (ConfigError::FilePathNotSet.into(), "Configuration error"),
            (StoreError::Corrupt("eof".to_string()).into(), "eof"),
            (ExportError::NothingGenerated.into(), "Export error"),
            (AppError::Logger("already set".to_string()), "already set"),
        ];
        for (error, expected) in cases {
            assert!(error.to_string().contains(expected), "{}", error);
        }
    }
}
