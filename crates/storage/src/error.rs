use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("Request cancelled before the statement completed")]
    Cancelled,

    #[error("Request deadline exceeded before the statement completed")]
    DeadlineExceeded,
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn not_found(entity: &str) -> Self {
        StorageError::NotFound(format!("{entity} not found"))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }

    /// True when the statement never finished because the caller gave up on it.
    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            StorageError::Cancelled | StorageError::DeadlineExceeded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StorageError::not_found("category");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "category not found");
    }

    #[test]
    fn test_database_error_is_not_not_found() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_not_found());
        assert!(!err.is_interrupted());
    }

    #[test]
    fn test_interrupted_variants() {
        assert!(StorageError::Cancelled.is_interrupted());
        assert!(StorageError::DeadlineExceeded.is_interrupted());
    }
}
