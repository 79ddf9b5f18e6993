use thiserror::Error;

use super::schema::ValidationError;

/// Document store error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document failed its collection schema
    #[error("{0}")]
    Validation(ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store call timed out after {0}ms")]
    Timeout(u64),

    #[error("Stored document {collection}/{id} is unreadable: {reason}")]
    Corrupt {
        collection: &'static str,
        id: String,
        reason: String,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            StoreError::Timeout(250).to_string(),
            "Store call timed out after 250ms"
        );
        assert_eq!(
            StoreError::Unavailable("connection refused".into()).to_string(),
            "Store unavailable: connection refused"
        );
        let corrupt = StoreError::Corrupt {
            collection: "orders",
            id: "01J".into(),
            reason: "body is not an object".into(),
        };
        assert!(corrupt.to_string().contains("orders/01J"));
    }

    #[test]
    fn test_is_validation() {
        assert!(!StoreError::Timeout(1).is_validation());
    }
}
