//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Scoring and ranking never fail; only loading a catalog can.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Catalog JSON could not be parsed
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    /// Catalog source could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Error code for integration with glasscart-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Catalog JSON could not be parsed
    InvalidCatalog = 11001,
    /// Catalog source could not be read
    CatalogUnreadable = 11002,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::Catalog(_) => SearchErrorCode::InvalidCatalog,
            SearchError::Io(_) => SearchErrorCode::CatalogUnreadable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SearchError::from(serde_json::from_str::<u32>("x").unwrap_err());
        assert_eq!(err.code(), SearchErrorCode::InvalidCatalog);
        assert_eq!(err.code() as u32, 11001);

        let err = SearchError::from(std::io::Error::other("gone"));
        assert_eq!(err.code(), SearchErrorCode::CatalogUnreadable);
    }
}
