//! Error types for gateway-conf

/// Result type for gateway-conf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when toggling configuration entries
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Section not found: {key}")]
    SectionNotFound { key: String },

    #[error("Entry not found in section {section}: {name}")]
    EntryNotFound { section: String, name: String },
}
