use uuid::Uuid;

/// Result type alias for moderation operations.
pub type Result<T> = std::result::Result<T, ModerationError>;

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("No issue with id {0}")]
    NotFound(Uuid),

    #[error("Cannot ban: no username given")]
    EmptyUsername,

    #[error("Cannot ban an anonymous reporter")]
    AnonymousReporter,

    #[error("User '{0}' is already banned")]
    AlreadyBanned(String),

    #[error("Store error: {0}")]
    Store(#[from] wardwatch_store::StoreError),
}
