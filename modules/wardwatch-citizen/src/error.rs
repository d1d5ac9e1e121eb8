use uuid::Uuid;

/// Result type alias for citizen desk operations.
pub type Result<T> = std::result::Result<T, DeskError>;

#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No issue with id {0}")]
    NotFound(Uuid),

    #[error("Issue is {distance_km:.1} km away, outside your neighborhood zone")]
    OutsideNeighborhood { distance_km: f64 },

    #[error("Store error: {0}")]
    Store(#[from] wardwatch_store::StoreError),
}
