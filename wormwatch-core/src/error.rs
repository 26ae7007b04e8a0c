use thiserror::Error;

/// Erreurs possibles pendant un tick de surveillance
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("map fetch failed: {0}")]
    Fetch(String),
    #[error("pathfinder session expired, refresh PF_SESSION / PF_CHAR_COOKIE")]
    SessionExpired,
    #[error("esi name resolution failed: {0}")]
    Resolution(String),
    #[error("esi route lookup failed: {0}")]
    Route(String),
    #[error("notification delivery failed: {0}")]
    Delivery(String),
    #[error("state store error: {0}")]
    Persistence(#[from] std::io::Error),
    #[error("unexpected payload shape: {0}")]
    DataShape(#[from] serde_json::Error),
}
