use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("geocoder returned HTTP status {0}")]
    Status(u16),
    #[error("failed to decode geocoder response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("geocoder rejected the request: {0}")]
    Rejected(String),
    #[error("GOOGLE_MAPS_API_KEY is not set")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, GeocodeError>;
