use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacescoutError {
    #[error("provider error: {0}")]
    Provider(#[from] crate::provider::ProviderError),
    #[error("route error: {0}")]
    Route(#[from] crate::router::RouteError),
    #[error("geolocation error: {0}")]
    Geolocate(#[from] crate::geolocate::GeolocateError),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PlacescoutError>;
