use thiserror::Error;

use crate::model::Coordinates;

/// Convenient result alias for the postal code distance library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The geocoder answered successfully but returned no candidate features.
    #[error("no geocoding candidates returned for postal code {post_code}")]
    NoCandidates { post_code: String },

    /// The directions service answered successfully but returned no routes.
    #[error("no driving route returned between {start} and {destination}")]
    NoRoute {
        start: Coordinates,
        destination: Coordinates,
    },

    /// The provider answered with a non-success status code.
    #[error("{operation} request failed with status {status}: {body}")]
    ProviderStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Raised when the provider client cannot be constructed from its configuration.
    #[error("invalid provider configuration: {message}")]
    InvalidConfig { message: String },

    /// Wrapper for HTTP client errors (connect, timeout, decode).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Stable label describing the failure class, used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NoCandidates { .. } | Error::NoRoute { .. } => "data_shape",
            Error::ProviderStatus { .. } | Error::Http(_) => "provider",
            Error::InvalidConfig { .. } => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_candidates_mentions_post_code() {
        let err = Error::NoCandidates {
            post_code: "SW1A 1AA".to_string(),
        };
        assert!(err.to_string().contains("SW1A 1AA"));
        assert_eq!(err.kind(), "data_shape");
    }

    #[test]
    fn no_route_is_a_data_shape_error() {
        let err = Error::NoRoute {
            start: Coordinates::new(-0.14, 51.5),
            destination: Coordinates::new(-0.1, 51.52),
        };
        assert_eq!(err.kind(), "data_shape");
        assert!(err.to_string().contains("-0.14,51.5"));
    }

    #[test]
    fn provider_status_is_a_provider_error() {
        let err = Error::ProviderStatus {
            operation: "geocode",
            status: 401,
            body: "Not Authorized".to_string(),
        };
        assert_eq!(err.kind(), "provider");
        assert_eq!(
            err.to_string(),
            "geocode request failed with status 401: Not Authorized"
        );
    }
}
