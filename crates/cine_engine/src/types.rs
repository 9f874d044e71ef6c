use std::time::Duration;

use crate::{CatalogRequest, Genre, MovieDetails, MoviePage};

pub type RequestId = u64;

/// Failure of a catalog operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Caller misuse, detected before any network access.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// Non-success HTTP status from the catalog service.
    #[error("API error: {status} {status_text}")]
    Remote { status: u16, status_text: String },
    /// Transport failure or a body that could not be read or decoded.
    #[error("network error: {0}")]
    Network(String),
}

impl CatalogError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CatalogError::InvalidArgument(message.into())
    }

    pub(crate) fn network(message: impl Into<String>) -> Self {
        CatalogError::Network(message.into())
    }
}

/// Decoded payload of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogResponse {
    Page(MoviePage),
    Details(Box<MovieDetails>),
    Genres(Vec<Genre>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Completed {
        request_id: RequestId,
        request: CatalogRequest,
        result: Result<CatalogResponse, CatalogError>,
    },
}
