//! Solr Client Library
//!
//! HTTP client for talking to an Apache Solr style search server: build a
//! request, send it, get a typed response back. Indexing, scoring and storage
//! all live on the server side.

mod connection;

pub use connection::Connection;
pub use solr_core::document::{Document, Field, FieldValue};
pub use solr_core::request;
pub use solr_core::request::{Request, ResponseFormat};
pub use solr_core::response::{Hit, QueryData, Response};

/// Errors surfaced by [`Connection`].
///
/// Semantic rejections by the server (e.g. an unknown field) are not errors:
/// they come back as a [`Response`] with [`Response::ok`] `false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The endpoint could not be reached at all.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status, e.g. for an
    /// invalid resource path.
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// The request declared a response format this client cannot decode.
    #[error("unsupported response format: {0}")]
    UnsupportedResponseFormat(ResponseFormat),

    /// The base URL did not parse.
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Parse(#[from] solr_core::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
