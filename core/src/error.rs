//! Error types for the adapter.
//!
//! # Design
//! One public enum covers every failure mode. `Transport` is transparent:
//! whatever the injected HTTP client reports is surfaced to the caller
//! unchanged, since the adapter does not interpret network failures or
//! status codes itself.

use thiserror::Error;

/// Errors returned by the translators and by `RestAdapter`.
#[derive(Debug, Error)]
pub enum Error {
    /// The operation kind string is not one of the seven known kinds.
    #[error("unsupported operation kind `{0}`")]
    UnsupportedOperation(String),

    /// Pagination parameters outside the valid range: `page` is one-based
    /// and `per_page` must be positive.
    #[error("invalid pagination: page={page}, per_page={per_page} (both must be >= 1)")]
    InvalidPagination { page: u64, per_page: u64 },

    /// Header-count dialect: a list response arrived without the total-count
    /// header. The most common cause is the server not declaring it in
    /// `Access-Control-Expose-Headers`.
    #[error(
        "the `{header}` header is missing from the list response; \
         did the server declare it in Access-Control-Expose-Headers?"
    )]
    MissingPaginationMetadata { header: String },

    /// The total-count header was present but its last `/`-delimited segment
    /// is not an integer.
    #[error("could not parse a total from the `{header}` header value `{value}`")]
    MalformedCountHeader { header: String, value: String },

    /// A record is missing the field its id is derived from.
    #[error("record has no `{field}` field to derive its id from")]
    MissingRecordId { field: &'static str },

    /// The response body does not have the shape the operation kind requires.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A failure reported by the injected HTTP client, passed through as-is.
    #[error("{0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}
