//! Data-provider adapter for Django-REST-Framework-style backends.
//!
//! # Overview
//! Translates a small abstract data-access contract (get-list, get-one,
//! get-many, get-many-by-reference, create, update, delete) into the REST
//! dialect spoken by DRF-convention backends: paginated list endpoints,
//! trailing-slash resource URLs, `limit`/`offset`/`ordering`/filter query
//! parameters, and either envelope-based or header-based total counts.
//!
//! # Design
//! - [`build_request`] and [`parse_response`] are pure functions; the only
//!   I/O happens in [`RestAdapter`] through the injected [`HttpClient`].
//! - The backend convention is a [`Dialect`] chosen once at construction:
//!   where the pagination total comes from, where record ids come from, and
//!   which input identifiers are tolerated.
//! - `GET_MANY` fans out into one concurrent HTTP call per id and merges
//!   the results back in input order, failing fast on the first sub-call
//!   failure.
//!
//! Authentication, retries, caching, and status-code interpretation are the
//! injected client's business, not the adapter's.

pub mod adapter;
pub mod dialect;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod types;

pub use adapter::RestAdapter;
pub use dialect::{extract_primary_key, Dialect, DEFAULT_COUNT_HEADER};
pub use error::Error;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RequestOptions, RequestUrl};
pub use request::build_request;
pub use response::parse_response;
pub use types::{
    Filter, ListParams, Operation, OperationKind, Pagination, RecordSet, RestResponse, Sort,
    SortOrder,
};
