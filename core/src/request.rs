//! Request translation: abstract operation -> URL(s) + HTTP options.
//!
//! # Design
//! Pure function, no I/O. `GET_MANY_REFERENCE` is `GET_LIST` with one extra
//! forced filter injected ahead of everything else, not a separate code
//! path. Query parameters are assembled in a fixed order — reference target,
//! `limit`/`offset`, `ordering`, then filter keys in their own order — so
//! identical input always yields a byte-identical URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::dialect::Dialect;
use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest, RequestOptions, RequestUrl};
use crate::types::{Filter, ListParams, Operation, SortOrder};

/// Everything except RFC 3986 unreserved characters is percent-encoded.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Translate an abstract operation into the request(s) to execute.
///
/// Returns an ordered list of URLs only for `GET_MANY`; every other kind
/// maps to exactly one URL. The dialect is consulted only for input-id
/// normalization, never for response concerns.
///
/// A list request with no query parameters yields `base/resource/` with no
/// trailing `?`.
pub fn build_request(
    base_url: &str,
    resource: &str,
    operation: &Operation,
    dialect: &Dialect,
) -> Result<HttpRequest, Error> {
    let base_url = base_url.trim_end_matches('/');

    let request = match operation {
        Operation::GetList(params) => list_request(base_url, resource, None, params)?,
        Operation::GetManyReference { target, id, params } => {
            list_request(base_url, resource, Some((target, id)), params)?
        }
        Operation::GetOne { id } => HttpRequest {
            url: RequestUrl::One(record_url(base_url, resource, id)),
            options: RequestOptions::default(),
        },
        Operation::GetMany { ids } => {
            let urls = ids
                .iter()
                .map(|id| record_url(base_url, resource, dialect.request_id(id)))
                .collect();
            HttpRequest {
                url: RequestUrl::Many(urls),
                options: RequestOptions::default(),
            }
        }
        Operation::Update { id, data } => HttpRequest {
            url: RequestUrl::One(record_url(base_url, resource, id)),
            options: RequestOptions {
                method: HttpMethod::Put,
                body: Some(serde_json::to_string(data)?),
            },
        },
        Operation::Create { data } => HttpRequest {
            url: RequestUrl::One(collection_url(base_url, resource)),
            options: RequestOptions {
                method: HttpMethod::Post,
                body: Some(serde_json::to_string(data)?),
            },
        },
        Operation::Delete { id } => HttpRequest {
            url: RequestUrl::One(record_url(base_url, resource, id)),
            options: RequestOptions {
                method: HttpMethod::Delete,
                body: None,
            },
        },
    };

    Ok(request)
}

fn collection_url(base_url: &str, resource: &str) -> String {
    format!("{base_url}/{resource}/")
}

fn record_url(base_url: &str, resource: &str, id: &str) -> String {
    format!("{base_url}/{resource}/{id}/")
}

fn list_request(
    base_url: &str,
    resource: &str,
    reference: Option<(&str, &str)>,
    params: &ListParams,
) -> Result<HttpRequest, Error> {
    let mut query: Vec<(String, String)> = Vec::new();

    if let Some((target, id)) = reference {
        query.push((target.to_string(), id.to_string()));
    }

    if let Some(pagination) = params.pagination {
        // page is one-based; the offset arithmetic below relies on it
        if pagination.page == 0 || pagination.per_page == 0 {
            return Err(Error::InvalidPagination {
                page: pagination.page,
                per_page: pagination.per_page,
            });
        }
        query.push(("limit".to_string(), pagination.per_page.to_string()));
        let offset = (pagination.page - 1) * pagination.per_page;
        query.push(("offset".to_string(), offset.to_string()));
    }

    if let Some(sort) = &params.sort {
        let ordering = match sort.order {
            SortOrder::Asc => sort.field.clone(),
            SortOrder::Desc => format!("-{}", sort.field),
        };
        query.push(("ordering".to_string(), ordering));
    }

    match &params.filter {
        Some(Filter::Fields(fields)) => {
            for (key, value) in fields {
                query.push((key.clone(), query_value(value)));
            }
        }
        Some(Filter::Search(term)) => query.push(("search".to_string(), term.clone())),
        None => {}
    }

    let url = if query.is_empty() {
        collection_url(base_url, resource)
    } else {
        format!("{}?{}", collection_url(base_url, resource), encode_query(&query))
    };

    Ok(HttpRequest {
        url: RequestUrl::One(url),
        options: RequestOptions::default(),
    })
}

/// Scalar rendering of a filter value: strings go in bare, everything else
/// uses its JSON form.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn encode_query(pairs: &[(String, String)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_ESCAPE),
                utf8_percent_encode(value, QUERY_ESCAPE)
            )
        })
        .collect();
    encoded.join("&")
}
