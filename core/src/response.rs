//! Response translation: raw HTTP response -> normalized `{data, total}`.
//!
//! # Design
//! Pure function, no I/O. The dialect decides where the pagination total and
//! the record ids come from; the operation decides the result shape. Nothing
//! is silently defaulted: a list response without its required metadata, or
//! a record without its id source, is an error surfaced to the caller.

use serde_json::Value;

use crate::dialect::Dialect;
use crate::error::Error;
use crate::http::HttpResponse;
use crate::types::{Operation, RecordSet, RestResponse};

/// Translate a raw response for the given operation into a normalized
/// result.
///
/// For `GET_MANY` this is called once per fanned-out response; each call
/// yields a single record which the entry point merges in input order.
pub fn parse_response(
    dialect: &Dialect,
    response: HttpResponse,
    operation: &Operation,
) -> Result<RestResponse, Error> {
    match operation {
        Operation::GetList(_) | Operation::GetManyReference { .. } => {
            parse_list(dialect, &response)
        }
        Operation::Create { data } => parse_created(data, &response),
        _ => Ok(RestResponse {
            data: RecordSet::One(identify_record(dialect, response.json)?),
            total: None,
        }),
    }
}

fn parse_list(dialect: &Dialect, response: &HttpResponse) -> Result<RestResponse, Error> {
    match dialect {
        Dialect::Enveloped { .. } => {
            let (items, total) = match &response.json {
                Value::Object(envelope) => {
                    let items = envelope
                        .get("results")
                        .and_then(Value::as_array)
                        .ok_or_else(|| {
                            Error::UnexpectedShape(
                                "list envelope has no `results` array".to_string(),
                            )
                        })?;
                    (items, envelope.get("count").and_then(Value::as_u64))
                }
                Value::Array(items) => (items, None),
                _ => {
                    return Err(Error::UnexpectedShape(
                        "list response is neither an envelope nor an array".to_string(),
                    ))
                }
            };
            let records = items
                .iter()
                .map(|item| identify_record(dialect, item.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RestResponse {
                data: RecordSet::Many(records),
                total,
            })
        }
        Dialect::CountHeader { header } => {
            let total = parse_count_header(response, header)?;
            let items = response.json.as_array().ok_or_else(|| {
                Error::UnexpectedShape("list response body is not an array".to_string())
            })?;
            Ok(RestResponse {
                data: RecordSet::Many(items.clone()),
                total: Some(total),
            })
        }
    }
}

/// Create responses echo only the server-assigned id; the submitted fields
/// are assumed unchanged and merged back into the result.
fn parse_created(submitted: &Value, response: &HttpResponse) -> Result<RestResponse, Error> {
    let mut record = submitted.as_object().cloned().unwrap_or_default();
    let id = response
        .json
        .get("id")
        .filter(|id| !id.is_null())
        .cloned()
        .ok_or(Error::MissingRecordId { field: "id" })?;
    record.insert("id".to_string(), id);
    Ok(RestResponse {
        data: RecordSet::One(Value::Object(record)),
        total: None,
    })
}

/// Apply the dialect's identity convention to one record.
///
/// Enveloped: the record's canonical `url` becomes its `id`. Non-object
/// bodies (a 204 delete, say) pass through untouched. Header-count: the
/// server-assigned `id` field is already in place.
fn identify_record(dialect: &Dialect, json: Value) -> Result<Value, Error> {
    match dialect {
        Dialect::Enveloped { .. } => match json {
            Value::Object(mut record) => {
                let id = record
                    .get("url")
                    .filter(|url| !url.is_null())
                    .cloned()
                    .ok_or(Error::MissingRecordId { field: "url" })?;
                record.insert("id".to_string(), id);
                Ok(Value::Object(record))
            }
            other => Ok(other),
        },
        Dialect::CountHeader { .. } => Ok(json),
    }
}

fn parse_count_header(response: &HttpResponse, header: &str) -> Result<u64, Error> {
    let value = response
        .header(header)
        .ok_or_else(|| Error::MissingPaginationMetadata {
            header: header.to_string(),
        })?;
    // "items 0-9/100" -> 100
    value
        .rsplit('/')
        .next()
        .and_then(|segment| segment.trim().parse().ok())
        .ok_or_else(|| Error::MalformedCountHeader {
            header: header.to_string(),
            value: value.to_string(),
        })
}
