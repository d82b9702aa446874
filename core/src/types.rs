//! Operation kinds, per-kind parameters, and normalized result shapes.
//!
//! # Design
//! `Operation` bundles a kind together with exactly the parameters that kind
//! accepts, so a mismatched combination cannot be constructed. The wire names
//! used by calling frameworks (`GET_LIST`, `GET_MANY_REFERENCE`, ...) are
//! still accepted through `OperationKind::from_str`, which is where an
//! unknown kind fails fast.
//!
//! Records are `serde_json::Value` objects: the adapter is resource-agnostic
//! and never inspects record fields beyond the id source.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// The seven abstract data-access operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    GetList,
    GetOne,
    GetMany,
    GetManyReference,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// The wire name used by calling frameworks.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::GetList => "GET_LIST",
            OperationKind::GetOne => "GET_ONE",
            OperationKind::GetMany => "GET_MANY",
            OperationKind::GetManyReference => "GET_MANY_REFERENCE",
            OperationKind::Create => "CREATE",
            OperationKind::Update => "UPDATE",
            OperationKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "GET_LIST" => Ok(OperationKind::GetList),
            "GET_ONE" => Ok(OperationKind::GetOne),
            "GET_MANY" => Ok(OperationKind::GetMany),
            "GET_MANY_REFERENCE" => Ok(OperationKind::GetManyReference),
            "CREATE" => Ok(OperationKind::Create),
            "UPDATE" => Ok(OperationKind::Update),
            "DELETE" => Ok(OperationKind::Delete),
            other => Err(Error::UnsupportedOperation(other.to_string())),
        }
    }
}

/// One-based page selection. `offset` is computed as
/// `(page - 1) * per_page`; the request translator rejects `page == 0` and
/// `per_page == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

/// List filtering: either field/value pairs merged verbatim into the query
/// string (in their own order), or a free-text term sent as `search`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Fields(Vec<(String, Value)>),
    Search(String),
}

/// Parameters shared by `GetList` and `GetManyReference`.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub pagination: Option<Pagination>,
    pub sort: Option<Sort>,
    pub filter: Option<Filter>,
}

/// An abstract operation together with its parameters.
#[derive(Debug, Clone)]
pub enum Operation {
    GetList(ListParams),
    GetOne { id: String },
    GetMany { ids: Vec<String> },
    GetManyReference { target: String, id: String, params: ListParams },
    Create { data: Value },
    Update { id: String, data: Value },
    Delete { id: String },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::GetList(_) => OperationKind::GetList,
            Operation::GetOne { .. } => OperationKind::GetOne,
            Operation::GetMany { .. } => OperationKind::GetMany,
            Operation::GetManyReference { .. } => OperationKind::GetManyReference,
            Operation::Create { .. } => OperationKind::Create,
            Operation::Update { .. } => OperationKind::Update,
            Operation::Delete { .. } => OperationKind::Delete,
        }
    }
}

/// The record payload of a normalized result: one record for single-resource
/// operations, an ordered sequence for list-shaped ones.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSet {
    One(Value),
    Many(Vec<Value>),
}

/// Normalized result returned to the calling framework.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    pub data: RecordSet,
    pub total: Option<u64>,
}
