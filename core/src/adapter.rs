//! The adapter entry point — the only component that performs I/O.
//!
//! # Design
//! `RestAdapter` is constructed once per base URL + dialect + HTTP client
//! triple and holds no mutable state. Each call translates the operation,
//! dispatches through the injected client, and translates the response back.
//! `GET_MANY` fans out into one concurrent call per id; the joined results
//! keep the input id order, and the first sub-call failure fails the whole
//! operation with no partial data.

use futures_util::future::try_join_all;
use serde_json::Value;
use tracing::debug;

use crate::dialect::Dialect;
use crate::error::Error;
use crate::http::{HttpClient, RequestUrl};
use crate::request::build_request;
use crate::response::parse_response;
use crate::types::{ListParams, Operation, RecordSet, RestResponse};

/// Maps abstract data-access operations onto a DRF-style REST backend.
pub struct RestAdapter<C> {
    base_url: String,
    dialect: Dialect,
    http: C,
}

impl<C: HttpClient> RestAdapter<C> {
    pub fn new(base_url: &str, dialect: Dialect, http: C) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            dialect,
            http,
        }
    }

    /// Execute one abstract operation against the named resource.
    pub async fn execute(
        &self,
        resource: &str,
        operation: Operation,
    ) -> Result<RestResponse, Error> {
        let request = build_request(&self.base_url, resource, &operation, &self.dialect)?;

        match &request.url {
            RequestUrl::One(url) => {
                debug!(resource, kind = %operation.kind(), %url, "dispatching request");
                let response = self.http.fetch(url, &request.options).await?;
                parse_response(&self.dialect, response, &operation)
            }
            RequestUrl::Many(urls) => {
                debug!(resource, calls = urls.len(), "fanning out GET_MANY");
                let calls = urls.iter().map(|url| self.http.fetch(url, &request.options));
                let responses = try_join_all(calls).await?;

                let mut records = Vec::with_capacity(responses.len());
                for response in responses {
                    match parse_response(&self.dialect, response, &operation)?.data {
                        RecordSet::One(record) => records.push(record),
                        RecordSet::Many(_) => {
                            return Err(Error::UnexpectedShape(
                                "fan-out response yielded a record list".to_string(),
                            ))
                        }
                    }
                }
                Ok(RestResponse {
                    data: RecordSet::Many(records),
                    total: None,
                })
            }
        }
    }

    pub async fn get_list(
        &self,
        resource: &str,
        params: ListParams,
    ) -> Result<RestResponse, Error> {
        self.execute(resource, Operation::GetList(params)).await
    }

    pub async fn get_one(&self, resource: &str, id: &str) -> Result<RestResponse, Error> {
        self.execute(resource, Operation::GetOne { id: id.to_string() }).await
    }

    pub async fn get_many(
        &self,
        resource: &str,
        ids: Vec<String>,
    ) -> Result<RestResponse, Error> {
        self.execute(resource, Operation::GetMany { ids }).await
    }

    pub async fn get_many_reference(
        &self,
        resource: &str,
        target: &str,
        id: &str,
        params: ListParams,
    ) -> Result<RestResponse, Error> {
        self.execute(
            resource,
            Operation::GetManyReference {
                target: target.to_string(),
                id: id.to_string(),
                params,
            },
        )
        .await
    }

    pub async fn create(&self, resource: &str, data: Value) -> Result<RestResponse, Error> {
        self.execute(resource, Operation::Create { data }).await
    }

    pub async fn update(
        &self,
        resource: &str,
        id: &str,
        data: Value,
    ) -> Result<RestResponse, Error> {
        self.execute(
            resource,
            Operation::Update {
                id: id.to_string(),
                data,
            },
        )
        .await
    }

    pub async fn delete(&self, resource: &str, id: &str) -> Result<RestResponse, Error> {
        self.execute(resource, Operation::Delete { id: id.to_string() }).await
    }
}
