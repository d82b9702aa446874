//! Full lifecycle tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and exercises every adapter
//! operation over real HTTP with a reqwest-backed `HttpClient`. Covers both
//! dialects: the envelope convention (URL identity, `{results, count}`
//! lists) and the header-count convention (`Content-Range` totals).

use async_trait::async_trait;
use drf_core::{
    Dialect, Error, Filter, HttpClient, HttpMethod, HttpResponse, ListParams, Pagination,
    RecordSet, RequestOptions, RestAdapter, Sort, SortOrder,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Execute translated requests with reqwest. Non-2xx responses are returned
/// as data — the adapter does not interpret status codes.
struct ReqwestClient(reqwest::Client);

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, Error> {
        let mut request = match options.method {
            HttpMethod::Get => self.0.get(url),
            HttpMethod::Post => self.0.post(url),
            HttpMethod::Put => self.0.put(url),
            HttpMethod::Delete => self.0.delete(url),
        };
        if let Some(body) = &options.body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.clone());
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(Box::new(e)))?;
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(Box::new(e)))?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| Error::Transport(Box::new(e)))?
        };
        Ok(HttpResponse { headers, json })
    }
}

async fn spawn_server(count_header: bool) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if count_header {
            mock_server::run_count_header(listener).await.unwrap();
        } else {
            mock_server::run(listener).await.unwrap();
        }
    });
    format!("http://{addr}")
}

fn record(result: &RecordSet) -> &Value {
    match result {
        RecordSet::One(record) => record,
        RecordSet::Many(_) => panic!("expected a single record"),
    }
}

fn records(result: &RecordSet) -> &[Value] {
    match result {
        RecordSet::Many(records) => records,
        RecordSet::One(_) => panic!("expected a record list"),
    }
}

async fn seed(adapter: &RestAdapter<ReqwestClient>) {
    for (name, group) in [("Ada", 1), ("Grace", 2), ("Barbara", 1)] {
        adapter
            .create("users", json!({"name": name, "group": group}))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn envelope_lifecycle() {
    let base_url = spawn_server(false).await;
    let adapter = RestAdapter::new(
        &base_url,
        Dialect::enveloped(),
        ReqwestClient(reqwest::Client::new()),
    );

    // create merges the submitted fields with the server-assigned id
    let created = adapter
        .create("users", json!({"name": "Ada", "group": 1}))
        .await
        .unwrap();
    assert_eq!(
        *record(&created.data),
        json!({"name": "Ada", "group": 1, "id": 1})
    );

    adapter
        .create("users", json!({"name": "Grace", "group": 2}))
        .await
        .unwrap();
    adapter
        .create("users", json!({"name": "Barbara", "group": 1}))
        .await
        .unwrap();

    // paginated, sorted list with envelope total and URL identity
    let list = adapter
        .get_list(
            "users",
            ListParams {
                pagination: Some(Pagination { page: 1, per_page: 2 }),
                sort: Some(Sort {
                    field: "name".to_string(),
                    order: SortOrder::Asc,
                }),
                filter: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(list.total, Some(3));
    let page = records(&list.data);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["name"], "Ada");
    assert_eq!(page[0]["id"], "http://testserver/users/1/");

    // get_many accepts raw keys and full resource URLs interchangeably
    let many = adapter
        .get_many(
            "users",
            vec!["1".to_string(), "http://testserver/users/2/".to_string()],
        )
        .await
        .unwrap();
    let fetched = records(&many.data);
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0]["name"], "Ada");
    assert_eq!(fetched[1]["name"], "Grace");
    assert_eq!(fetched[1]["id"], "http://testserver/users/2/");

    // reference list: users belonging to group 1
    let referenced = adapter
        .get_many_reference("users", "group", "1", ListParams::default())
        .await
        .unwrap();
    assert_eq!(referenced.total, Some(2));

    // update echoes the changed record
    let updated = adapter
        .update("users", "2", json!({"name": "Grace H"}))
        .await
        .unwrap();
    assert_eq!(record(&updated.data)["name"], "Grace H");

    // delete, then confirm the list shrank
    adapter.delete("users", "3").await.unwrap();
    let list = adapter.get_list("users", ListParams::default()).await.unwrap();
    assert_eq!(list.total, Some(2));
}

#[tokio::test]
async fn count_header_lifecycle() {
    let base_url = spawn_server(true).await;
    let adapter = RestAdapter::new(
        &base_url,
        Dialect::count_header(),
        ReqwestClient(reqwest::Client::new()),
    );
    seed(&adapter).await;

    // total comes from Content-Range, not from the page length
    let list = adapter
        .get_list(
            "users",
            ListParams {
                pagination: Some(Pagination { page: 2, per_page: 1 }),
                sort: Some(Sort {
                    field: "name".to_string(),
                    order: SortOrder::Asc,
                }),
                filter: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(list.total, Some(3));
    let page = records(&list.data);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["name"], "Barbara");
    // server-assigned id, no URL synthesis
    assert_eq!(page[0]["id"], 3);

    // free-text search filter
    let found = adapter
        .get_list(
            "users",
            ListParams {
                filter: Some(Filter::Search("gra".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(found.total, Some(1));
    assert_eq!(records(&found.data)[0]["name"], "Grace");

    // fan-out over server-assigned ids
    let many = adapter
        .get_many("users", vec!["3".to_string(), "1".to_string()])
        .await
        .unwrap();
    let fetched = records(&many.data);
    assert_eq!(fetched[0]["name"], "Barbara");
    assert_eq!(fetched[1]["name"], "Ada");
    assert_eq!(many.total, None);
}
