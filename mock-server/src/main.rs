use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    // MOCK_STYLE=count-range serves bare-array lists with a Content-Range
    // header; anything else serves the {results, count} envelope.
    match std::env::var("MOCK_STYLE").as_deref() {
        Ok("count-range") => mock_server::run_count_header(listener).await,
        _ => mock_server::run(listener).await,
    }
}
