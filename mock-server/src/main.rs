use tokio::net::TcpListener;

/// Serves the canned routes for trying the client by hand, e.g.
/// `httpclient POST http://127.0.0.1:8080/form -d a=1`.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("MOCK_PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("mock-server listening on http://{addr} (routes: / /404 /lines /agent /search /form)");
    mock_server::run(listener).await
}
