use std::net::SocketAddr;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    FmtSubscriber::builder()
        .with_env_filter("mock_graph=debug")
        .init();

    let addr: SocketAddr = "127.0.0.1:3722".parse().unwrap();
    println!("Mock profile service on http://{addr}");
    mock_graph::run(addr).await;
}
