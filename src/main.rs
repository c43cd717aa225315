use std::sync::Arc;
use textsum::{api, config, logging, processing::Summarizer, summarization};
use tokio::net::TcpListener;

/// Default listen port, matching the reference deployment.
const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() {
    config::init_config();
    logging::init_tracing();
    let service = Arc::new(Summarizer::new(summarization::get_summarization_client()));
    let app = api::create_router(service);

    let (listener, port) = bind_listener().await.expect("Failed to bind listener");
    tracing::info!("Listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app).await.unwrap();
}

async fn bind_listener() -> Result<(TcpListener, u16), std::io::Error> {
    use std::net::Ipv4Addr;

    let port = config::get_config().server_port.unwrap_or(DEFAULT_PORT);
    TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
        .await
        .map(|listener| (listener, port))
}
