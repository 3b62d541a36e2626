use std::sync::Arc;

use studyvault::config::Config;
use studyvault::relay::Relay;
use studyvault::router;
use studyvault::store::MongoStore;
use studyvault::transport::UdpTransport;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::load();

    // non-fatal: a disconnected store means the relay drops everything
    let store = Arc::new(MongoStore::connect(&config.mongodb_url).await);
    if !store.is_connected() {
        log::error!("running without a document store; submitted messages will be lost");
    }

    let relay = Relay::bind(config.relay_addr(), store)
        .await
        .expect("Failed to bind the relay UDP socket");
    tokio::spawn(relay.run());

    let transport = Arc::new(
        UdpTransport::connect(config.relay_addr()).expect("Failed to open the relay UDP client"),
    );
    let app = router::init_router(transport);

    let listener = tokio::net::TcpListener::bind(config.http_addr())
        .await
        .expect("Failed to bind the HTTP listener");
    log::info!("HTTP server listening on http://{}", config.http_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for the interrupt signal");
    log::info!("interrupt received, shutting down");
}
