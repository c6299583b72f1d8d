use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::http::create_app;
use crate::lifecycle::LifecycleManager;
use crate::local_store::LocalStore;
use crate::store::BookingStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod availability;
mod configuration;
mod configuration_handler;
mod decision;
mod error;
mod http;
mod lifecycle;
mod local_store;
mod store;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
struct AppState<S: BookingStore> {
    manager: LifecycleManager<S>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("#########################");
    println!("# Kite Booking Backend  #");
    println!("#########################");

    let configuration = ConfigurationHandler::parse_arguments();

    let store = match LocalStore::open(configuration.data_file()) {
        Ok(store) => store,
        Err(err) => {
            error!(?err, "Failed to open the booking store");
            std::process::exit(1);
        }
    };
    let state = AppState {
        manager: LifecycleManager::new(store),
    };

    let address = format!("0.0.0.0:{}", configuration.port());
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap();
    info!("Accessible at: {address}");

    axum::serve(listener, create_app(state)).await.unwrap();
}
