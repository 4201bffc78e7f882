use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::Config, error, info, server, warning};

pub async fn serve(config: Arc<Config>) {
    info!(
        "Serving on http://{} (log in at /login)",
        config.server_addr
    );
    warning!("Single-user mode: every visitor acts as the last account that logged in.");

    if let Err(e) = server::start_api_server(config, Arc::new(Mutex::new(None))).await {
        error!("{}", e);
    }
}
