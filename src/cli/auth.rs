use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::Config, error, spotify, success, types::PkceToken};

pub async fn auth(config: Arc<Config>, shared_state: Arc<Mutex<Option<PkceToken>>>) {
    match spotify::auth::auth(config, shared_state).await {
        Ok(_) => success!("You can now run spotfilter clean."),
        Err(e) => error!("{}", e),
    }
}
