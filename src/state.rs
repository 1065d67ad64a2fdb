// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::fs;

use crate::{
    config::Config,
    store::{StoreError, Stores},
    utils::qr_token::QrTokenRotator,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub stores: Arc<Stores>,
    pub qr: Arc<QrTokenRotator>,
}

impl AppState {
    /// Creates the data and uploads directories and opens the stores.
    ///
    /// The QR token starts fresh; call [`QrTokenRotator::spawn_rotation`]
    /// to keep it rotating.
    pub async fn new(config: Config) -> Result<Self, StoreError> {
        for dir in [&config.data_dir, &config.uploads_dir] {
            fs::create_dir_all(dir).await.map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(Self {
            stores: Arc::new(Stores::open(&config.data_dir)),
            qr: Arc::new(QrTokenRotator::new()),
            config,
        })
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<Stores> {
    fn from_ref(state: &AppState) -> Self {
        state.stores.clone()
    }
}

impl FromRef<AppState> for Arc<QrTokenRotator> {
    fn from_ref(state: &AppState) -> Self {
        state.qr.clone()
    }
}
