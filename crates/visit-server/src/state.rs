//! Application State

use std::sync::Arc;

use visit_core::{JsonFileStore, VisitStore};
use visit_qr::QrGenerator;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration (base URL, allow-list, paths)
    pub config: Arc<ServerConfig>,

    /// Visit counters
    pub store: Arc<dyn VisitStore>,

    /// QR image writer
    pub qr: Arc<QrGenerator>,
}

impl AppState {
    /// Wire the file-backed store and QR generator from `config`
    pub fn from_config(config: ServerConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(config.data_file.clone()));
        let qr = Arc::new(QrGenerator::new(config.qr_codes_dir.clone()));

        Self {
            config: Arc::new(config),
            store,
            qr,
        }
    }
}
