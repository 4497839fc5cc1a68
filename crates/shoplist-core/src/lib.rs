pub mod auth;
pub mod error;
pub mod models;
pub mod paths;
pub mod services;
pub mod storage;

pub use error::{Resource, ShopError};
pub use models::*;

use std::sync::Arc;
use storage::Storage;
use tracing::info;

/// Core application state shared by every request handler.
pub struct AppCore {
    pub storage: Arc<Storage>,
}

impl AppCore {
    pub async fn new(db_path: &str) -> anyhow::Result<Self> {
        let storage = Arc::new(Storage::new(db_path)?);

        info!(db_path, "Initializing shopping list core");

        Ok(Self { storage })
    }
}
