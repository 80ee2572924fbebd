// src/utils/env.rs
use log::{debug, info};

/// Loads `.env` (or the file named by `ENV_FILE`) without overriding
/// variables that are already set.
pub fn load_env() {
    let result = match std::env::var("ENV_FILE") {
        Ok(path) => dotenv::from_filename(path),
        Err(_) => dotenv::dotenv(),
    };
    match result {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No env file loaded ({}); using process environment", e),
    }
}
