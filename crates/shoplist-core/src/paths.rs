use anyhow::Result;
use std::path::PathBuf;

const SHOPLIST_DIR: &str = ".shoplist";
const DB_FILE: &str = "shoplist.db";

/// Environment variable to override the data directory.
pub const SHOPLIST_DIR_ENV: &str = "SHOPLIST_DIR";

/// Resolve the data directory.
/// Priority: SHOPLIST_DIR env var > ~/.shoplist/
pub fn resolve_shoplist_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(SHOPLIST_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(SHOPLIST_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Ensure the data directory exists and return its path.
pub fn ensure_shoplist_dir() -> Result<PathBuf> {
    let dir = resolve_shoplist_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Ensure the data directory exists and return the database path
/// (~/.shoplist/shoplist.db) as a string.
pub fn ensure_database_path_string() -> Result<String> {
    Ok(ensure_shoplist_dir()?
        .join(DB_FILE)
        .to_string_lossy()
        .into_owned())
}
