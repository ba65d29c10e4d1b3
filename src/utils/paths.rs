use anyhow::{Result, anyhow};
use std::path::PathBuf;

pub fn get_todoit_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".todoit"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let todoit_dir = get_todoit_dir()?;
    Ok(todoit_dir.join("config.toml"))
}

pub fn get_store_path() -> Result<PathBuf> {
    let todoit_dir = get_todoit_dir()?;
    Ok(todoit_dir.join("store.json"))
}

pub fn get_logs_dir() -> Result<PathBuf> {
    let todoit_dir = get_todoit_dir()?;
    Ok(todoit_dir.join("logs"))
}

pub fn get_crash_log_path() -> Result<PathBuf> {
    let todoit_dir = get_todoit_dir()?;
    Ok(todoit_dir.join("crash.log"))
}
