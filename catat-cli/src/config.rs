use anyhow::{Context, Result};
use catat_core::ParserTables;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_catat_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub app: AppSection,
    pub storage: StorageSection,
    pub parser: ParserTables,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// IANA zone that "today" and "this month" are measured in
    pub timezone: String,
    pub log_level: String,
    /// Rows shown by `list` and `/list`
    pub list_limit: usize,
    /// Recent transactions shown in a report
    pub report_recent: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub data_file: PathBuf,
    pub archive_dir: PathBuf,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Jakarta".to_string(),
            log_level: "info".to_string(),
            list_limit: 10,
            report_recent: 5,
        }
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("finance-data.json"),
            archive_dir: PathBuf::from("archives"),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_catat_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    cfg.parser
        .validate()
        .with_context(|| format!("invalid [parser] in {}", p.display()))?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
