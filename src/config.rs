//! Configuration management for vocabulary, domain limits, and collaborator
//! endpoints.

use std::{
   fs,
   path::{Path, PathBuf},
   sync::OnceLock,
};

use directories::BaseDirs;
use figment::{
   Figment,
   providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

static CONFIG: OnceLock<Config> = OnceLock::new();

pub const SQL_ROW_LIMIT_CAP: usize = 10_000;
pub const EXEC_DEFAULT_LIMIT_CAP: usize = 10_000;
pub const MAX_BBOX_AREA_CAP: f64 = 64_800.0;

/// Named geographic landmark mapped to a fixed latitude interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
   pub name:    String,
   pub min_lat: f64,
   pub max_lat: f64,
}

impl Landmark {
   fn new(name: &str, min_lat: f64, max_lat: f64) -> Self {
      Self { name: name.to_string(), min_lat, max_lat }
   }
}

/// Application configuration loaded from config file and environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
   pub api_key: String,

   /// Variable vocabulary in detection order.
   pub allowed_variables: Vec<String>,
   /// Landmark table in match order; the last matching entry wins.
   pub landmarks:         Vec<Landmark>,

   pub max_bbox_area_deg2: f64,
   pub max_date_years:     u32,
   pub sql_row_limit:      usize,
   pub exec_default_limit: usize,

   pub ollama_endpoint:    String,
   pub ollama_model:       String,
   pub ollama_temperature: f32,
   pub sql_endpoint:       String,
   pub retriever_k:        usize,

   pub request_timeout_secs: u64,
}

impl Default for Config {
   fn default() -> Self {
      Self {
         api_key: "dev-key".to_string(),
         allowed_variables: ["temperature", "salinity", "oxygen", "chlorophyll", "nitrate"]
            .map(str::to_string)
            .to_vec(),
         landmarks: vec![
            Landmark::new("equator", -5.0, 5.0),
            Landmark::new("tropic of cancer", 23.0, 25.0),
            Landmark::new("tropic of capricorn", -25.0, -23.0),
         ],
         max_bbox_area_deg2: 2000.0,
         max_date_years: 5,
         sql_row_limit: 100,
         exec_default_limit: 200,
         ollama_endpoint: "http://localhost:11434".to_string(),
         ollama_model: "llama3.1".to_string(),
         ollama_temperature: 0.0,
         sql_endpoint: String::new(),
         retriever_k: 5,
         request_timeout_secs: 60,
      }
   }
}

impl Config {
   pub fn load() -> Self {
      let config_path = ensure_global_config();
      Self::load_from(&config_path)
   }

   /// Loads config layered over a specific TOML file; env still wins.
   pub fn load_from(path: &Path) -> Self {
      Figment::from(Serialized::defaults(Self::default()))
         .merge(Toml::file(path))
         .merge(Env::prefixed("ARGOQL_").lowercase(true))
         .extract()
         .inspect_err(|e| tracing::warn!("failed to parse config: {e}"))
         .unwrap_or_default()
   }

   fn create_default_config(path: &Path) {
      if let Some(parent) = path.parent() {
         let _ = fs::create_dir_all(parent);
      }
      let default_config = Self::default();
      if let Ok(toml) = toml::to_string_pretty(&default_config) {
         let _ = fs::write(path, toml);
      }
   }

   pub fn effective_sql_row_limit(&self) -> usize {
      self.sql_row_limit.min(SQL_ROW_LIMIT_CAP).max(1)
   }

   pub fn effective_exec_default_limit(&self) -> usize {
      self.exec_default_limit.min(EXEC_DEFAULT_LIMIT_CAP).max(1)
   }

   pub fn effective_max_bbox_area_deg2(&self) -> f64 {
      self.max_bbox_area_deg2.min(MAX_BBOX_AREA_CAP)
   }
}

/// Returns the global configuration instance
pub fn get() -> &'static Config {
   CONFIG.get_or_init(Config::load)
}

/// Returns the base directory for argoql data and configuration
pub fn base_dir() -> &'static PathBuf {
   static ONCE: OnceLock<PathBuf> = OnceLock::new();
   ONCE.get_or_init(|| resolve_base_dir(".argoql"))
}

/// Returns the global config file path
pub fn config_file_path() -> &'static PathBuf {
   static ONCE: OnceLock<PathBuf> = OnceLock::new();
   ONCE.get_or_init(|| base_dir().join("config.toml"))
}

fn ensure_global_config() -> PathBuf {
   let config_path = config_file_path();
   if !config_path.exists() {
      Config::create_default_config(config_path);
   }
   config_path.to_path_buf()
}

pub fn validate_config(cfg: &Config) -> Result<()> {
   if cfg.allowed_variables.is_empty() {
      return Err(
         ConfigError::InvalidConfig("allowed_variables must not be empty".to_string()).into(),
      );
   }
   if cfg.sql_row_limit > SQL_ROW_LIMIT_CAP {
      return Err(
         ConfigError::InvalidConfig(format!(
            "sql_row_limit {} exceeds hard cap {}",
            cfg.sql_row_limit, SQL_ROW_LIMIT_CAP
         ))
         .into(),
      );
   }
   if cfg.exec_default_limit > EXEC_DEFAULT_LIMIT_CAP {
      return Err(
         ConfigError::InvalidConfig(format!(
            "exec_default_limit {} exceeds hard cap {}",
            cfg.exec_default_limit, EXEC_DEFAULT_LIMIT_CAP
         ))
         .into(),
      );
   }
   if cfg.max_bbox_area_deg2 > MAX_BBOX_AREA_CAP {
      return Err(
         ConfigError::InvalidConfig(format!(
            "max_bbox_area_deg2 {} exceeds hard cap {}",
            cfg.max_bbox_area_deg2, MAX_BBOX_AREA_CAP
         ))
         .into(),
      );
   }
   for landmark in &cfg.landmarks {
      if landmark.max_lat < landmark.min_lat {
         return Err(
            ConfigError::InvalidConfig(format!(
               "landmark {:?} has max_lat {} below min_lat {}",
               landmark.name, landmark.max_lat, landmark.min_lat
            ))
            .into(),
         );
      }
   }
   Ok(())
}

fn resolve_base_dir(dir_name: &str) -> PathBuf {
   BaseDirs::new()
      .map(|d| d.home_dir().join(dir_name))
      .or_else(|| {
         std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(dir_name))
      })
      .unwrap_or_else(|| {
         std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(dir_name)
      })
}
