use duration_str::deserialize_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("comidita.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
    pub places: Option<Places>,
    pub photos: Option<Photos>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u32,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: bool,
    #[serde(deserialize_with = "deserialize_duration")]
    pub sweep_interval: Duration,
    pub rate_limit: RateLimit,
}

impl Default for WebServer {
    fn default() -> Self {
        Config::default()
            .webserver
            .expect("Webserver configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RateLimit {
    pub max_requests: u32,
    #[serde(deserialize_with = "deserialize_duration")]
    pub window: Duration,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Places {
    pub regions: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
    #[serde(rename = "type")]
    pub place_type: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub cache_ttl: Duration,
}

impl Default for Places {
    fn default() -> Self {
        Config::default().places.expect("Places configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Photos {
    pub storage: PhotoStorage,
    pub max_width: u32,
    pub max_height: u32,
    /// Target size of compressed photos in bytes
    pub max_size: usize,
}

impl Default for Photos {
    fn default() -> Self {
        Config::default().photos.expect("Photos configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhotoStorage {
    Directory,
    ObjectStorage,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub directory: Option<Directory>,
    pub object_storage: Option<ObjectStorage>,
}

impl Default for Gateway {
    fn default() -> Self {
        Config::default().gateway.expect("Gateway configuration")
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Directory {
    pub dir: PathBuf,
    pub public_base_url: String,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectStorage {
    pub base_url: String,
    pub bucket: Option<String>,
}
