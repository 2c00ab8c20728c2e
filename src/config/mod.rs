use anyhow::{anyhow, Result};
use comidita_core::{entities::MapPoint, util::image::CompressionOptions};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "comidita.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
const ENV_NAME_PUBLIC_MAPS_API_KEY: &str = "PUBLIC_GOOGLE_MAPS_API_KEY";
const ENV_NAME_JWT_SECRET: &str = "AUTH_JWT_SECRET";
const ENV_NAME_STORAGE_API_KEY: &str = "STORAGE_API_KEY";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub places: Places,
    pub photos: Photos,
    pub auth: Auth,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        Self::try_from_raw_with_env(raw_config, |name| env::var(name).ok())
    }

    fn try_from_raw_with_env<F>(raw_config: raw::Config, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| var(name).filter(|v| !v.trim().is_empty());
        let raw::Config {
            db,
            webserver,
            places,
            photos,
            gateway,
        } = raw_config;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();
        let db = Db {
            conn_sqlite: var(ENV_NAME_DB_URL).unwrap_or(connection_sqlite),
            conn_pool_size: connection_pool_size,
        };

        let raw::WebServer {
            cors,
            sweep_interval,
            rate_limit,
        } = webserver.unwrap_or_default();
        let raw::RateLimit {
            max_requests,
            window,
        } = rate_limit;
        if max_requests == 0 {
            return Err(anyhow!("The rate limit must allow at least one request"));
        }
        if sweep_interval.is_zero() {
            return Err(anyhow!("The sweep interval must not be zero"));
        }
        let webserver = WebServer {
            enable_cors: cors,
            sweep_interval,
            rate_limit: RateLimit {
                max_requests,
                window,
            },
        };

        let raw::Places {
            regions,
            latitude,
            longitude,
            radius,
            place_type,
            cache_ttl,
        } = places.unwrap_or_default();
        let location = MapPoint::try_from_lat_lng(latitude, longitude).map_err(|err| {
            anyhow!("Invalid search location ({latitude}, {longitude}): {err}")
        })?;
        let regions = regions
            .into_iter()
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty())
            .collect::<Vec<_>>();
        if regions.is_empty() {
            return Err(anyhow!("No search regions defined"));
        }
        let api_key = var(ENV_NAME_MAPS_API_KEY).or_else(|| {
            let key = var(ENV_NAME_PUBLIC_MAPS_API_KEY)?;
            log::warn!(
                "Using the client-side API key {ENV_NAME_PUBLIC_MAPS_API_KEY}, \
                 set {ENV_NAME_MAPS_API_KEY} instead"
            );
            Some(key)
        });
        if api_key.is_none() {
            log::warn!("No Google Maps API key found");
        }
        let places = Places {
            api_key,
            regions,
            location,
            radius,
            place_type,
            cache_ttl,
        };

        let raw::Photos {
            storage,
            max_width,
            max_height,
            max_size,
        } = photos.unwrap_or_default();
        let gateway = gateway.unwrap_or_default();
        let storage = match storage {
            raw::PhotoStorage::Directory => {
                let raw::Directory {
                    dir,
                    public_base_url,
                } = gateway
                    .directory
                    .ok_or_else(|| anyhow!("Missing 'directory' gateway configuration"))?;
                PhotoStorage::Directory {
                    dir,
                    public_base_url,
                }
            }
            raw::PhotoStorage::ObjectStorage => {
                let raw::ObjectStorage { base_url, bucket } =
                    gateway.object_storage.ok_or_else(|| {
                        anyhow!("Missing 'object-storage' gateway configuration")
                    })?;
                let api_key = var(ENV_NAME_STORAGE_API_KEY).ok_or_else(|| {
                    anyhow!("Missing {ENV_NAME_STORAGE_API_KEY} for the object storage")
                })?;
                PhotoStorage::ObjectStorage {
                    base_url,
                    bucket,
                    api_key,
                }
            }
        };
        let compression = CompressionOptions {
            max_width,
            max_height,
            max_size_bytes: max_size,
            ..Default::default()
        };
        let photos = Photos {
            storage,
            compression,
        };

        let jwt_secret = var(ENV_NAME_JWT_SECRET);
        if jwt_secret.is_none() {
            log::warn!("No {ENV_NAME_JWT_SECRET} found, reviews cannot be submitted");
        }
        let auth = Auth { jwt_secret };

        Ok(Self {
            db,
            webserver,
            places,
            photos,
            auth,
        })
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u32,
}

pub struct WebServer {
    pub enable_cors: bool,
    pub sweep_interval: Duration,
    pub rate_limit: RateLimit,
}

pub struct RateLimit {
    pub max_requests: u32,
    pub window: Duration,
}

pub struct Places {
    pub api_key: Option<String>,
    /// Lower case names that must be part of the address
    pub regions: Vec<String>,
    pub location: MapPoint,
    /// Search radius in meters
    pub radius: u32,
    pub place_type: String,
    pub cache_ttl: Duration,
}

pub struct Photos {
    pub storage: PhotoStorage,
    pub compression: CompressionOptions,
}

pub enum PhotoStorage {
    /// For local setups, the photos are served by the webserver.
    Directory {
        dir: PathBuf,
        public_base_url: String,
    },
    ObjectStorage {
        base_url: String,
        bucket: Option<String>,
        api_key: String,
    },
}

pub struct Auth {
    pub jwt_secret: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::try_from_raw_with_env(raw::Config::default(), |name| vars.get(name).cloned())
    }

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let _: Config = Config::try_load_from_file_or_default(file).unwrap();
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = load(&[]).unwrap();
        assert_eq!("comidita.db", cfg.db.conn_sqlite);
        assert_eq!(100, cfg.webserver.rate_limit.max_requests);
        assert_eq!(vec!["rosario", "santa fe"], cfg.places.regions);
        assert_eq!(50_000, cfg.places.radius);
        assert!(cfg.places.api_key.is_none());
        assert!(cfg.auth.jwt_secret.is_none());
        assert_eq!(800, cfg.photos.compression.max_width);
        assert!(matches!(
            cfg.photos.storage,
            PhotoStorage::Directory { ref public_base_url, .. } if public_base_url == "/photos"
        ));
    }

    #[test]
    fn override_with_environment() {
        let cfg = load(&[
            (ENV_NAME_DB_URL, "/var/lib/comidita/db.sqlite"),
            (ENV_NAME_MAPS_API_KEY, "server-key"),
            (ENV_NAME_PUBLIC_MAPS_API_KEY, "client-key"),
            (ENV_NAME_JWT_SECRET, "secret"),
        ])
        .unwrap();
        assert_eq!("/var/lib/comidita/db.sqlite", cfg.db.conn_sqlite);
        assert_eq!(Some("server-key"), cfg.places.api_key.as_deref());
        assert_eq!(Some("secret"), cfg.auth.jwt_secret.as_deref());
    }

    #[test]
    fn fall_back_to_public_api_key() {
        let cfg = load(&[
            (ENV_NAME_MAPS_API_KEY, " "),
            (ENV_NAME_PUBLIC_MAPS_API_KEY, "client-key"),
        ])
        .unwrap();
        assert_eq!(Some("client-key"), cfg.places.api_key.as_deref());
    }

    #[test]
    fn reject_zero_sweep_interval() {
        let mut raw_config = raw::Config::default();
        raw_config.webserver = Some(raw::WebServer {
            sweep_interval: Duration::ZERO,
            ..Default::default()
        });
        let err = Config::try_from_raw_with_env(raw_config, |_| None)
            .err()
            .unwrap();
        assert!(err.to_string().contains("sweep interval"));

        let mut raw_config = raw::Config::default();
        raw_config.webserver = Some(raw::WebServer {
            sweep_interval: Duration::from_secs(1),
            ..Default::default()
        });
        assert!(Config::try_from_raw_with_env(raw_config, |_| None).is_ok());
    }

    #[test]
    fn object_storage_requires_api_key() {
        let mut raw_config = raw::Config::default();
        raw_config.photos = Some(raw::Photos {
            storage: raw::PhotoStorage::ObjectStorage,
            ..Default::default()
        });
        let no_vars = |_: &str| None;
        assert!(Config::try_from_raw_with_env(raw_config, no_vars).is_err());

        let mut raw_config = raw::Config::default();
        raw_config.photos = Some(raw::Photos {
            storage: raw::PhotoStorage::ObjectStorage,
            ..Default::default()
        });
        let cfg = Config::try_from_raw_with_env(raw_config, |name| {
            (name == ENV_NAME_STORAGE_API_KEY).then(|| "storage-key".to_string())
        })
        .unwrap();
        assert!(matches!(
            cfg.photos.storage,
            PhotoStorage::ObjectStorage { ref api_key, .. } if api_key == "storage-key"
        ));
    }
}
