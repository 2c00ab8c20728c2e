use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use comidita_core::gateways::{PhotoStorageGateway, PlacesGateway};
use comidita_db_sqlite::{run_embedded_database_migrations, Connections};
use comidita_gateways::{
    google_places::GooglePlaces, object_storage::ObjectStorage, photos_to_dir::PhotosToDir,
};
use comidita_webserver::{Gateways, RateLimitCfg};

use crate::config::{self, Config};

#[derive(Debug, Parser)]
#[command(version, about = "Restaurant reviews around Rosario")]
struct Args {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// URL to the database
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,
    /// Allow requests from any origin
    #[arg(long)]
    enable_cors: bool,
}

fn places_gateway(cfg: &config::Places) -> Option<Arc<dyn PlacesGateway + Send + Sync>> {
    let api_key = cfg.api_key.clone()?;
    let gateway = GooglePlaces {
        place_type: cfg.place_type.clone(),
        ..GooglePlaces::new(api_key, cfg.location, cfg.radius)
    };
    let gateway: Arc<dyn PlacesGateway + Send + Sync> = Arc::new(gateway);
    Some(gateway)
}

// Returns the local photo directory that needs to be served
fn photo_storage(
    cfg: &config::PhotoStorage,
) -> Result<(Arc<dyn PhotoStorageGateway + Send + Sync>, Option<PathBuf>)> {
    match cfg {
        config::PhotoStorage::Directory {
            dir,
            public_base_url,
        } => {
            let gateway = PhotosToDir::try_new(dir, public_base_url.clone())?;
            info!("Storing photos in {}", gateway.path().display());
            let dir = gateway.path().to_path_buf();
            let gateway: Arc<dyn PhotoStorageGateway + Send + Sync> = Arc::new(gateway);
            Ok((gateway, Some(dir)))
        }
        config::PhotoStorage::ObjectStorage {
            base_url,
            bucket,
            api_key,
        } => {
            let gateway = ObjectStorage {
                base_url: base_url.clone(),
                bucket: bucket
                    .clone()
                    .unwrap_or_else(|| comidita_gateways::object_storage::DEFAULT_BUCKET.into()),
                api_key: api_key.clone(),
            };
            info!("Storing photos in bucket '{}'", gateway.bucket);
            let gateway: Arc<dyn PhotoStorageGateway + Send + Sync> = Arc::new(gateway);
            Ok((gateway, None))
        }
    }
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    let mut cfg = Config::try_load_from_file_or_default(args.config.as_ref())?;
    if let Some(db_url) = args.db_url {
        cfg.db.conn_sqlite = db_url;
    }
    let Config {
        db,
        webserver,
        places,
        photos,
        auth,
    } = cfg;

    info!("Connecting to SQLite database {}", db.conn_sqlite);
    let connections = Connections::init(&db.conn_sqlite, db.conn_pool_size)?;
    run_embedded_database_migrations(connections.exclusive()?)?;

    let (photo_storage, photos_dir) = photo_storage(&photos.storage)?;
    let gateways = Gateways {
        places: places_gateway(&places),
        photos: photo_storage,
    };
    let web_cfg = comidita_webserver::Cfg {
        regions: places.regions,
        proxy_cache_ttl: places.cache_ttl,
        rate_limit: RateLimitCfg {
            max_requests: webserver.rate_limit.max_requests,
            window: webserver.rate_limit.window,
        },
        compression: photos.compression,
        jwt_secret: auth.jwt_secret,
        photos_dir,
        sweep_interval: webserver.sweep_interval,
        default_location: places.location,
    };
    let enable_cors = args.enable_cors || webserver.enable_cors;
    comidita_webserver::run(
        connections,
        enable_cors,
        web_cfg,
        gateways,
        env!("CARGO_PKG_VERSION"),
    )
    .await
}
