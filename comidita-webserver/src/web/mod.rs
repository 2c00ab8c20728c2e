use std::{path::PathBuf, sync::Arc, time::Duration};

use rocket::{
    config::Config as RocketCfg,
    data::{ByteUnit, Limits, ToByteUnit},
    figment::Figment,
    fs::FileServer,
    Rocket, Route,
};

use crate::core::{
    entities::{MapPoint, MAX_REVIEW_PHOTOS},
    gateways::{PhotoStorageGateway, PlacesGateway},
    util::{
        cache::ResponseCache,
        image::{CompressionOptions, MAX_IMAGE_FILE_SIZE},
        rate_limit::RateLimiter,
    },
};

pub mod api;
mod guards;
pub mod jwt;


#[derive(Debug, Clone)]
pub struct RateLimitCfg {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitCfg {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cfg {
    /// Search results are restricted to addresses
    /// containing one of these names.
    pub regions: Vec<String>,
    pub proxy_cache_ttl: Duration,
    pub rate_limit: RateLimitCfg,
    pub compression: CompressionOptions,
    pub jwt_secret: Option<String>,
    /// Local directory of uploaded photos served under `/photos`.
    pub photos_dir: Option<PathBuf>,
    pub sweep_interval: Duration,
    /// Position of new places whose coordinates are unknown.
    pub default_location: MapPoint,
}

pub struct Gateways {
    pub places: Option<Arc<dyn PlacesGateway + Send + Sync>>,
    pub photos: Arc<dyn PhotoStorageGateway + Send + Sync>,
}

/// Cached JSON bodies of the proxy routes.
pub(crate) type ProxyCache = ResponseCache<String>;

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: guards::Db,
    gateways: Gateways,
    cache: Arc<ProxyCache>,
    rate_limiter: Arc<RateLimiter>,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Gateways { places, photos } = gateways;

    let jwt_state = jwt::JwtState::new(cfg.jwt_secret.as_deref());
    if !jwt_state.is_enabled() {
        warn!("No JWT secret configured, all requests are anonymous");
    }

    let figment = match rocket_cfg {
        Some(cfg) => Figment::from(cfg),
        None => RocketCfg::figment(),
    };
    let r = rocket::custom(with_review_body_limit(figment));

    let photos_dir = cfg.photos_dir.clone();

    let mut instance = r
        .manage(db)
        .manage(jwt_state)
        .manage(guards::PlacesGw(places))
        .manage(guards::PhotoStorage(photos))
        .manage(cache)
        .manage(rate_limiter)
        .manage(cfg)
        .manage(guards::Version(version));

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    if let Some(dir) = photos_dir {
        info!("Serving photos from {}", dir.display());
        instance = instance.mount("/photos", FileServer::from(dir));
    }
    instance
}

/// Size of a review with the maximum number of base64 encoded
/// photos of maximum size.
fn review_body_limit() -> ByteUnit {
    let encoded_photo = (MAX_IMAGE_FILE_SIZE as u64).div_ceil(3) * 4;
    (encoded_photo * MAX_REVIEW_PHOTOS as u64).bytes() + 1.mebibytes()
}

// Configured limits are only ever raised
fn with_review_body_limit(figment: Figment) -> Figment {
    let limits = figment
        .extract_inner::<Limits>(RocketCfg::LIMITS)
        .unwrap_or_default();
    let json = limits
        .get("json")
        .map_or_else(review_body_limit, |limit| limit.max(review_body_limit()));
    debug!("Accepting JSON bodies of up to {json}");
    figment.merge((RocketCfg::LIMITS, limits.limit("json", json)))
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

// Expired cache entries and rate limit windows are only removed
// on access otherwise.
fn spawn_sweeper(cache: Arc<ProxyCache>, rate_limiter: Arc<RateLimiter>, interval: Duration) {
    rocket::tokio::spawn(async move {
        let mut ticker = rocket::tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let expired = cache.sweep();
            let windows = rate_limiter.sweep();
            debug!("Removed {expired} cached responses and {windows} rate limit windows");
        }
    });
}

pub async fn run(
    db: comidita_db_sqlite::Connections,
    enable_cors: bool,
    cfg: Cfg,
    gateways: Gateways,
    version: &'static str,
) -> anyhow::Result<()> {
    let cache = Arc::new(ProxyCache::new());
    let rate_limiter = Arc::new(RateLimiter::new());
    spawn_sweeper(
        Arc::clone(&cache),
        Arc::clone(&rate_limiter),
        cfg.sweep_interval,
    );
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
        version,
    };
    let instance = rocket_instance(options, db.into(), gateways, cache, rate_limiter);
    let server_task = if enable_cors {
        let cors = rocket_cors::CorsOptions::default().to_cors()?;
        instance.attach(cors).launch()
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        error!("Unable to run web server: {err}");
        return Err(anyhow::anyhow!("{err}"));
    }
    Ok(())
}
