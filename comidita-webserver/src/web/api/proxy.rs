//! Thin proxies to the places provider.
//!
//! Both routes are rate limited per client and keep the
//! JSON bodies of successful upstream responses in memory.

use std::{io::Cursor, time::Duration};

use rocket::{
    http::ContentType,
    response::Response,
    tokio::task::spawn_blocking,
    Request,
};

use super::*;
use crate::core::util::{rate_limit::RateLimiter, search::sanitize_search_query};

const MISSING_API_KEY: &str = "Google Maps API key not configured";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheState {
    Hit,
    Miss,
}

impl CacheState {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

#[derive(Debug)]
pub struct ProxyResponse {
    status: Status,
    body: String,
    cache: Option<(CacheState, Duration)>,
    remaining: Option<u32>,
}

impl ProxyResponse {
    fn ok(body: String, cache: CacheState, ttl: Duration) -> Self {
        Self {
            status: Status::Ok,
            body,
            cache: Some((cache, ttl)),
            remaining: None,
        }
    }

    fn error(status: Status, error: &str) -> Self {
        Self::error_with_code(status, error, None)
    }

    fn error_with_code(status: Status, error: &str, code: Option<&str>) -> Self {
        let body = json::ProxyError {
            error: error.to_owned(),
            code: code.map(ToOwned::to_owned),
        };
        let body = serde_json::to_string(&body).unwrap_or_else(|err| {
            error!("Failed to serialize error response: {err}");
            String::new()
        });
        Self {
            status,
            body,
            cache: None,
            remaining: None,
        }
    }

    fn rate_limit_exceeded() -> Self {
        Self {
            remaining: Some(0),
            ..Self::error_with_code(
                Status::TooManyRequests,
                "Rate limit exceeded",
                Some("RATE_LIMIT_EXCEEDED"),
            )
        }
    }

    fn with_remaining(mut self, remaining: u32) -> Self {
        self.remaining = Some(remaining);
        self
    }
}

impl<'r> Responder<'r, 'static> for ProxyResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let Self {
            status,
            body,
            cache,
            remaining,
        } = self;
        let mut res = Response::build();
        res.status(status).header(ContentType::JSON);
        if let Some((state, ttl)) = cache {
            res.raw_header("X-Cache", state.as_str());
            res.raw_header(
                "Cache-Control",
                format!("public, max-age={}", ttl.as_secs()),
            );
        }
        if let Some(remaining) = remaining {
            res.raw_header("X-RateLimit-Remaining", remaining.to_string());
        }
        res.sized_body(body.len(), Cursor::new(body)).ok()
    }
}

fn check_rate_limit(
    limiter: &RateLimiter,
    cfg: &Cfg,
    client: &ClientId,
) -> result::Result<u32, ProxyResponse> {
    let status = limiter.check(
        &client.0,
        cfg.rate_limit.max_requests,
        cfg.rate_limit.window,
    );
    if status.allowed {
        Ok(status.remaining)
    } else {
        warn!("Rate limit of client {} exceeded", client.0);
        Err(ProxyResponse::rate_limit_exceeded())
    }
}

#[get("/places/search?<q>")]
pub async fn get_places_search(
    client: ClientId,
    cfg: &State<Cfg>,
    limiter: &State<Arc<RateLimiter>>,
    cache: &State<Arc<ProxyCache>>,
    places: &State<PlacesGw>,
    q: Option<String>,
) -> ProxyResponse {
    let remaining = match check_rate_limit(limiter, cfg, &client) {
        Ok(remaining) => remaining,
        Err(res) => return res,
    };
    search_places(cfg, cache, places, q.as_deref().unwrap_or_default())
        .await
        .with_remaining(remaining)
}

async fn search_places(
    cfg: &Cfg,
    cache: &ProxyCache,
    places: &PlacesGw,
    q: &str,
) -> ProxyResponse {
    if q.trim().is_empty() {
        return ProxyResponse::error(Status::BadRequest, "Query parameter is required");
    }
    let query = sanitize_search_query(q);
    if query.is_empty() {
        return ProxyResponse::error(
            Status::BadRequest,
            "Query contains no searchable characters",
        );
    }
    let Some(gateway) = places.0.clone() else {
        return ProxyResponse::error(Status::InternalServerError, MISSING_API_KEY);
    };
    let ttl = cfg.proxy_cache_ttl;
    let key = format!("search:{query}");
    if let Some(body) = cache.get(&key) {
        return ProxyResponse::ok(body, CacheState::Hit, ttl);
    }
    let regions = cfg.regions.clone();
    let found = spawn_blocking(move || {
        usecases::search_external_places(&*gateway, &query, &regions)
    })
    .await;
    let results = match found {
        Ok(Ok(results)) => results,
        Ok(Err(err)) => {
            error!("Error searching places: {err:#}");
            return ProxyResponse::error(Status::InternalServerError, "Failed to search places");
        }
        Err(err) => {
            error!("Search task failed: {err}");
            return ProxyResponse::error(Status::InternalServerError, "Failed to search places");
        }
    };
    let results = json::SearchResults {
        results: results.into_iter().map(to_json::found_place).collect(),
    };
    match serde_json::to_string(&results) {
        Ok(body) => {
            cache.set(key, body.clone(), ttl);
            ProxyResponse::ok(body, CacheState::Miss, ttl)
        }
        Err(err) => {
            error!("Failed to serialize search results: {err}");
            ProxyResponse::error(Status::InternalServerError, "Failed to search places")
        }
    }
}

#[get("/places/details?<place_id>")]
pub async fn get_places_details(
    client: ClientId,
    cfg: &State<Cfg>,
    limiter: &State<Arc<RateLimiter>>,
    cache: &State<Arc<ProxyCache>>,
    places: &State<PlacesGw>,
    place_id: Option<String>,
) -> ProxyResponse {
    let remaining = match check_rate_limit(limiter, cfg, &client) {
        Ok(remaining) => remaining,
        Err(res) => return res,
    };
    place_details(cfg, cache, places, place_id.unwrap_or_default())
        .await
        .with_remaining(remaining)
}

async fn place_details(
    cfg: &Cfg,
    cache: &ProxyCache,
    places: &PlacesGw,
    place_id: String,
) -> ProxyResponse {
    let place_id = place_id.trim().to_owned();
    if place_id.is_empty() {
        return ProxyResponse::error(Status::BadRequest, "Place ID is required");
    }
    let Some(gateway) = places.0.clone() else {
        return ProxyResponse::error(Status::InternalServerError, MISSING_API_KEY);
    };
    let ttl = cfg.proxy_cache_ttl;
    let key = format!("details:{place_id}");
    if let Some(body) = cache.get(&key) {
        return ProxyResponse::ok(body, CacheState::Hit, ttl);
    }
    let details =
        spawn_blocking(move || usecases::external_place_details(&*gateway, &place_id)).await;
    match details {
        Ok(Ok(body)) => {
            cache.set(key, body.clone(), ttl);
            ProxyResponse::ok(body, CacheState::Miss, ttl)
        }
        Ok(Err(err)) => {
            error!("Error fetching place details: {err:#}");
            ProxyResponse::error(
                Status::InternalServerError,
                "Failed to fetch place details",
            )
        }
        Err(err) => {
            error!("Place details task failed: {err}");
            ProxyResponse::error(
                Status::InternalServerError,
                "Failed to fetch place details",
            )
        }
    }
}
