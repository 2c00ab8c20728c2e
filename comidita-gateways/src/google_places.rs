use anyhow::Result;
use comidita_core::{
    entities::MapPoint,
    gateways::{FoundPlace, PlacesGateway},
};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DETAIL_FIELDS: &str =
    "name,formatted_address,geometry,formatted_phone_number,website,rating,user_ratings_total";

/// Client of the Google Places web service.
#[derive(Debug, Clone)]
pub struct GooglePlaces {
    pub api_key: String,
    pub base_url: String,
    /// Center of the search area.
    pub location: MapPoint,
    /// Search radius in meters.
    pub radius: u32,
    pub place_type: String,
}

impl GooglePlaces {
    pub fn new(api_key: String, location: MapPoint, radius: u32) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            location,
            radius,
            place_type: "restaurant".to_owned(),
        }
    }

    fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}/{path}/json", self.base_url.trim_end_matches('/'));
        let client = reqwest::blocking::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Places provider responded with HTTP status {status}");
        }
        Ok(response.text()?)
    }
}

#[derive(Debug, Deserialize, thiserror::Error)]
#[error("Places provider returned status {status}: {}", .error_message.as_deref().unwrap_or("no details"))]
struct StatusError {
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    formatted_address: String,
    geometry: Option<Geometry>,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    price_level: Option<u8>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<PlaceResult> for FoundPlace {
    fn from(from: PlaceResult) -> Self {
        let PlaceResult {
            place_id,
            name,
            formatted_address,
            geometry,
            rating,
            user_ratings_total,
            price_level,
            types,
        } = from;
        let pos = geometry.and_then(|g| {
            MapPoint::try_from_lat_lng(g.location.lat, g.location.lng)
                .inspect_err(|err| log::debug!("Ignoring position of place {place_id}: {err}"))
                .ok()
        });
        Self {
            place_id,
            name,
            formatted_address,
            pos,
            rating,
            user_ratings_total,
            price_level,
            types,
        }
    }
}

fn check_status(status: &str, error_message: Option<String>) -> Result<()> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        _ => Err(StatusError {
            status: status.to_owned(),
            error_message,
        }
        .into()),
    }
}

fn parse_text_search(json: &str) -> Result<Vec<FoundPlace>> {
    let TextSearchResponse {
        status,
        error_message,
        results,
    } = serde_json::from_str(json)?;
    check_status(&status, error_message)?;
    Ok(results.into_iter().map(FoundPlace::from).collect())
}

fn check_details(json: &str) -> Result<()> {
    let StatusError {
        status,
        error_message,
    } = serde_json::from_str(json)?;
    check_status(&status, error_message)
}

impl PlacesGateway for GooglePlaces {
    fn text_search(&self, query: &str) -> Result<Vec<FoundPlace>> {
        let location = format!("{},{}", self.location.lat(), self.location.lng());
        let radius = self.radius.to_string();
        let json = self.get(
            "textsearch",
            &[
                ("query", query),
                ("location", &location),
                ("radius", &radius),
                ("type", &self.place_type),
            ],
        )?;
        let places = parse_text_search(&json)?;
        log::debug!("Found {} places for '{query}'", places.len());
        Ok(places)
    }

    fn place_details(&self, place_id: &str) -> Result<String> {
        let json = self.get(
            "details",
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        )?;
        check_details(&json)?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text_search_results() {
        let json = r#"{
          "status": "OK",
          "results": [
            {
              "place_id": "ChIJ1",
              "name": "El Cairo",
              "formatted_address": "Santa Fe 1102, S2000 Rosario, Santa Fe, Argentina",
              "geometry": { "location": { "lat": -32.9468, "lng": -60.6393 } },
              "rating": 4.4,
              "user_ratings_total": 8123,
              "price_level": 2,
              "types": ["restaurant", "food"]
            },
            {
              "place_id": "ChIJ2",
              "name": "Sin datos"
            }
          ]
        }"#;
        let places = parse_text_search(json).unwrap();
        assert_eq!(2, places.len());
        assert_eq!("ChIJ1", places[0].place_id);
        assert_eq!(Some(MapPoint::new(-32.9468, -60.6393)), places[0].pos);
        assert_eq!(Some(8123), places[0].user_ratings_total);
        assert_eq!(vec!["restaurant", "food"], places[0].types);
        assert_eq!("", places[1].formatted_address);
        assert!(places[1].pos.is_none());
    }

    #[test]
    fn zero_results_is_not_an_error() {
        let places = parse_text_search(r#"{"status":"ZERO_RESULTS","results":[]}"#).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn reject_error_status() {
        let err = parse_text_search(
            r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid."}"#,
        )
        .unwrap_err();
        assert_eq!(
            "Places provider returned status REQUEST_DENIED: The provided API key is invalid.",
            err.to_string()
        );
        assert!(check_details(r#"{"status":"INVALID_REQUEST"}"#).is_err());
        assert!(check_details(r#"{"status":"OK","result":{"name":"El Cairo"}}"#).is_ok());
    }
}
