/// A geographical position in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MapPointError {
    #[error("latitude out of range")]
    Latitude,
    #[error("longitude out of range")]
    Longitude,
}

impl MapPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn try_from_lat_lng(lat: f64, lng: f64) -> Result<Self, MapPointError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MapPointError::Latitude);
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(MapPointError::Longitude);
        }
        Ok(Self::new(lat, lng))
    }

    pub const fn lat(&self) -> f64 {
        self.lat
    }

    pub const fn lng(&self) -> f64 {
        self.lng
    }

    pub fn is_valid(&self) -> bool {
        Self::try_from_lat_lng(self.lat, self.lng).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_out_of_range_coordinates() {
        assert!(MapPoint::try_from_lat_lng(-32.94, -60.65).is_ok());
        assert_eq!(
            Err(MapPointError::Latitude),
            MapPoint::try_from_lat_lng(90.1, 0.0)
        );
        assert_eq!(
            Err(MapPointError::Longitude),
            MapPoint::try_from_lat_lng(0.0, -180.5)
        );
    }
}
