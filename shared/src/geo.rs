use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Coordinate string used when no place name is known, e.g. "56.1304, -106.3468".
    pub fn label(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Axis-aligned geographic box, south-west to north-east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

/// Result of clamping a point into a [`GeoBounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    pub point: GeoPoint,
    /// True when the input lay outside the box on at least one axis.
    pub adjusted: bool,
}

impl GeoBounds {
    pub const fn new(south_west: GeoPoint, north_east: GeoPoint) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lon >= self.south_west.lon
            && point.lon <= self.north_east.lon
    }

    /// Constrain `point` to the nearest point inside the box. Each axis is
    /// clamped independently, so a violated axis lands exactly on the edge.
    pub fn clamp(&self, point: GeoPoint) -> Clamped {
        let lat = point.lat.clamp(self.south_west.lat, self.north_east.lat);
        let lon = point.lon.clamp(self.south_west.lon, self.north_east.lon);
        let clamped = GeoPoint::new(lat, lon);
        Clamped {
            point: clamped,
            adjusted: clamped != point,
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lon + self.north_east.lon) / 2.0,
        )
    }

    /// Leaflet-style `[[south, west], [north, east]]`.
    pub fn as_corners(&self) -> [[f64; 2]; 2] {
        [
            [self.south_west.lat, self.south_west.lon],
            [self.north_east.lat, self.north_east.lon],
        ]
    }
}

/// Box the map is locked to.
pub const CANADA_BOUNDS: GeoBounds = GeoBounds::new(
    GeoPoint::new(41.7, -141.0),
    GeoPoint::new(83.1, -52.6),
);

/// Initial view of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: GeoPoint,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub bounds: GeoBounds,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(56.1304, -106.3468),
            zoom: 4.0,
            min_zoom: 3.0,
            max_zoom: 12.0,
            bounds: CANADA_BOUNDS,
        }
    }
}
