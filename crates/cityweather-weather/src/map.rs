//! Embedded map framing for a weather result.

use crate::types::Coordinates;

/// Rectangle framing the embedded map, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Box extending `margin` degrees in each direction from `center`.
    pub fn around(center: Coordinates, margin: f64) -> Self {
        Self {
            min_lon: center.lon - margin,
            min_lat: center.lat - margin,
            max_lon: center.lon + margin,
            max_lat: center.lat + margin,
        }
    }

    pub fn center(&self) -> Coordinates {
        Coordinates {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lon: (self.min_lon + self.max_lon) / 2.0,
        }
    }

    /// `min_lon,min_lat,max_lon,max_lat`
    pub fn to_query(&self) -> String {
        format!(
            "{:.4},{:.4},{:.4},{:.4}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

/// Builds OpenStreetMap embed URLs.
#[derive(Debug, Clone)]
pub struct MapEmbed {
    base_url: String,
    margin: f64,
}

impl MapEmbed {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.openstreetmap.org/export/embed.html";
    pub const DEFAULT_MARGIN: f64 = 0.1;

    pub fn new(base_url: impl Into<String>, margin: f64) -> Self {
        Self {
            base_url: base_url.into(),
            margin,
        }
    }

    pub fn bounding_box(&self, center: Coordinates) -> BoundingBox {
        BoundingBox::around(center, self.margin)
    }

    /// Embed URL framing `center` with a marker on it.
    pub fn url(&self, center: Coordinates) -> String {
        format!(
            "{}?bbox={}&layer=mapnik&marker={:.4},{:.4}",
            self.base_url,
            self.bounding_box(center).to_query(),
            center.lat,
            center.lon
        )
    }
}

impl Default for MapEmbed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL, Self::DEFAULT_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: Coordinates = Coordinates { lat: 48.85, lon: 2.35 };

    #[test]
    fn test_bounding_box_is_centered() {
        let bbox = BoundingBox::around(PARIS, 0.1);
        assert!((bbox.max_lon - bbox.min_lon - 0.2).abs() < 1e-9);
        assert!((bbox.max_lat - bbox.min_lat - 0.2).abs() < 1e-9);
        let center = bbox.center();
        assert!((center.lat - PARIS.lat).abs() < 1e-9);
        assert!((center.lon - PARIS.lon).abs() < 1e-9);
    }

    #[test]
    fn test_embed_url() {
        let url = MapEmbed::default().url(PARIS);
        assert_eq!(
            url,
            "https://www.openstreetmap.org/export/embed.html\
             ?bbox=2.2500,48.7500,2.4500,48.9500&layer=mapnik&marker=48.8500,2.3500"
        );
    }

    #[test]
    fn test_negative_coordinates() {
        let bbox = BoundingBox::around(Coordinates { lat: -33.87, lon: 151.21 }, 0.5);
        assert_eq!(bbox.to_query(), "150.7100,-34.3700,151.7100,-33.3700");
    }
}
