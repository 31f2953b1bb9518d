//! Severe-weather alert classification
//!
//! Decides which alerts from the upstream feed (NWS active alerts, GeoJSON)
//! are relevant to the continental US. Alerts with geometry are judged by a
//! representative coordinate; alerts without geometry are judged by their
//! area description against the named-region table, and get an approximate
//! synthesized display point so the client can place a marker.

use serde::{Deserialize, Serialize};

pub mod regions;

pub use regions::{DEFAULT_DISPLAY_POINT, RegionTable};

/// Latitude/longitude rectangle
#[derive(Debug, Clone, Copy)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

/// Continental-scope rectangle for alert relevance (wider than the fire
/// bounding box, so coastal and border alerts survive)
pub const CONTINENTAL_US: GeoBounds = GeoBounds {
    lat_min: 20.0,
    lat_max: 50.0,
    lon_min: -130.0,
    lon_max: -60.0,
};

impl GeoBounds {
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lon_min..=self.lon_max).contains(&longitude)
    }
}

/// Upstream alert feed (GeoJSON FeatureCollection)
#[derive(Debug, Deserialize)]
pub struct AlertsResponse {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    pub properties: AlertProperties,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct AlertProperties {
    #[serde(default)]
    pub event: String,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub certainty: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    #[serde(rename = "areaDesc", default)]
    pub area_desc: String,
    pub effective: Option<String>,
    pub expires: Option<String>,
}

/// GeoJSON geometry, coordinates in [longitude, latitude] order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Vec<f64>),
    LineString(Vec<Vec<f64>>),
    Polygon(Vec<Vec<Vec<f64>>>),
    MultiPolygon(Vec<Vec<Vec<Vec<f64>>>>),
}

impl Geometry {
    /// One representative (latitude, longitude): a polygon's first ring's
    /// first vertex, a line's first point, or the point itself.
    #[must_use]
    pub fn representative_point(&self) -> Option<(f64, f64)> {
        let position = match self {
            Geometry::Point(p) => Some(p.as_slice()),
            Geometry::LineString(line) => line.first().map(Vec::as_slice),
            Geometry::Polygon(rings) => {
                rings.first().and_then(|ring| ring.first()).map(Vec::as_slice)
            }
            Geometry::MultiPolygon(polys) => polys
                .first()
                .and_then(|rings| rings.first())
                .and_then(|ring| ring.first())
                .map(Vec::as_slice),
        }?;
        match position {
            [lon, lat, ..] => Some((*lat, *lon)),
            _ => None,
        }
    }
}

/// Outcome of classifying one alert feature
#[derive(Debug)]
pub enum Classification {
    /// Relevant; carries the display geometry (synthesized when the feature
    /// had none)
    Included(Geometry),
    Excluded,
}

/// Decide whether an alert is relevant to the target region.
///
/// Test, practice and exercise events are always excluded. Features with
/// geometry are included when their representative point falls inside
/// `bounds`. Features without geometry are included when their area text
/// names a continental region and no excluded territory; the display point
/// is synthesized from the region table.
#[must_use]
pub fn classify(feature: &AlertFeature, bounds: &GeoBounds, regions: &RegionTable) -> Classification {
    let event = feature.properties.event.to_lowercase();
    if event.contains("test") || event.contains("practice") || event.contains("exercise") {
        return Classification::Excluded;
    }

    if let Some(geometry) = &feature.geometry {
        return match geometry.representative_point() {
            Some((lat, lon)) if bounds.contains(lat, lon) => {
                Classification::Included(geometry.clone())
            }
            _ => Classification::Excluded,
        };
    }

    let area = &feature.properties.area_desc;
    if regions.names_excluded_region(area) || !regions.names_continental_region(area) {
        return Classification::Excluded;
    }
    let (lat, lon) = synthesize_display_point(area, regions);
    Classification::Included(Geometry::Point(vec![lon, lat]))
}

/// Approximate (latitude, longitude) for an area description, falling back
/// to the fixed continental default when no table entry matches.
///
/// This places a marker; it is not a geocoding result.
#[must_use]
pub fn synthesize_display_point(area_desc: &str, regions: &RegionTable) -> (f64, f64) {
    regions.lookup(area_desc).unwrap_or(DEFAULT_DISPLAY_POINT)
}

/// One alert retained for the client
#[derive(Debug, Serialize)]
pub struct StormAlert {
    pub event: String,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub certainty: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub area_desc: String,
    pub effective: Option<String>,
    pub expires: Option<String>,
    /// Display geometry; `approximate` marks a synthesized point
    pub geometry: Geometry,
    pub approximate: bool,
}

impl StormAlert {
    /// Build the served alert from an included upstream feature, or `None`
    /// when the feature is excluded.
    #[must_use]
    pub fn from_feature(
        feature: AlertFeature,
        bounds: &GeoBounds,
        regions: &RegionTable,
    ) -> Option<Self> {
        let Classification::Included(geometry) = classify(&feature, bounds, regions) else {
            return None;
        };
        let approximate = feature.geometry.is_none();
        let p = feature.properties;
        Some(Self {
            event: p.event,
            severity: p.severity,
            urgency: p.urgency,
            certainty: p.certainty,
            headline: p.headline,
            description: p.description,
            instruction: p.instruction,
            area_desc: p.area_desc,
            effective: p.effective,
            expires: p.expires,
            geometry,
            approximate,
        })
    }
}
