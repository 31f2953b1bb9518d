//! Named-region coordinate table for alerts without geometry
//!
//! Maps area-description substrings to an approximate display coordinate.
//! Entries are matched in order, so metro and county names must precede
//! the broader state names they overlap with. This is a data asset: extend
//! the table, not the matching code.

/// One substring → coordinate mapping, matched case-insensitively
#[derive(Debug, Clone, Copy)]
pub struct RegionEntry {
    pub pattern: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Prioritized substring → coordinate table
#[derive(Debug, Clone)]
pub struct RegionTable {
    entries: Vec<RegionEntry>,
    excluded: Vec<&'static str>,
}

/// Geographic center of the contiguous US; the fallback display point when
/// no table entry matches an included alert.
pub const DEFAULT_DISPLAY_POINT: (f64, f64) = (39.8283, -98.5795);

impl Default for RegionTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN_REGIONS.to_vec(),
            excluded: EXCLUDED_REGIONS.to_vec(),
        }
    }
}

impl RegionTable {
    /// First entry whose pattern occurs in the (lowercased) area text
    #[must_use]
    pub fn lookup(&self, area_text: &str) -> Option<(f64, f64)> {
        let text = area_text.to_lowercase();
        self.entries
            .iter()
            .find(|e| text.contains(e.pattern))
            .map(|e| (e.latitude, e.longitude))
    }

    /// Whether the area text names a known continental state or region
    #[must_use]
    pub fn names_continental_region(&self, area_text: &str) -> bool {
        self.lookup(area_text).is_some()
    }

    /// Whether the area text names a non-continental region
    #[must_use]
    pub fn names_excluded_region(&self, area_text: &str) -> bool {
        let text = area_text.to_lowercase();
        self.excluded.iter().any(|r| text.contains(r))
    }
}

const EXCLUDED_REGIONS: &[&str] = &[
    "alaska",
    "hawaii",
    "puerto rico",
    "virgin islands",
    "guam",
    "american samoa",
];

macro_rules! region {
    ($pattern:literal, $lat:literal, $lon:literal) => {
        RegionEntry {
            pattern: $pattern,
            latitude: $lat,
            longitude: $lon,
        }
    };
}

/// Metros and counties first, then states.
const BUILTIN_REGIONS: &[RegionEntry] = &[
    // Metro areas
    region!("seattle", 47.6062, -122.3321),
    region!("portland", 45.5152, -122.6784),
    region!("san francisco", 37.7749, -122.4194),
    region!("bay area", 37.8272, -122.2913),
    region!("sacramento", 38.5816, -121.4944),
    region!("los angeles", 34.0522, -118.2437),
    region!("san diego", 32.7157, -117.1611),
    region!("las vegas", 36.1699, -115.1398),
    region!("phoenix", 33.4484, -112.0740),
    region!("tucson", 32.2226, -110.9747),
    region!("albuquerque", 35.0844, -106.6504),
    region!("salt lake", 40.7608, -111.8910),
    region!("boise", 43.6150, -116.2023),
    region!("denver", 39.7392, -104.9903),
    region!("dallas", 32.7767, -96.7970),
    region!("fort worth", 32.7555, -97.3308),
    region!("houston", 29.7604, -95.3698),
    region!("austin", 30.2672, -97.7431),
    region!("san antonio", 29.4241, -98.4936),
    region!("el paso", 31.7619, -106.4850),
    region!("oklahoma city", 35.4676, -97.5164),
    region!("tulsa", 36.1540, -95.9928),
    region!("kansas city", 39.0997, -94.5786),
    region!("st. louis", 38.6270, -90.1994),
    region!("minneapolis", 44.9778, -93.2650),
    region!("chicago", 41.8781, -87.6298),
    region!("detroit", 42.3314, -83.0458),
    region!("indianapolis", 39.7684, -86.1581),
    region!("columbus", 39.9612, -82.9988),
    region!("cleveland", 41.4993, -81.6944),
    region!("cincinnati", 39.1031, -84.5120),
    region!("pittsburgh", 40.4406, -79.9959),
    region!("nashville", 36.1627, -86.7816),
    region!("memphis", 35.1495, -90.0490),
    region!("new orleans", 29.9511, -90.0715),
    region!("atlanta", 33.7490, -84.3880),
    region!("charlotte", 35.2271, -80.8431),
    region!("miami", 25.7617, -80.1918),
    region!("tampa", 27.9506, -82.4572),
    region!("orlando", 28.5384, -81.3789),
    region!("jacksonville", 30.3322, -81.6557),
    region!("washington, dc", 38.9072, -77.0369),
    region!("district of columbia", 38.9072, -77.0369),
    region!("baltimore", 39.2904, -76.6122),
    region!("philadelphia", 39.9526, -75.1652),
    region!("new york city", 40.7128, -74.0060),
    region!("boston", 42.3601, -71.0589),
    // States (approximate centroids)
    region!("washington", 47.4009, -121.4905),
    region!("oregon", 44.5720, -122.0709),
    region!("california", 36.1162, -119.6816),
    region!("nevada", 38.3135, -117.0554),
    region!("idaho", 44.2405, -114.4788),
    region!("montana", 46.9219, -110.4544),
    region!("wyoming", 42.7560, -107.3025),
    region!("utah", 40.1500, -111.8624),
    region!("colorado", 39.0598, -105.3111),
    region!("arizona", 33.7298, -111.4312),
    region!("new mexico", 34.8405, -106.2485),
    region!("north dakota", 47.5289, -99.7840),
    region!("south dakota", 44.2998, -99.4388),
    region!("nebraska", 41.1254, -98.2681),
    region!("kansas", 38.5266, -96.7265),
    region!("oklahoma", 35.5653, -96.9289),
    region!("texas", 31.0545, -97.5635),
    region!("minnesota", 45.6945, -93.9002),
    region!("iowa", 42.0115, -93.2105),
    region!("missouri", 38.4561, -92.2884),
    region!("arkansas", 34.9697, -92.3731),
    region!("louisiana", 31.1695, -91.8678),
    region!("wisconsin", 44.2685, -89.6165),
    region!("illinois", 40.3495, -88.9861),
    region!("mississippi", 32.7416, -89.6787),
    region!("michigan", 43.3266, -84.5361),
    region!("indiana", 39.8494, -86.2583),
    region!("kentucky", 37.6681, -84.6701),
    region!("tennessee", 35.7478, -86.6923),
    region!("alabama", 32.8067, -86.7911),
    region!("ohio", 40.3888, -82.7649),
    region!("georgia", 33.0406, -83.6431),
    region!("florida", 27.7663, -81.6868),
    region!("south carolina", 33.8569, -80.9450),
    region!("north carolina", 35.6301, -79.8064),
    region!("virginia", 37.7693, -78.1700),
    region!("west virginia", 38.4912, -80.9545),
    region!("maryland", 39.0639, -76.8021),
    region!("delaware", 39.3185, -75.5071),
    region!("pennsylvania", 40.5908, -77.2098),
    region!("new jersey", 40.2989, -74.5210),
    region!("new york", 42.1657, -74.9481),
    region!("connecticut", 41.5978, -72.7554),
    region!("rhode island", 41.6809, -71.5118),
    region!("massachusetts", 42.2302, -71.5301),
    region!("vermont", 44.0459, -72.7107),
    region!("new hampshire", 43.4525, -71.5639),
    region!("maine", 44.6939, -69.3819),
];
