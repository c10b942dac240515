//! Geographic coordinate type.
//!
//! Routing never looks at coordinates; they are carried for the catalogue's
//! curvature statistic and for whoever draws the map.

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in metres (spherical law of cosines).
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        if self == other {
            return 0.0;
        }

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).abs().to_radians();

        // Rounding can push the cosine a hair outside [-1, 1].
        let cos_c = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * d_lon.cos())
            .clamp(-1.0, 1.0);
        cos_c.acos() * R
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
