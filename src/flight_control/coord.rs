use std::fmt;

/// Mean Earth radius in kilometers, used by the haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in decimal degrees.
///
/// Latitude is bounded to `[-90, 90]`, longitude to `[-180, 180]`. The type
/// is a plain immutable value; all motion in the simulator is expressed by
/// producing new coordinates from old ones.
#[derive(Debug, PartialEq, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    lat: f64,
    /// Longitude in degrees, positive east.
    lon: f64,
}

impl Coordinate {
    /// Creates a new coordinate from raw degree values.
    ///
    /// # Arguments
    /// * `lat` - Latitude in degrees.
    /// * `lon` - Longitude in degrees.
    pub const fn new(lat: f64, lon: f64) -> Self { Self { lat, lon } }

    /// Returns the latitude in degrees.
    pub const fn lat(&self) -> f64 { self.lat }

    /// Returns the longitude in degrees.
    pub const fn lon(&self) -> f64 { self.lon }

    /// Checks that both components are finite and inside the valid
    /// latitude/longitude ranges. Request coordinates are rejected at the
    /// boundary when this is false.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Clamps the latitude and wraps the longitude back into the valid
    /// domain. Drift jitter applies this after every perturbation so the
    /// simulated position can never leave the globe.
    pub fn normalized(self) -> Self {
        Self {
            lat: self.lat.clamp(-90.0, 90.0),
            lon: wrap_degrees(self.lon),
        }
    }

    /// Great-circle distance to `other` in kilometers via the haversine
    /// formula.
    ///
    /// Symmetric and total: every pair of valid coordinates yields a finite
    /// non-negative distance.
    ///
    /// # Arguments
    /// * `other` - The coordinate to measure against.
    ///
    /// # Returns
    /// The distance in kilometers.
    pub fn distance_km(&self, other: &Self) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Initial great-circle bearing from `self` toward `to`, in degrees
    /// normalized into `[0, 360)`.
    ///
    /// # Arguments
    /// * `to` - The coordinate to point at.
    ///
    /// # Returns
    /// The bearing in degrees, `0` = north, increasing clockwise.
    pub fn bearing_degrees(&self, to: &Self) -> f64 {
        let d_lon = (to.lon - self.lon).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = to.lat.to_radians();
        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        let deg = y.atan2(x).to_degrees();
        ((deg % 360.0) + 360.0) % 360.0
    }

    /// Linear per-axis blend between `self` (`t = 0`) and `to` (`t = 1`).
    ///
    /// A straight blend in degree space, not a geodesic. `t` is clamped
    /// to `[0, 1]`.
    pub fn interpolate(&self, to: &Self, t: f64) -> Self {
        let r_t = t.clamp(0.0, 1.0);
        Self {
            lat: self.lat + (to.lat - self.lat) * r_t,
            lon: self.lon + (to.lon - self.lon) * r_t,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Creates a `Coordinate` from a `(lat, lon)` tuple.
    fn from(tuple: (f64, f64)) -> Self { Self::new(tuple.0, tuple.1) }
}

/// Sign-corrected modulo wrapping a longitude into `[-180, 180)`.
fn wrap_degrees(lon: f64) -> f64 {
    (((lon + 180.0) % 360.0) + 360.0) % 360.0 - 180.0
}
