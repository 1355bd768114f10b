/// International foot in meters.
const FEET_TO_METERS: f64 = 0.3048;
/// One knot in meters per second.
const KNOTS_TO_MS: f64 = 0.51444;
/// Ratio assumed when a request carries none, roughly a clean airliner.
const DEFAULT_GLIDE_RATIO: f64 = 15.0;

#[derive(Debug, PartialEq, Eq, strum_macros::Display)]
pub enum GlideError {
    #[strum(to_string = "invalid or missing altitude/speed")]
    InvalidAltitudeOrSpeed,
    #[strum(to_string = "invalid glide ratio or speed")]
    InvalidGlideRatio,
}

impl std::error::Error for GlideError {}

/// Still-air glide figures for an engine-out descent. Echoes the inputs
/// next to the derived numbers so a reply is self-describing.
#[derive(Debug, Clone, Copy, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlideEstimate {
    altitude_ft: f64,
    speed_kts: f64,
    glide_ratio: f64,
    time_sec: u64,
    time_min: f64,
    glide_distance_km: f64,
}

impl GlideEstimate {
    pub fn time_sec(&self) -> u64 { self.time_sec }
    pub fn time_min(&self) -> f64 { self.time_min }
    pub fn glide_distance_km(&self) -> f64 { self.glide_distance_km }
    pub fn glide_ratio(&self) -> f64 { self.glide_ratio }
}

/// Computes how long and how far the aircraft can glide from `altitude_ft`
/// at `speed_kts`: descent rate is airspeed over glide ratio, time is
/// altitude over descent rate, distance is airspeed times time.
///
/// Altitude and speed must be positive finite numbers; the ratio defaults
/// to [`DEFAULT_GLIDE_RATIO`] and must leave a usable descent rate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate_glide(
    altitude_ft: f64,
    speed_kts: f64,
    glide_ratio: Option<f64>,
) -> Result<GlideEstimate, GlideError> {
    if altitude_ft <= 0.0
        || !altitude_ft.is_finite()
        || speed_kts <= 0.0
        || !speed_kts.is_finite()
    {
        return Err(GlideError::InvalidAltitudeOrSpeed);
    }
    let ratio = glide_ratio.unwrap_or(DEFAULT_GLIDE_RATIO);

    let altitude_m = altitude_ft * FEET_TO_METERS;
    let speed_ms = speed_kts * KNOTS_TO_MS;
    let descent_rate = speed_ms / ratio;
    if descent_rate <= 0.0 || !descent_rate.is_finite() {
        return Err(GlideError::InvalidGlideRatio);
    }

    let time_sec = altitude_m / descent_rate;
    let glide_distance_m = speed_ms * time_sec;
    Ok(GlideEstimate {
        altitude_ft,
        speed_kts,
        glide_ratio: ratio,
        time_sec: time_sec.round() as u64,
        time_min: round2(time_sec / 60.0),
        glide_distance_km: round2(glide_distance_m / 1000.0),
    })
}

fn round2(value: f64) -> f64 { (value * 100.0).round() / 100.0 }
