use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─── Core pipeline types ─────────────────────────────────────────────────────

/// Geographic point in WGS84 decimal degrees, or unresolved when the geocoder
/// found no match. Both coordinates are absent together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Location {
    pub const UNRESOLVED: Location = Location { lat: None, lon: None };

    pub fn at(lat: f64, lon: f64) -> Self {
        Self { lat: Some(lat), lon: Some(lon) }
    }

    /// `(lat, lon)` when resolved.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinates().is_some()
    }
}

/// Yearly-aggregated daily irradiance statistics, in equivalent hours of peak
/// sun per day: per-month min/mean/max of the daily series, each averaged
/// across the calendar months of the reference year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HspStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl HspStats {
    pub const ZERO: HspStats = HspStats { min: 0.0, mean: 0.0, max: 0.0 };
}

/// One day of shortwave downward irradiance with its calendar month (1-12).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyIrradiance {
    pub month: u32,
    pub value: f64,
}

/// Sizing basis chosen from the yearly HSP statistics. `Min` sizes against the
/// worst month (conservative, larger array), `Max` against the best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    #[default]
    Min,
    Mean,
    Max,
}

impl Scenario {
    pub fn pick(&self, hsp: &HspStats) -> f64 {
        match self {
            Scenario::Min => hsp.min,
            Scenario::Mean => hsp.mean,
            Scenario::Max => hsp.max,
        }
    }
}

// ─── Sizing output ───────────────────────────────────────────────────────────

/// Array sizing result. A pure view over the session state and the request
/// parameters, recomputed on every call; nothing persists it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SizingResult {
    /// Peak power to install (kWp)
    pub peak_power_kwp: f64,
    /// Panels to install (fractional; rounding is a display concern)
    pub panel_count: f64,
    /// Expected monthly generation (MWh)
    pub monthly_generation_mwh: f64,
    /// Avoided emissions (ton CO2/MWh, negative = avoided)
    pub co2_offset_ton_mwh: f64,
    /// Consumption met during peak-sun hours (kWh)
    pub hsp_consumption_kwh: f64,
    /// Area-constrained layout, when a usable-area figure was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaLayout>,
}

impl SizingResult {
    /// Degenerate all-zero result: no valid irradiance, nothing to size.
    pub fn zero() -> Self {
        Self {
            peak_power_kwp: 0.0,
            panel_count: 0.0,
            monthly_generation_mwh: 0.0,
            co2_offset_ton_mwh: 0.0,
            hsp_consumption_kwh: 0.0,
            area: None,
        }
    }
}

/// Panel layout over a usable-area figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct AreaLayout {
    /// Theoretical panel count from area (fractional)
    pub theoretical_panel_count: f64,
    /// Captured area (m²)
    pub captured_area_m2: f64,
    /// Optimal tilt angle (degrees), latitude-based heuristic
    pub optimal_tilt_deg: f64,
    /// Inter-row spacing (m), shading-avoidance heuristic
    pub row_spacing_m: f64,
}

// ─── REST API request/response types ─────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationRequest {
    /// Free-text address to resolve
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationResponse {
    pub location: Location,
    pub hsp: HspStats,
    /// False when the geocoder found no match; the pipeline still runs with
    /// zero irradiance until a location is set
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceResponse {
    pub location: Location,
    pub hsp: HspStats,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConsumptionRequest {
    /// Raw reading as typed by the user (kWh over the billing period)
    pub reading: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConsumptionResponse {
    /// All readings, insertion-ordered
    pub readings: Vec<f64>,
    pub daily_average_kwh: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionCreatedResponse {
    pub session_id: String,
}

fn full_fraction() -> f64 {
    1.0
}

/// Query parameters for the sizing endpoint. Fractions default to 1.0 (all
/// generation injected, all consumption inside peak-sun hours).
#[derive(Debug, Deserialize, IntoParams)]
pub struct SizingQuery {
    /// Sizing basis: worst month, typical month, or best month
    #[serde(default)]
    pub scenario: Scenario,
    /// Fraction of generation injected to the grid, within [0, 1]
    #[serde(default = "full_fraction")]
    pub injection: f64,
    /// Fraction of consumption falling inside peak-sun hours, within [0, 1]
    #[serde(default = "full_fraction")]
    pub hsp_fraction: f64,
    /// Catalog panel identifier
    pub panel_id: String,
    /// Usable roof/ground area (m²)
    pub area: Option<f64>,
}

// ─── Nominatim wire types ────────────────────────────────────────────────────

/// One geocoder search hit. Nominatim serialises coordinates as strings.
#[derive(Debug, Deserialize)]
pub struct GeocodingHit {
    pub lat: String,
    pub lon: String,
}

// ─── NASA POWER wire types ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PowerApiResponse {
    pub properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
pub struct PowerProperties {
    pub parameter: PowerParameterSet,
}

/// Daily shortwave series keyed by `YYYYMMDD` date strings.
#[derive(Debug, Deserialize)]
pub struct PowerParameterSet {
    #[serde(rename = "ALLSKY_SFC_SW_DWN")]
    pub allsky_sfc_sw_dwn: BTreeMap<String, f64>,
}
