use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Panel datasheet ─────────────────────────────────────────────────────────

/// Photovoltaic module datasheet at STC (1000 W/m², 25 °C, AM 1.5).
/// Loaded once from the catalog; immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PanelSpec {
    /// Manufacturer model identifier
    pub id: String,
    /// Rated power at the maximum power point (W)
    pub pmax_w: f64,
    /// MPP voltage (V)
    pub vmp_v: f64,
    /// MPP current (A)
    pub imp_a: f64,
    /// Open-circuit voltage (V)
    pub voc_v: f64,
    /// Short-circuit current (A)
    pub isc_a: f64,
    /// Module area (m²)
    pub area_m2: f64,
    /// Module height (m)
    pub height_m: f64,
    /// Module width (m)
    pub width_m: f64,
    /// Frame thickness (m)
    pub thickness_m: f64,
    /// Annual power degradation (fraction per year)
    pub degradation_rate: f64,
    /// Module weight (kg)
    pub weight_kg: f64,
}

// ─── Inverter datasheet ──────────────────────────────────────────────────────

/// Grid-tied inverter datasheet. Served by the catalog for selection UIs;
/// array sizing consumes panel data only — no inverter-matching step exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InverterSpec {
    /// Manufacturer model identifier
    pub id: String,
    /// MPPT window lower bound (V)
    pub vmpp_min_v: f64,
    /// MPPT window upper bound (V)
    pub vmpp_max_v: f64,
    /// Nominal DC voltage (V)
    pub vnom_v: f64,
    /// DC start-up voltage (V)
    pub vstart_v: f64,
    /// Rated DC power (kWp)
    pub rated_dc_power_kwp: f64,
    /// Rated AC output power (W)
    pub rated_ac_power_w: f64,
    /// Maximum current per MPPT input (A)
    pub imax_mppt_a: f64,
    /// Maximum DC short-circuit current (A)
    pub imax_dc_a: f64,
    /// Nominal AC output current (A)
    pub inom_out_a: f64,
    /// Maximum AC output current (A)
    pub iout_max_a: f64,
    /// Nominal AC voltage (V)
    pub vnom_ac_v: f64,
    /// Grid frequency (Hz)
    pub frequency_hz: f64,
    /// Rated power factor (cos φ)
    pub power_factor: f64,
    /// Unit weight (kg)
    pub weight_kg: f64,
}
