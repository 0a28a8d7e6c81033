/// PV array sizing engine
///
/// Pure functions from (scenario irradiance, consumption, usage fractions,
/// panel datasheet) to the sizing result set. No internal state; idempotent
/// for identical inputs. Zero or invalid irradiance degenerates to an
/// all-zero result instead of dividing by zero.
use crate::models::equipment::PanelSpec;
use crate::models::sizing::{AreaLayout, SizingResult};

/// Grid emission factor: avoided tons of CO2 per MWh generated.
const CO2_TON_PER_MWH: f64 = 0.367;

/// Treat the spacing denominator as singular below this magnitude.
const SPACING_EPS: f64 = 1e-6;

/// Size the array for one scenario.
///
/// # Arguments
///
/// * 'escenario' - chosen HSP statistic (min/mean/max) used as sizing basis
/// * 'daily_consumption_kwh' - daily average consumption from the ledger
/// * 'grid_injection' - fraction of generation injected to the grid, [0, 1]
/// * 'hsp_fraction' - fraction of consumption inside peak-sun hours, [0, 1]
/// * 'panel' - selected panel datasheet
/// * 'usable_area_m2' - optional usable-area figure for the layout block
/// * 'latitude_deg' - site latitude, required for tilt and row spacing
pub fn size(
    escenario: f64,
    daily_consumption_kwh: f64,
    grid_injection: f64,
    hsp_fraction: f64,
    panel: &PanelSpec,
    usable_area_m2: Option<f64>,
    latitude_deg: Option<f64>,
) -> SizingResult {
    // Unresolved location or degenerate irradiance: nothing to size. The
    // negated comparison also routes NaN into the zero result.
    if !(escenario > 0.0) {
        return SizingResult::zero();
    }

    let peak_power_kwp = daily_consumption_kwh * hsp_fraction * grid_injection / escenario;

    // Panel count intentionally scales by the injection fraction only; the
    // peak-power figure above also carries the HSP fraction.
    let panel_count = 1000.0 * (daily_consumption_kwh * grid_injection / escenario) / panel.pmax_w;

    // Panel-equivalent count of the installed peak power.
    let panel_equivalents = 1000.0 * peak_power_kwp / panel.pmax_w;
    let monthly_generation_mwh = panel.pmax_w * escenario * panel_equivalents * 30.0 / 1e6;

    let area = match (usable_area_m2, latitude_deg) {
        (Some(area_m2), Some(lat)) => Some(area_layout(area_m2, panel, lat)),
        _ => None,
    };

    SizingResult {
        peak_power_kwp,
        panel_count,
        monthly_generation_mwh,
        co2_offset_ton_mwh: -CO2_TON_PER_MWH * monthly_generation_mwh,
        hsp_consumption_kwh: daily_consumption_kwh * hsp_fraction,
        area,
    }
}

/// Lay panels over a usable-area figure.
///
/// Tilt is the latitude-based heuristic `3.7 + (0.69·lat + 4)`, rounded to
/// whole degrees. Row spacing is `0.21 / atan(61 − lat)`; at latitudes near
/// 61° the denominator crosses zero and the spacing degenerates to 0 rather
/// than blowing up.
pub fn area_layout(usable_area_m2: f64, panel: &PanelSpec, latitude_deg: f64) -> AreaLayout {
    let theoretical_panel_count = usable_area_m2 / panel.area_m2;
    let captured_area_m2 = theoretical_panel_count * panel.area_m2;

    let optimal_tilt_deg = (3.7 + (0.69 * latitude_deg + 4.0)).round();

    let denominator = (61.0 - latitude_deg).atan();
    let row_spacing_m = if denominator.abs() < SPACING_EPS {
        0.0
    } else {
        0.21 / denominator
    };

    AreaLayout {
        theoretical_panel_count,
        captured_area_m2,
        optimal_tilt_deg,
        row_spacing_m,
    }
}
