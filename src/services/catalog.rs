/// Static equipment catalog
///
/// Fixed set of panel and inverter datasheets keyed by model identifier.
/// Pure and infallible; callers select entries by id. The inverter table is
/// served over the API for selection UIs but is not consumed by the sizing
/// engine.
use std::collections::HashMap;

use crate::models::equipment::{InverterSpec, PanelSpec};

pub fn panels() -> HashMap<String, PanelSpec> {
    HashMap::from([(
        "JAM72D40-590/LB".to_string(),
        PanelSpec {
            id: "JAM72D40-590/LB".to_string(),
            pmax_w: 590.0,
            vmp_v: 43.4,
            imp_a: 13.59,
            voc_v: 52.0,
            isc_a: 14.35,
            area_m2: 2.65,
            height_m: 2.333,
            width_m: 1.134,
            thickness_m: 0.03,
            degradation_rate: 0.004,
            weight_kg: 32.5,
        },
    )])
}

pub fn inverters() -> HashMap<String, InverterSpec> {
    HashMap::from([(
        "S5-GC60K-LV".to_string(),
        InverterSpec {
            id: "S5-GC60K-LV".to_string(),
            vmpp_min_v: 180.0,
            vmpp_max_v: 1000.0,
            vnom_v: 450.0,
            vstart_v: 195.0,
            rated_dc_power_kwp: 60.0,
            rated_ac_power_w: 60000.0,
            imax_mppt_a: 256.0,
            imax_dc_a: 320.0,
            inom_out_a: 157.5,
            iout_max_a: 157.5,
            vnom_ac_v: 220.0,
            frequency_hz: 60.0,
            power_factor: 0.99,
            weight_kg: 89.0,
        },
    )])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_non_empty() {
        assert!(!panels().is_empty());
        assert!(!inverters().is_empty());
    }

    #[test]
    fn test_panel_lookup_by_id() {
        let panels = panels();
        let panel = panels.get("JAM72D40-590/LB").expect("known panel");
        assert_eq!(panel.pmax_w, 590.0);
        assert_eq!(panel.area_m2, 2.65);
    }

    #[test]
    fn test_panel_electrical_values_are_positive() {
        for panel in panels().values() {
            assert!(panel.pmax_w > 0.0);
            assert!(panel.vmp_v > 0.0);
            assert!(panel.imp_a > 0.0);
            assert!(panel.area_m2 > 0.0);
        }
    }

    #[test]
    fn test_inverter_mppt_window_is_ordered() {
        for inv in inverters().values() {
            assert!(inv.vmpp_min_v < inv.vmpp_max_v);
            assert!(inv.vnom_v >= inv.vmpp_min_v && inv.vnom_v <= inv.vmpp_max_v);
        }
    }
}
