/// Solar resource estimator
///
/// Turns a resolved location into yearly HSP statistics. One full reference
/// year of daily shortwave downward irradiance is requested from a NASA
/// POWER-style collaborator, grouped by calendar month, reduced to per-month
/// min/mean/max, and each statistic is then averaged across the months.
/// Averaging per-month extremes instead of taking the global min/max of all
/// 365 days smooths single-day anomalies while keeping seasonal variation,
/// which is what worst-month sizing needs.
use std::fmt;
use std::fmt::Formatter;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;

use crate::config::IrradianceConfig;
use crate::models::sizing::{DailyIrradiance, HspStats, Location, PowerApiResponse};

const IRRADIANCE_PARAMETER: &str = "ALLSKY_SFC_SW_DWN";

#[derive(Debug)]
pub struct IrradianceError(pub String);
impl fmt::Display for IrradianceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "IrradianceError: {}", self.0)
    }
}
impl From<reqwest::Error> for IrradianceError {
    fn from(e: reqwest::Error) -> Self {
        IrradianceError(e.to_string())
    }
}
impl From<serde_json::Error> for IrradianceError {
    fn from(e: serde_json::Error) -> Self {
        IrradianceError(e.to_string())
    }
}

/// Fetch the reference-year daily series and reduce it to HSP statistics.
///
/// An unresolved location short-circuits to zero statistics without touching
/// the collaborator; the rest of the pipeline keeps running on zeros until an
/// address resolves. Provider and decode failures propagate.
pub async fn fetch_hsp(
    cfg: &IrradianceConfig,
    location: &Location,
) -> Result<HspStats, IrradianceError> {
    let Some((lat, lon)) = location.coordinates() else {
        return Ok(HspStats::ZERO);
    };

    let year = cfg.reference_year;
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| IrradianceError(format!("invalid reference year {}", year)))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| IrradianceError(format!("invalid reference year {}", year)))?;

    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    let resp = client
        .get(&cfg.base_url)
        .query(&[
            ("parameters", IRRADIANCE_PARAMETER.to_string()),
            ("community", cfg.community.clone()),
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("start", start.format("%Y%m%d").to_string()),
            ("end", end.format("%Y%m%d").to_string()),
            ("format", "JSON".to_string()),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(IrradianceError(format!("irradiance provider answered {}", status)));
    }

    let body: PowerApiResponse = resp.json().await?;
    Ok(hsp_from_daily(&daily_series(body)))
}

/// Flatten the wire response into month-labelled rows, dropping the
/// provider's fill values (-999.0 marks days without data).
fn daily_series(resp: PowerApiResponse) -> Vec<DailyIrradiance> {
    resp.properties
        .parameter
        .allsky_sfc_sw_dwn
        .into_iter()
        .filter_map(|(date, value)| {
            let month = date.get(4..6)?.parse::<u32>().ok()?;
            (value >= 0.0).then_some(DailyIrradiance { month, value })
        })
        .collect()
}

/// Group-by-month reduction: 12 buckets, each reduced to min/mean/max, then
/// those statistics averaged across the months that have data. Months with no
/// valid sample are excluded rather than contributing zeros.
pub fn hsp_from_daily(rows: &[DailyIrradiance]) -> HspStats {
    let mut buckets: [Vec<f64>; 12] = Default::default();
    for row in rows {
        if (1..=12).contains(&row.month) {
            buckets[(row.month - 1) as usize].push(row.value);
        }
    }

    let mut month_mins = Vec::new();
    let mut month_means = Vec::new();
    let mut month_maxs = Vec::new();
    for bucket in &buckets {
        if bucket.is_empty() {
            continue;
        }
        let min = bucket.iter().copied().fold(f64::INFINITY, f64::min);
        let max = bucket.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = bucket.iter().sum::<f64>() / bucket.len() as f64;
        month_mins.push(min);
        month_means.push(mean);
        month_maxs.push(max);
    }

    if month_mins.is_empty() {
        return HspStats::ZERO;
    }

    let avg = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;
    HspStats {
        min: avg(&month_mins),
        mean: avg(&month_means),
        max: avg(&month_maxs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(month: u32, value: f64) -> DailyIrradiance {
        DailyIrradiance { month, value }
    }

    #[test]
    fn test_empty_series_is_zero() {
        assert_eq!(hsp_from_daily(&[]), HspStats::ZERO);
    }

    #[test]
    fn test_single_month_statistics() {
        let stats = hsp_from_daily(&[day(1, 3.0), day(1, 5.0), day(1, 4.0)]);
        assert_eq!(stats.min, 3.0);
        assert_eq!(stats.max, 5.0);
        assert!((stats.mean - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_per_month_extremes_are_averaged_not_global() {
        // January: min 2, mean 3, max 4. July: min 5, mean 6, max 7.
        let stats = hsp_from_daily(&[
            day(1, 2.0),
            day(1, 3.0),
            day(1, 4.0),
            day(7, 5.0),
            day(7, 6.0),
            day(7, 7.0),
        ]);
        // Cross-month averages, not the global extremes 2.0 and 7.0.
        assert!((stats.min - 3.5).abs() < 1e-12);
        assert!((stats.mean - 4.5).abs() < 1e-12);
        assert!((stats.max - 5.5).abs() < 1e-12);
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }

    #[test]
    fn test_out_of_range_month_labels_are_ignored() {
        let stats = hsp_from_daily(&[day(0, 9.0), day(13, 9.0), day(6, 4.0)]);
        assert_eq!(stats.mean, 4.0);
    }

    #[test]
    fn test_decode_power_response_and_skip_fill_values() {
        let body = r#"{
            "type": "Feature",
            "properties": {
                "parameter": {
                    "ALLSKY_SFC_SW_DWN": {
                        "20230101": 4.25,
                        "20230102": -999.0,
                        "20230201": 5.5
                    }
                }
            }
        }"#;
        let resp: PowerApiResponse = serde_json::from_str(body).unwrap();
        let rows = daily_series(resp);
        assert_eq!(rows, vec![day(1, 4.25), day(2, 5.5)]);

        let stats = hsp_from_daily(&rows);
        assert!((stats.mean - (4.25 + 5.5) / 2.0).abs() < 1e-12);
    }
}
