/// Consumption ledger
///
/// Append-only log of user-supplied consumption readings, each covering one
/// billing period of roughly 30 days. Readings are only ever appended; a
/// rejected input leaves the log untouched. The daily average divides the
/// mean reading by the billing period length; rounding for display is the
/// caller's concern.
use std::fmt;
use std::fmt::Formatter;

const BILLING_PERIOD_DAYS: f64 = 30.0;

#[derive(Debug)]
pub struct LedgerError(pub String);
impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerError: {}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsumptionLog {
    readings: Vec<f64>,
}

impl ConsumptionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and appends one reading. A value that is not a finite
    /// non-negative number is rejected and prior readings are preserved.
    pub fn append(&mut self, raw: &str) -> Result<f64, LedgerError> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| LedgerError(format!("not a numeric reading: {:?}", raw)))?;
        if !value.is_finite() || value < 0.0 {
            return Err(LedgerError(format!(
                "reading must be a non-negative number, got {:?}",
                raw
            )));
        }
        self.readings.push(value);
        Ok(value)
    }

    /// Mean reading divided by the billing period; exactly 0 for an empty log.
    pub fn daily_average(&self) -> f64 {
        if self.readings.is_empty() {
            return 0.0;
        }
        let mean = self.readings.iter().sum::<f64>() / self.readings.len() as f64;
        mean / BILLING_PERIOD_DAYS
    }

    /// Readings in insertion order.
    pub fn readings(&self) -> &[f64] {
        &self.readings
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_log_averages_to_exactly_zero() {
        assert_eq!(ConsumptionLog::new().daily_average(), 0.0);
    }

    #[test]
    fn test_daily_average_is_mean_over_thirty() {
        let mut log = ConsumptionLog::new();
        log.append("300").unwrap();
        log.append("310").unwrap();
        log.append("290").unwrap();
        assert!((log.daily_average() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = ConsumptionLog::new();
        log.append("1").unwrap();
        log.append("3").unwrap();
        log.append("2").unwrap();
        assert_eq!(log.readings(), &[1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_rejected_input_leaves_log_untouched() {
        let mut log = ConsumptionLog::new();
        log.append("250").unwrap();

        assert!(log.append("abc").is_err());
        assert!(log.append("-5").is_err());
        assert!(log.append("NaN").is_err());
        assert!(log.append("inf").is_err());

        assert_eq!(log.readings(), &[250.0]);
    }

    #[test]
    fn test_zero_reading_is_valid() {
        let mut log = ConsumptionLog::new();
        assert_eq!(log.append("0").unwrap(), 0.0);
        assert_eq!(log.daily_average(), 0.0);
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        let mut log = ConsumptionLog::new();
        assert_eq!(log.append("  42.5 ").unwrap(), 42.5);
    }
}
