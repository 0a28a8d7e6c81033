use serde::Deserialize;

fn default_user_agent() -> String {
    format!("pv-consulter/{}", env!("CARGO_PKG_VERSION"))
}
fn default_reference_year() -> i32 {
    2023
}
fn default_community() -> String {
    "re".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub geocoding: GeocodingConfig,
    pub irradiance: IrradianceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim-style endpoint root, e.g. https://nominatim.openstreetmap.org
    pub base_url: String,
    /// Sent on every request; Nominatim's usage policy requires one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IrradianceConfig {
    /// NASA POWER-style daily point endpoint
    pub base_url: String,
    /// Calendar year the daily series is requested for
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,
    /// POWER community parameter ("re" = renewable energy)
    #[serde(default = "default_community")]
    pub community: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let raw = r#"{
            "server": { "port": 3000 },
            "geocoding": { "base_url": "https://nominatim.openstreetmap.org" },
            "irradiance": { "base_url": "https://power.larc.nasa.gov/api/temporal/daily/point" }
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.irradiance.reference_year, 2023);
        assert_eq!(config.irradiance.community, "re");
        assert!(config.geocoding.user_agent.starts_with("pv-consulter/"));
    }

    #[test]
    fn test_explicit_values_win_over_defaults() {
        let raw = r#"{
            "server": { "port": 8080 },
            "geocoding": { "base_url": "http://localhost:9999", "user_agent": "test-agent" },
            "irradiance": { "base_url": "http://localhost:9998", "reference_year": 2022, "community": "ag" }
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.geocoding.user_agent, "test-agent");
        assert_eq!(config.irradiance.reference_year, 2022);
        assert_eq!(config.irradiance.community, "ag");
    }
}
