// Service configuration loading
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct TrackerSettings {
    pub bind_addr: String,
    pub feeds: Vec<String>,
    pub refresh_interval_secs: u64,
    pub fetch_timeout_secs: u64,
    pub propagation_horizon_days: f64,
    pub max_satellites: usize,
}

/// Load settings from `config/orbital.toml`, falling back to coded
/// defaults so the service starts without a file present.
pub fn load_tracker_config() -> anyhow::Result<TrackerSettings> {
    let settings = config::Config::builder()
        .set_default("bind_addr", "0.0.0.0:8080")?
        .set_default("refresh_interval_secs", 300_u64)?
        .set_default("fetch_timeout_secs", 15_u64)?
        .set_default("propagation_horizon_days", 30.0_f64)?
        .set_default("max_satellites", 2000_u64)?
        .set_default(
            "feeds",
            vec![
                "https://celestrak.org/NORAD/elements/gp.php?GROUP=stations&FORMAT=tle"
                    .to_string(),
                "https://celestrak.org/NORAD/elements/gp.php?GROUP=weather&FORMAT=tle"
                    .to_string(),
                "https://celestrak.org/NORAD/elements/gp.php?GROUP=gps-ops&FORMAT=tle"
                    .to_string(),
            ],
        )?
        .add_source(config::File::with_name("config/orbital").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_produce_a_runnable_configuration() {
        let settings = load_tracker_config().unwrap();
        assert!(!settings.feeds.is_empty());
        assert!(settings.refresh_interval_secs > 0);
        assert!(settings.fetch_timeout_secs > 0);
        assert!(settings.propagation_horizon_days > 0.0);
        assert!(settings.bind_addr.contains(':'));
    }

    #[test]
    fn test_file_values_override_defaults() {
        let settings = config::Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")
            .unwrap()
            .set_default("refresh_interval_secs", 300_u64)
            .unwrap()
            .set_default("fetch_timeout_secs", 15_u64)
            .unwrap()
            .set_default("propagation_horizon_days", 30.0_f64)
            .unwrap()
            .set_default("max_satellites", 2000_u64)
            .unwrap()
            .set_default("feeds", vec!["https://default.test/tle".to_string()])
            .unwrap()
            .add_source(config::File::from_str(
                "refresh_interval_secs = 60\nfeeds = [\"https://override.test/tle\"]\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let settings: TrackerSettings = settings.try_deserialize().unwrap();
        assert_eq!(settings.refresh_interval_secs, 60);
        assert_eq!(settings.feeds, vec!["https://override.test/tle".to_string()]);
        // Untouched keys keep their defaults
        assert_eq!(settings.max_satellites, 2000);
    }
}
