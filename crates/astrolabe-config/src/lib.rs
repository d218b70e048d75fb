use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Tried in order; the second form covers running from inside `apps/<name>`.
pub const CONFIG_PATHS: [&str; 2] = ["configs/astrolabe.toml", "../../configs/astrolabe.toml"];

pub const ENV_BIND: &str = "ASTROLABE_BIND";
pub const ENV_EPHEMERIS_PATH: &str = "SWISS_EPHEMERIS_PATH";
pub const ENV_GEOCODER_URL: &str = "ASTROLABE_GEOCODER_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EphemerisSettings {
    /// Swiss Ephemeris data directory; the built-in theory is used when absent
    pub path: Option<PathBuf>,
    pub house_system: String,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            path: None,
            house_system: "placidus".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "astro_api".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AspectSettings {
    pub default_orb: f64,
    pub luminary_orb: f64,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            default_orb: 6.0,
            luminary_orb: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RulerSettings {
    /// "modern" or "traditional"
    pub convention: String,
}

impl Default for RulerSettings {
    fn default() -> Self {
        Self {
            convention: "modern".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1500,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerSettings,
    pub ephemeris: EphemerisSettings,
    pub geocoder: GeocoderSettings,
    pub aspects: AspectSettings,
    pub rulers: RulerSettings,
    pub render: RenderSettings,
}

/// Text of the first config file found, or `None` when there is none.
pub fn read_config_toml_text() -> Option<(String, &'static str)> {
    CONFIG_PATHS
        .iter()
        .find_map(|p| fs::read_to_string(p).ok().map(|text| (text, *p)))
}

pub fn parse_service_config(text: &str) -> anyhow::Result<ServiceConfig> {
    let cfg: ServiceConfig =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse astrolabe.toml: {e}"))?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Replace settings with any of the `ASTROLABE_BIND`, `SWISS_EPHEMERIS_PATH`
/// and `ASTROLABE_GEOCODER_URL` values `lookup` returns.
pub fn apply_env_overrides(cfg: &mut ServiceConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.is_empty()) {
        cfg.server.bind = bind;
    }
    if let Some(path) = lookup(ENV_EPHEMERIS_PATH).filter(|v| !v.is_empty()) {
        cfg.ephemeris.path = Some(PathBuf::from(path));
    }
    if let Some(url) = lookup(ENV_GEOCODER_URL).filter(|v| !v.is_empty()) {
        cfg.geocoder.endpoint = url;
    }
}

/// Config file (or defaults) with environment overrides applied.
pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let mut cfg = match read_config_toml_text() {
        Some((text, path)) => {
            log::info!("Loading configuration from {}", path);
            parse_service_config(&text)?
        }
        None => {
            log::info!("No astrolabe.toml found in {:?}, using defaults", CONFIG_PATHS);
            ServiceConfig::default()
        }
    };
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

fn validate(cfg: &ServiceConfig) -> anyhow::Result<()> {
    let orbs = [
        ("aspects.default_orb", cfg.aspects.default_orb),
        ("aspects.luminary_orb", cfg.aspects.luminary_orb),
    ];
    for (name, orb) in orbs {
        if !orb.is_finite() || orb < 0.0 || orb > 30.0 {
            anyhow::bail!("{name} must be between 0 and 30 degrees, got {orb}");
        }
    }
    if cfg.render.width == 0 || cfg.render.height == 0 {
        anyhow::bail!(
            "render size must be positive, got {}x{}",
            cfg.render.width,
            cfg.render.height
        );
    }
    if cfg.geocoder.timeout_secs == 0 {
        anyhow::bail!("geocoder.timeout_secs must be positive");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse_service_config("").unwrap();
        assert_eq!(cfg, ServiceConfig::default());
        assert_eq!(cfg.server.bind, "127.0.0.1:8000");
        assert_eq!(cfg.aspects.luminary_orb, 8.0);
        assert_eq!(cfg.render.width, 1500);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse_service_config(
            r#"
[ephemeris]
path = "/usr/local/share/swisseph"

[rulers]
convention = "traditional"

[aspects]
default_orb = 5.0
"#,
        )
        .unwrap();
        assert_eq!(cfg.ephemeris.path, Some(PathBuf::from("/usr/local/share/swisseph")));
        assert_eq!(cfg.ephemeris.house_system, "placidus");
        assert_eq!(cfg.rulers.convention, "traditional");
        assert_eq!(cfg.aspects.default_orb, 5.0);
        assert_eq!(cfg.aspects.luminary_orb, 8.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(parse_service_config("[server\nbind = 1").is_err());
        assert!(parse_service_config("[server]\nbind = 8000").is_err());
        assert!(parse_service_config("[aspects]\ndefault_orb = -1.0").is_err());
        assert!(parse_service_config("[render]\nwidth = 0").is_err());
    }

    #[test]
    fn env_overrides_win() {
        let mut cfg = ServiceConfig::default();
        apply_env_overrides(&mut cfg, |key| match key {
            ENV_BIND => Some("0.0.0.0:9000".to_string()),
            ENV_EPHEMERIS_PATH => Some("/data/ephe".to_string()),
            ENV_GEOCODER_URL => Some(String::new()),
            _ => None,
        });
        assert_eq!(cfg.server.bind, "0.0.0.0:9000");
        assert_eq!(cfg.ephemeris.path, Some(PathBuf::from("/data/ephe")));
        assert_eq!(cfg.geocoder.endpoint, GeocoderSettings::default().endpoint);
    }
}
