//! HTTP front end for the astrolabe chart engine.

pub mod error;
pub mod query;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{App, Reply, Route};

use anyhow::Context;
use astrolabe::chart::{ChartService, ChartSettings};
use astrolabe::ephemeris::parse_house_system;
use astrolabe::rendering::{ChartSpecGenerator, PngRenderer, VisualConfig};
use astrolabe::western::RulerConvention;
use astrolabe::{GeocoderSettings, NominatimGeocoder, OrbPolicy, SwissEphemerisAdapter};
use astrolabe_config::ServiceConfig;
use std::sync::Arc;
use std::time::Duration;

impl App {
    /// Wire the Swiss Ephemeris, Nominatim and the PNG renderer from config.
    pub fn from_config(cfg: &ServiceConfig) -> anyhow::Result<Self> {
        let house_system = parse_house_system(&cfg.ephemeris.house_system)?;
        let rulers = RulerConvention::from_name(&cfg.rulers.convention)
            .with_context(|| format!("unknown ruler convention {:?}", cfg.rulers.convention))?;
        let settings = ChartSettings {
            house_system,
            orbs: OrbPolicy {
                default_orb: cfg.aspects.default_orb,
                luminary_orb: cfg.aspects.luminary_orb,
            },
            rulers,
        };

        let ephemeris = SwissEphemerisAdapter::new(cfg.ephemeris.path.clone())
            .context("failed to initialise Swiss Ephemeris")?;
        if ephemeris.ephemeris_path().is_none() {
            log::warn!("No ephemeris path set, positions use the built-in Moshier theory");
        }
        let geocoder = NominatimGeocoder::new(&GeocoderSettings {
            endpoint: cfg.geocoder.endpoint.clone(),
            user_agent: cfg.geocoder.user_agent.clone(),
            timeout: Duration::from_secs(cfg.geocoder.timeout_secs),
        })
        .context("failed to build geocoder client")?;

        let visual = VisualConfig::default();
        let renderer = PngRenderer::new(&visual.font_family);
        let service = ChartService::new(Arc::new(ephemeris), Arc::new(geocoder), settings);

        log::info!(
            "Chart settings: houses={:?} rulers={:?} orbs={}/{}",
            settings.house_system,
            settings.rulers,
            settings.orbs.default_orb,
            settings.orbs.luminary_orb
        );
        Ok(App::new(
            service,
            Arc::new(renderer),
            ChartSpecGenerator::new(),
            (cfg.render.width, cfg.render.height),
        ))
    }
}
