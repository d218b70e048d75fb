use crate::error::ApiError;
use crate::query::{split_url, Query};
use astrolabe::chart::ChartService;
use astrolabe::rendering::{ChartRenderer, ChartSpec, ChartSpecGenerator};
use serde::Serialize;
use std::sync::Arc;

pub const CONTENT_JSON: &str = "application/json";
pub const CONTENT_PNG: &str = "image/png";

/// Every GET endpoint the service answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    NatalChart,
    NatalCalc,
    NatalImage,
    WeeklyForecast,
    Synastry,
    SynastryAnalytics,
    SynastryImage,
    Transits,
    Horary,
}

impl Route {
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        let route = match path {
            "/natal_chart" => Route::NatalChart,
            "/natal_chart/calc" => Route::NatalCalc,
            "/natal_chart/image" => Route::NatalImage,
            "/weekly_forecast" => Route::WeeklyForecast,
            "/synastry" => Route::Synastry,
            "/synastry/analytics" => Route::SynastryAnalytics,
            "/synastry/image" => Route::SynastryImage,
            "/transits" => Route::Transits,
            "/horary_chart" => Route::Horary,
            _ => return None,
        };
        Some(route)
    }
}

/// Status, content type and body of a finished request
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_vec(value).map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(Self {
            status: 200,
            content_type: CONTENT_JSON,
            body,
        })
    }

    pub fn png(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_PNG,
            body,
        }
    }

    pub fn error(err: &ApiError) -> Self {
        Self {
            status: err.status(),
            content_type: CONTENT_JSON,
            body: err.body().to_string().into_bytes(),
        }
    }
}

/// Shared request state.
pub struct App {
    service: ChartService,
    renderer: Arc<dyn ChartRenderer>,
    generator: ChartSpecGenerator,
    image_size: (f32, f32),
}

impl App {
    pub fn new(
        service: ChartService,
        renderer: Arc<dyn ChartRenderer>,
        generator: ChartSpecGenerator,
        image_size: (u32, u32),
    ) -> Self {
        Self {
            service,
            renderer,
            generator,
            image_size: (image_size.0 as f32, image_size.1 as f32),
        }
    }

    /// Route and run one request; failures become JSON error replies.
    pub async fn handle(&self, method: &str, url: &str) -> Reply {
        match self.dispatch(method, url).await {
            Ok(reply) => reply,
            Err(err) => {
                match err.status() {
                    500.. => log::error!("{} {} failed: {}", method, url, err),
                    _ => log::warn!("{} {} rejected: {}", method, url, err),
                }
                Reply::error(&err)
            }
        }
    }

    async fn dispatch(&self, method: &str, url: &str) -> Result<Reply, ApiError> {
        let (path, raw_query) = split_url(url);
        let route = Route::from_path(path).ok_or_else(|| ApiError::NotFound(path.to_string()))?;
        if method != "GET" {
            return Err(ApiError::MethodNotAllowed(method.to_string()));
        }
        let q = Query::parse(raw_query);
        let (width, height) = self.image_size;

        match route {
            Route::NatalChart => {
                let input = q.birth_data("", "")?;
                Reply::json(&self.service.natal_summary(&input).await?)
            }
            Route::NatalCalc => {
                let input = q.birth_data("", "")?;
                Reply::json(&self.service.natal_chart(&input).await?)
            }
            Route::NatalImage => {
                let input = q.birth_data("", "")?;
                let chart = self.service.natal_chart(&input).await?;
                let spec = self.generator.natal_wheel(&chart, width, height);
                self.render(spec).await
            }
            Route::WeeklyForecast => {
                let input = q.birth_data("", "")?;
                let start_date = q.required("start_date")?;
                Reply::json(&self.service.weekly_forecast(&input, start_date).await?)
            }
            Route::Synastry => {
                let (first, second) = (q.birth_data("", "1")?, q.birth_data("", "2")?);
                Reply::json(&self.service.synastry(&first, &second).await?)
            }
            Route::SynastryAnalytics => {
                let (first, second) = (q.birth_data("", "1")?, q.birth_data("", "2")?);
                Reply::json(&self.service.synastry_analytics(&first, &second).await?)
            }
            Route::SynastryImage => {
                let (first, second) = (q.birth_data("", "1")?, q.birth_data("", "2")?);
                let (chart1, chart2) = self.service.synastry_charts(&first, &second).await?;
                let aspects = astrolabe::chart::synastry_aspects(
                    self.service.assembler().calculator(),
                    &chart1,
                    &chart2,
                );
                let spec = self
                    .generator
                    .synastry_wheel(&chart1, &chart2, &aspects, width, height);
                self.render(spec).await
            }
            Route::Transits => {
                let natal = q.birth_data("natal_", "")?;
                let transit_date = q.required("transit_date")?;
                let transit_time = q.optional("transit_time").unwrap_or("00:00");
                Reply::json(&self.service.transits(&natal, transit_date, transit_time).await?)
            }
            Route::Horary => {
                let input = q.birth_data("", "")?;
                Reply::json(&self.service.horary_chart(&input).await?)
            }
        }
    }

    async fn render(&self, spec: ChartSpec) -> Result<Reply, ApiError> {
        let renderer = self.renderer.clone();
        let png = tokio::task::spawn_blocking(move || renderer.render_png(&spec))
            .await
            .map_err(|e| ApiError::Internal(format!("render task failed: {e}")))??;
        Ok(Reply::png(png))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_table() {
        assert_eq!(Route::from_path("/natal_chart/calc"), Some(Route::NatalCalc));
        assert_eq!(Route::from_path("/synastry/"), Some(Route::Synastry));
        assert_eq!(Route::from_path("/natal_chart"), Some(Route::NatalChart));
        assert_eq!(Route::from_path("/"), None);
        assert_eq!(Route::from_path("/natal_chart/svg"), None);
    }
}
