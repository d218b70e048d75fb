use astrolabe::chart::{ChartError, ValidationError};
use astrolabe::rendering::RenderError;
use serde_json::json;
use thiserror::Error;

/// Request failures, each with a fixed HTTP status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid place name")]
    InvalidPlace,
    #[error("{0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),
    #[error("Geocoding service unavailable: {0}")]
    BadGateway(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::InvalidPlace | ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed(_) => 405,
            ApiError::Internal(_) => 500,
            ApiError::BadGateway(_) => 502,
        }
    }

    /// `{"error": message}`
    pub fn body(&self) -> serde_json::Value {
        json!({ "error": self.to_string() })
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<ChartError> for ApiError {
    fn from(e: ChartError) -> Self {
        match e {
            ChartError::InvalidPlace(_) => ApiError::InvalidPlace,
            ChartError::Validation(e) => e.into(),
            ChartError::Ephemeris(e) => ApiError::Internal(e.to_string()),
            ChartError::Geocode(e) => ApiError::BadGateway(e.to_string()),
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrolabe::geocode::GeocodeError;

    #[test]
    fn chart_errors_map_to_statuses() {
        let invalid: ApiError = ChartError::InvalidPlace("Atlantis".into()).into();
        assert_eq!(invalid.status(), 400);
        assert_eq!(invalid.body(), json!({"error": "Invalid place name"}));

        let bad_time: ApiError = ChartError::Validation(ValidationError::Time("7pm".into())).into();
        assert_eq!(bad_time.status(), 400);

        let upstream: ApiError = ChartError::Geocode(GeocodeError::Status { status: 503 }).into();
        assert_eq!(upstream.status(), 502);

        let render: ApiError = RenderError::Pixmap { width: 0, height: 0 }.into();
        assert_eq!(render.status(), 500);
    }
}
