//! Query-string access for GET handlers.

use astrolabe::chart::{BirthData, ValidationError};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Query {
    params: HashMap<String, String>,
}

impl Query {
    /// Parse `a=1&b=two+words`; later duplicates win, undecodable pairs are skipped.
    pub fn parse(raw: &str) -> Self {
        let params = raw
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                let key = decode(key)?;
                let value = decode(value)?;
                Some((key, value))
            })
            .collect();
        Self { params }
    }

    pub fn optional(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.as_str())
    }

    pub fn required(&self, name: &str) -> Result<&str, ValidationError> {
        match self.optional(name).map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(ValidationError::MissingParameter(name.to_string())),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i32, ValidationError> {
        let raw = self.required(name)?;
        raw.parse().map_err(|_| ValidationError::InvalidParameter {
            name: name.to_string(),
            value: raw.to_string(),
        })
    }

    /// Birth record from `{prefix}date{suffix}`, `{prefix}time{suffix}`,
    /// `{prefix}place{suffix}` and `{prefix}tz_offset{suffix}`.
    pub fn birth_data(&self, prefix: &str, suffix: &str) -> Result<BirthData, ValidationError> {
        let key = |field: &str| format!("{prefix}{field}{suffix}");
        Ok(BirthData::new(
            self.required(&key("date"))?,
            self.required(&key("time"))?,
            self.required(&key("place"))?,
            self.integer(&key("tz_offset"))?,
        ))
    }
}

fn decode(s: &str) -> Option<String> {
    urlencoding::decode(&s.replace('+', " "))
        .ok()
        .map(|v| v.into_owned())
}

/// Split a request URL into path and raw query string.
pub fn split_url(url: &str) -> (&str, &str) {
    url.split_once('?').unwrap_or((url, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plus_and_percent() {
        let q = Query::parse("place=New+York%2C%20US&date=2000-01-01&flag");
        assert_eq!(q.optional("place"), Some("New York, US"));
        assert_eq!(q.optional("flag"), Some(""));
        assert_eq!(q.optional("missing"), None);
    }

    #[test]
    fn literal_plus_stays_encoded() {
        let q = Query::parse("tz_offset=%2B3");
        assert_eq!(q.integer("tz_offset"), Ok(3));
    }

    #[test]
    fn missing_and_invalid_parameters() {
        let q = Query::parse("date=2000-01-01&tz_offset=east&place=");
        assert_eq!(q.required("time"), Err(ValidationError::MissingParameter("time".into())));
        assert_eq!(q.required("place"), Err(ValidationError::MissingParameter("place".into())));
        assert!(matches!(q.integer("tz_offset"), Err(ValidationError::InvalidParameter { .. })));
    }

    #[test]
    fn birth_data_with_suffix() {
        let q = Query::parse("date2=1988-11-20&time2=21:40&place2=Paris&tz_offset2=1");
        let b = q.birth_data("", "2").unwrap();
        assert_eq!(b, BirthData::new("1988-11-20", "21:40", "Paris", 1));

        let q = Query::parse("natal_date=1990-05-01&natal_time=08:15&natal_place=Moscow&natal_tz_offset=-3");
        assert_eq!(q.birth_data("natal_", "").unwrap().tz_offset, -3);
    }

    #[test]
    fn split_url_parts() {
        assert_eq!(split_url("/synastry?date1=x"), ("/synastry", "date1=x"));
        assert_eq!(split_url("/horary_chart"), ("/horary_chart", ""));
    }
}
