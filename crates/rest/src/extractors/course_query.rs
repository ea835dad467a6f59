//! Course list query extractor.
//!
//! Parses `?id=` and `?name=` into a [`CourseFilter`]. Other parameters are
//! ignored, as are empty values. A repeated key keeps its last value.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use campus_persistence::types::CourseFilter;

use crate::error::{FieldErrors, RestError};

/// Raw query parameters before validation.
#[derive(Debug, Default)]
pub struct CourseQueryParams {
    /// Exact course id.
    pub id: Option<String>,
    /// Exact course name.
    pub name: Option<String>,
}

impl CourseQueryParams {
    /// Collects decoded query pairs, keeping the last value of each key.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "id" => params.id = Some(value),
                "name" => params.name = Some(value),
                _ => {}
            }
        }
        params
    }

    /// Validates the parameters and builds a filter.
    pub fn into_filter(self) -> Result<CourseFilter, RestError> {
        let mut filter = CourseFilter::all();
        let mut errors = FieldErrors::new();

        if let Some(raw) = self.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            match raw.parse::<i64>() {
                Ok(id) => filter = filter.with_id(id),
                Err(_) => {
                    errors.insert("id".to_string(), vec!["Enter a number.".to_string()]);
                }
            }
        }
        if let Some(name) = self.name.filter(|s| !s.is_empty()) {
            filter = filter.with_name(name);
        }

        if errors.is_empty() {
            Ok(filter)
        } else {
            Err(RestError::Validation { errors })
        }
    }
}

/// Axum extractor yielding the filter for a course list request.
#[derive(Debug, Clone, Default)]
pub struct CourseQuery(pub CourseFilter);

impl<S> FromRequestParts<S> for CourseQuery
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) =
            Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(|e| {
                RestError::BadRequest {
                    message: e.body_text(),
                }
            })?;
        CourseQueryParams::from_pairs(pairs)
            .into_filter()
            .map(CourseQuery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(id: Option<&str>, name: Option<&str>) -> CourseQueryParams {
        CourseQueryParams {
            id: id.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_no_params_lists_all() {
        let filter = params(None, None).into_filter().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_id_and_name() {
        let filter = params(Some("3"), Some("C0")).into_filter().unwrap();
        assert_eq!(filter, CourseFilter::all().with_id(3).with_name("C0"));
    }

    #[test]
    fn test_empty_values_ignored() {
        let filter = params(Some(""), Some("")).into_filter().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_name_is_not_trimmed() {
        let filter = params(None, Some(" C0")).into_filter().unwrap();
        assert_eq!(filter.name.as_deref(), Some(" C0"));
    }

    #[test]
    fn test_non_integer_id_rejected() {
        let err = params(Some("abc"), None).into_filter().unwrap_err();
        assert_eq!(err.body(), serde_json::json!({"id": ["Enter a number."]}));
    }

    #[test]
    fn test_query_from_uri_ignores_unknown() {
        let uri: axum::http::Uri = "/api/v1/courses/?name=%D0%9A%D1%83%D1%80%D1%81_1&page=2"
            .parse()
            .unwrap();
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri).unwrap();
        let parsed = CourseQueryParams::from_pairs(pairs);
        assert_eq!(parsed.name.as_deref(), Some("Курс_1"));
        assert!(parsed.id.is_none());
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let parsed = CourseQueryParams::from_pairs([
            ("id".to_string(), "1".to_string()),
            ("name".to_string(), "C0".to_string()),
            ("id".to_string(), "2".to_string()),
        ]);
        assert_eq!(parsed.id.as_deref(), Some("2"));
        assert_eq!(parsed.name.as_deref(), Some("C0"));
    }
}
