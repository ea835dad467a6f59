//! Course body extractor.
//!
//! Accepts `application/json`, `application/x-www-form-urlencoded` and
//! `multipart/form-data` bodies and normalizes each into a JSON object before
//! field validation.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header},
};
use campus_persistence::error::ValidationError;
use campus_persistence::types::{CoursePatch, NewCourse};
use serde_json::{Map, Value};

use crate::error::{FieldErrors, RestError, validation_message};

/// Axum extractor for course create and update bodies.
///
/// The extractor only checks that the body parses. Field shapes are checked
/// by [`CoursePayload::into_new_course`] and [`CoursePayload::into_patch`],
/// which report every offending field at once.
///
/// # Example
///
/// ```rust,ignore
/// use campus_rest::extractors::CoursePayload;
///
/// async fn create_handler(payload: CoursePayload) {
///     let course = payload.into_new_course()?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoursePayload(pub Map<String, Value>);

impl CoursePayload {
    /// Returns a reference to the raw field map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts the body into a create input. `name` is required.
    pub fn into_new_course(self) -> Result<NewCourse, RestError> {
        let mut errors = FieldErrors::new();

        let name = match self.0.get("name") {
            Some(value) => record(&mut errors, "name", parse_name(value)),
            None => {
                push_error(
                    &mut errors,
                    "name",
                    validation_message(&ValidationError::MissingRequiredField { field: "name" }),
                );
                None
            }
        };
        let students = self
            .0
            .get("students")
            .and_then(|value| record(&mut errors, "students", parse_students(value)));

        match name {
            Some(name) if errors.is_empty() => {
                Ok(NewCourse::new(name).with_students(students.unwrap_or_default()))
            }
            _ => Err(RestError::Validation { errors }),
        }
    }

    /// Converts the body into a partial update. Absent fields stay unchanged.
    pub fn into_patch(self) -> Result<CoursePatch, RestError> {
        let mut errors = FieldErrors::new();
        let mut patch = CoursePatch::default();

        if let Some(value) = self.0.get("name") {
            patch.name = record(&mut errors, "name", parse_name(value));
        }
        if let Some(value) = self.0.get("students")
            && let Some(students) = record(&mut errors, "students", parse_students(value))
        {
            patch = patch.with_students(students);
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(RestError::Validation { errors })
        }
    }
}

fn push_error(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}

fn record<T>(errors: &mut FieldErrors, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            push_error(errors, field, message);
            None
        }
    }
}

/// Names a JSON value's type the way error messages report it.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn parse_name(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(if *b { "True" } else { "False" }.to_string()),
        Value::Null => Err("This field may not be null.".to_string()),
        Value::Array(_) | Value::Object(_) => Err("Not a valid string.".to_string()),
    }
}

fn parse_students(value: &Value) -> Result<Vec<i64>, String> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Err("This field may not be null.".to_string()),
        other => {
            return Err(format!(
                "Expected a list of items but got type \"{}\".",
                type_name(other)
            ));
        }
    };

    items
        .iter()
        .map(|item| {
            let id = match item {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            id.ok_or_else(|| {
                format!(
                    "Incorrect type. Expected pk value, received {}.",
                    type_name(item)
                )
            })
        })
        .collect()
}

/// Builds a field map from decoded form or multipart pairs.
///
/// `students` may repeat and always becomes a list. For other keys the last
/// occurrence wins.
fn form_to_map(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in pairs {
        if key == "students" {
            // An empty value clears the list, as a multi-select with nothing chosen.
            let entry = map
                .entry(key)
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(items) = entry
                && !value.is_empty()
            {
                items.push(Value::String(value));
            }
        } else {
            map.insert(key, Value::String(value));
        }
    }
    map
}

enum BodyFormat {
    Json,
    Form,
    Multipart,
}

fn body_format(content_type: Option<&str>) -> Result<BodyFormat, RestError> {
    let Some(raw) = content_type else {
        return Ok(BodyFormat::Json);
    };
    let mime: mime::Mime = raw.parse().map_err(|_| RestError::UnsupportedMediaType {
        content_type: raw.to_string(),
    })?;

    if mime.type_() == mime::APPLICATION
        && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
    {
        Ok(BodyFormat::Json)
    } else if mime.type_() == mime::APPLICATION && mime.subtype() == mime::WWW_FORM_URLENCODED {
        Ok(BodyFormat::Form)
    } else if mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA {
        Ok(BodyFormat::Multipart)
    } else {
        Err(RestError::UnsupportedMediaType {
            content_type: raw.to_string(),
        })
    }
}

fn body_error(status: StatusCode, text: String) -> RestError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        RestError::PayloadTooLarge
    } else {
        RestError::BadRequest { message: text }
    }
}

fn multipart_error(e: MultipartError) -> RestError {
    body_error(
        e.status(),
        format!("Multipart form parse error - {}", e.body_text()),
    )
}

/// Collects the text parts of a multipart body into a field map.
async fn read_multipart<S>(req: Request, state: &S) -> Result<Map<String, Value>, RestError>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|e| body_error(e.status(), e.body_text()))?;

    let mut pairs = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(multipart_error)?;
        pairs.push((name, value));
    }
    Ok(form_to_map(pairs))
}

/// Parses a buffered JSON or urlencoded body.
fn parse_buffered(format: BodyFormat, bytes: &[u8]) -> Result<Map<String, Value>, RestError> {
    if bytes.is_empty() {
        return Ok(Map::new());
    }

    match format {
        BodyFormat::Json => match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(RestError::field(
                "non_field_errors",
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    type_name(&other)
                ),
            )),
            Err(e) => Err(RestError::BadRequest {
                message: format!("JSON parse error - {}", e),
            }),
        },
        BodyFormat::Form | BodyFormat::Multipart => {
            let pairs: Vec<(String, String)> =
                serde_urlencoded::from_bytes(bytes).map_err(|e| RestError::BadRequest {
                    message: format!("Form parse error - {}", e),
                })?;
            Ok(form_to_map(pairs))
        }
    }
}

impl<S> FromRequest<S> for CoursePayload
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Own the header value before the request is consumed
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let map = match body_format(content_type.as_deref())? {
            BodyFormat::Multipart => read_multipart(req, state).await?,
            format => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;
                parse_buffered(format, &bytes)?
            }
        };

        Ok(CoursePayload(map))
    }
}
