//! Request parameter extraction.
//!
//! Payment parameters may arrive in the query string, a urlencoded form body,
//! or a JSON object body. All sources are merged into one flat string map,
//! with body values taking precedence over query values.

use std::collections::HashMap;

use axum::{
    extract::{FromRequest, Query, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Flat view of every parameter sent with a request.
#[derive(Debug, Clone, Default)]
pub struct RequestParams(pub HashMap<String, String>);

impl<S> FromRequest<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut params = match request.uri().query() {
            Some(_) => {
                Query::<HashMap<String, String>>::try_from_uri(request.uri())
                    .map_err(|e| AppError::MalformedBody(e.body_text()))?
                    .0
            }
            None => HashMap::new(),
        };

        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<Map<String, Value>>::from_request(request, state)
                .await
                .map_err(|e| AppError::MalformedBody(e.body_text()))?;
            for (key, value) in body {
                match scalar_to_string(value) {
                    Some(value) => {
                        params.insert(key, value);
                    }
                    None => {
                        params.remove(&key);
                    }
                }
            }
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<HashMap<String, String>>::from_request(request, state)
                .await
                .map_err(|e| AppError::MalformedBody(e.body_text()))?;
            params.extend(body);
        }

        Ok(RequestParams(params))
    }
}

/// String form of a JSON value; `null` means the key was not sent.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
