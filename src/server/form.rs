//! Lenient `name`/`email` extraction from query string and form body.
//!
//! Fields are read from the query string and, for
//! `application/x-www-form-urlencoded` or `multipart/form-data` requests,
//! from the body as well. A key present in the body wins over the query
//! even when its value is empty; within one source the first occurrence of
//! a key wins. Anything missing becomes an empty string; requests are never
//! rejected for their field contents.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{HeaderMap, header};

use super::error::ApiError;
use crate::models::UserFields;

const URLENCODED_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// Extractor yielding the submitted [`UserFields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm(pub UserFields);

#[async_trait]
impl<S> FromRequest<S> for UserForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = req
            .uri()
            .query()
            .map(|q| parse_urlencoded(q.as_bytes()))
            .unwrap_or_default();

        let body = match body_kind(req.headers()) {
            BodyKind::UrlEncoded => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                parse_urlencoded(&bytes)
            }
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                parse_multipart(multipart).await?
            }
            BodyKind::Other => Submitted::default(),
        };

        Ok(UserForm(body.or(query).into_fields()))
    }
}

/// Fields seen in one source; `None` means the key was absent.
#[derive(Debug, Default)]
struct Submitted {
    name: Option<String>,
    email: Option<String>,
}

impl Submitted {
    fn slot(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "name" => Some(&mut self.name),
            "email" => Some(&mut self.email),
            _ => None,
        }
    }

    /// Whether `key` is a field we keep and has not been seen yet.
    fn wants(&mut self, key: &str) -> bool {
        self.slot(key).is_some_and(|slot| slot.is_none())
    }

    fn offer(&mut self, key: &str, value: String) {
        if let Some(slot) = self.slot(key) {
            if slot.is_none() {
                *slot = Some(value);
            }
        }
    }

    /// Keys present in `self` win; the rest come from `fallback`.
    fn or(self, fallback: Submitted) -> Submitted {
        Submitted {
            name: self.name.or(fallback.name),
            email: self.email.or(fallback.email),
        }
    }

    fn into_fields(self) -> UserFields {
        UserFields {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        }
    }
}

enum BodyKind {
    UrlEncoded,
    Multipart,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if content_type.starts_with(URLENCODED_CONTENT_TYPE) {
        BodyKind::UrlEncoded
    } else if content_type.starts_with(MULTIPART_CONTENT_TYPE) {
        BodyKind::Multipart
    } else {
        BodyKind::Other
    }
}

fn parse_urlencoded(raw: &[u8]) -> Submitted {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw).unwrap_or_else(|e| {
        tracing::warn!("ignoring unparsable form fields: {e}");
        Vec::new()
    });

    let mut submitted = Submitted::default();
    for (key, value) in pairs {
        submitted.offer(&key, value);
    }
    submitted
}

// File parts are skipped; only plain value parts count as fields.
async fn parse_multipart(mut multipart: Multipart) -> Result<Submitted, ApiError> {
    let mut submitted = Submitted::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(key) = field.name().map(str::to_owned) else {
            continue;
        };
        if !submitted.wants(&key) {
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        submitted.offer(&key, value);
    }
    Ok(submitted)
}
